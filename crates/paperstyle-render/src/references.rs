/// How a style orders its reference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceOrder {
    /// Case-insensitive by the text before the first "(" (usually the authors).
    Alphabetical,
    /// Keep the order the references were given in.
    AsGiven,
}

/// Non-blank, trimmed reference lines.
pub fn split_references(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

fn sort_key(reference: &str) -> String {
    reference
        .split('(')
        .next()
        .unwrap_or(reference)
        .trim()
        .to_lowercase()
}

/// Split and order references. The alphabetical sort is stable, so
/// entries with equal keys keep their input order.
pub fn ordered_references(text: &str, order: ReferenceOrder) -> Vec<&str> {
    let mut refs = split_references(text);
    if order == ReferenceOrder::Alphabetical {
        refs.sort_by_cached_key(|r| sort_key(r));
    }
    refs
}
