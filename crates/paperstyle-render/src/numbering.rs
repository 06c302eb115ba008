/// How body sections are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingScheme {
    Arabic,
    Roman,
}

impl NumberingScheme {
    /// Label for the `n`th rendered section (1-based).
    pub fn label(self, n: usize) -> String {
        match self {
            NumberingScheme::Arabic => n.to_string(),
            NumberingScheme::Roman => to_roman(n),
        }
    }
}

const ROMAN: &[(usize, &str)] = &[
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Upper-case Roman numeral for `n`. Zero yields an empty string.
pub fn to_roman(mut n: usize) -> String {
    let mut out = String::new();
    for &(value, glyph) in ROMAN {
        while n >= value {
            out.push_str(glyph);
            n -= value;
        }
    }
    out
}
