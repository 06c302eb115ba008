use paperstyle_parsing::{Classifier, TextBlock};

use crate::html::escape;

pub const PARAGRAPH_STYLE: &str = "margin-bottom: 1em; text-align: justify; text-indent: 0.5in;";
pub const SUBHEADING_STYLE: &str = "margin-top: 1.5em; margin-bottom: 0.5em; font-weight: bold; text-align: left; text-transform: uppercase;";

/// Turn free text into `<p>` paragraphs and bold `<h3>` subheadings.
pub fn text_to_markup(text: &str, classifier: &Classifier) -> String {
    let mut out = String::with_capacity(text.len() + 128);
    for block in classifier.blocks(text) {
        match block {
            TextBlock::Heading(h) => {
                out.push_str(&format!(
                    "<h3 style=\"{}\">{}</h3>",
                    SUBHEADING_STYLE,
                    escape(&h)
                ));
            }
            TextBlock::Paragraph(p) => {
                out.push_str(&format!("<p style=\"{}\">{}</p>", PARAGRAPH_STYLE, escape(&p)));
            }
        }
    }
    out
}
