//! HTML fragment rendering. All server-supplied text is escaped here; nothing
//! else in the crate builds markup.

pub mod assessment;
pub mod page;
pub mod roadmap;

pub use assessment::{AssessmentRenderer, BreakdownRenderer, SummaryRenderer};

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
