//! HTML escaping for user-supplied text.
//!
//! Message bodies reach the DOM through `inner_html`, so every one of them
//! passes through [`escape_html`] first. Nothing else writes user text as
//! markup.

#[cfg(test)]
#[path = "escape_test.rs"]
mod escape_test;

/// Escape `text` so that it renders literally inside an HTML element or a
/// quoted attribute.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
