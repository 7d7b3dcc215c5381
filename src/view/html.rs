//! Markup helpers

/// Escape text for use in element content or a quoted attribute value
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// A `<p class="muted">` line
pub fn muted(text: &str) -> String {
    format!("<p class=\"muted\">{}</p>", escape(text))
}

/// An inline error line
pub fn error(text: &str) -> String {
    format!("<p class=\"error\">{}</p>", escape(text))
}

/// An `<option>`
pub fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        "<option value=\"{}\"{}>{}</option>",
        escape(value),
        if selected { " selected" } else { "" },
        escape(label)
    )
}
