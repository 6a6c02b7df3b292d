//! SSML rendering for spoken responses.

/// Escapes text for inclusion in an SSML document.
pub fn escape_ssml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wraps plain text in a `<speak>` document.
pub fn speak(text: &str) -> String {
    format!("<speak>{}</speak>", escape_ssml(text))
}
