//! Escaping of free text before it is embedded into the presentation service's
//! markup-like `content` fields.

/// Characters that would otherwise be picked up as markdown formatting.
const MARKDOWN_METACHARACTERS: [char; 8] = ['*', '_', '`', '~', '[', ']', '(', ')'];

/// Escapes HTML metacharacters (`&`, `<`, `>`, `"`, `'`) as entities.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Backslash-escapes markdown metacharacters.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if MARKDOWN_METACHARACTERS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Prepares free text for a `content` field.
///
/// HTML metacharacters are always escaped. With `allow_markdown` off, markdown
/// metacharacters are backslash-escaped too so plain text renders literally; turn it
/// on for fields whose markdown (bullets, emphasis) should render.
pub fn process_content(text: &str, allow_markdown: bool) -> String {
    let html_safe = escape_html(text);
    if allow_markdown {
        html_safe
    } else {
        escape_markdown(&html_safe)
    }
}
