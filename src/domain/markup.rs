// Text escaping for generated markup and scripts

/// Escape text for interpolation into HTML content or a double-quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text for interpolation into a single-quoted JavaScript string literal.
pub fn escape_js(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\x3C"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out
}

/// Turn a widget id into an identifier suffix.
///
/// Every character outside `[A-Za-z0-9_$]` becomes `_`. The result is always
/// appended to a non-empty prefix (`update_`, `updateClock_`), so a leading
/// digit is fine.
pub fn js_identifier(id: &str) -> String {
    id.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#039;Jerry&#039;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain-id_1"), "plain-id_1");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_escape_js() {
        assert_eq!(escape_js("it's"), "it\\'s");
        assert_eq!(escape_js("a\\b"), "a\\\\b");
        assert_eq!(escape_js("line\nbreak"), "line\\nbreak");
        assert_eq!(escape_js("Atlanta"), "Atlanta");
        assert_eq!(escape_js("</script>"), "\\x3C/script>");
    }

    #[test]
    fn test_js_identifier() {
        assert_eq!(js_identifier("a-1"), "a_1");
        assert_eq!(js_identifier("a-2"), "a_2");
        assert_eq!(js_identifier("my widget.v2"), "my_widget_v2");
        assert_eq!(js_identifier("ok_$name"), "ok_$name");
        assert_eq!(js_identifier("héllo"), "h_llo");
    }
}
