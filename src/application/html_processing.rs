// Post-processing of generated widget markup
use once_cell::sync::Lazy;
use regex::Regex;

pub const HEADER_CLASS: &str = "dash-card-head";

// Lazy up to the first closing tag: the header block holds no nested divs.
static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<div\s+class="dash-card-head"[^>]*>.*?</div>"#)
        .expect("valid header regex")
});

/// Remove the first card header block unless the header should be shown.
pub fn strip_header(html: &str, show_header: bool) -> String {
    if show_header {
        return html.to_string();
    }
    HEADER_RE.replacen(html, 1, "").into_owned()
}
