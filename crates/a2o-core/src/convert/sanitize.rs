use once_cell::sync::Lazy;
use regex::Regex;

static TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

/// Remove every inline markup tag (`<p>`, `</p>`, ...) from the text,
/// keeping the enclosed content verbatim.
pub fn strip_tags(text: &str) -> String {
    TAGS.replace_all(text, "").into_owned()
}

/// `None` passes through untouched rather than becoming an empty string.
pub fn strip_tags_opt(text: Option<&str>) -> Option<String> {
    text.map(strip_tags)
}
