use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Unsplash "random photo" API URLs, as generation sources write them into
/// image fields. Matching stops at the closing quote of the JSON string.
pub(crate) static IMAGE_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https://api\.unsplash\.com/photos/random\?[^"']+"#).expect("image placeholder pattern")
});

/// Distinct placeholder image URLs in `text`, in order of first appearance.
pub fn extract_placeholder_urls(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    IMAGE_PLACEHOLDER
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|url| seen.insert(*url))
        .map(str::to_string)
        .collect()
}
