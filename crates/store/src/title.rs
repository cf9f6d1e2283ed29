use pagesmith_types::PagePath;

const UNTITLED: &str = "New Page";

/// The last path segment, or `"New Page"` for the home page.
pub fn page_title_from_path(path: &PagePath) -> String {
    path.segments()
        .last()
        .unwrap_or(UNTITLED)
        .to_string()
}

/// [`page_title_from_path`] with its first character upper-cased.
pub fn page_title(path: &PagePath) -> String {
    let title = page_title_from_path(path);
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => title,
    }
}
