/// Wrap a tag in `[[...]]` when it contains a space or a bracket.
pub fn quote_tag(tag: &str) -> String {
    if tag.contains([' ', '[', ']']) {
        format!("[[{tag}]]")
    } else {
        tag.to_string()
    }
}

/// Render the `tags` field: quoted tags joined by single spaces.
///
/// Duplicates are kept as given.
pub fn build_tags_field<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|tag| quote_tag(tag.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split repeatable comma-separated values into trimmed, non-empty parts.
pub fn split_csv<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.as_ref().split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
