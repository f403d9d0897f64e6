/// Normalizes a raw article title before tokenization
///
/// Lowercases, strips digits, then strips everything that is not a word
/// character or whitespace. Pure and total; normalizing an already
/// normalized title is a no-op.
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_numeric() && (c.is_alphanumeric() || *c == '_' || c.is_whitespace()))
        .collect()
}
