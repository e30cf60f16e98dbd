/// Derives the lookup key for a company name. Both exports are keyed
/// this way before joining, so names only have to agree up to case and
/// surrounding whitespace. Interior spacing is preserved.
pub(crate) fn normalize_key(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.trim().to_lowercase()
}

/// Renders a normalized key back into a display name by upper-casing
/// the first character of each whitespace-separated word.
pub(crate) fn title_case_name(key: &str) -> String {
    let mut rendered = String::with_capacity(key.len());
    let mut at_word_start = true;
    for ch in key.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            rendered.push(ch);
        } else if at_word_start {
            rendered.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            rendered.push(ch);
        }
    }
    rendered
}
