//! Identifier sanitizer: display title → graph-safe identifier.

use std::sync::OnceLock;

use regex::Regex;

static NON_WORD: OnceLock<Regex> = OnceLock::new();

fn non_word() -> &'static Regex {
    NON_WORD.get_or_init(|| Regex::new(r"[^\w\s]").expect("static sanitizer regex"))
}

/// Strip leading whitespace, one bullet marker, and surrounding whitespace.
///
/// A `-` is always treated as a bullet. `*` and `+` only count when followed
/// by whitespace so emphasis like `*bold*` survives.
#[must_use]
pub fn clean_title(raw: &str) -> String {
    let rest = raw.trim_start();
    let rest = if let Some(after) = rest.strip_prefix('-') {
        after
    } else if let Some(after) = rest
        .strip_prefix(['*', '+'])
        .filter(|after| after.starts_with(char::is_whitespace))
    {
        after
    } else {
        rest
    };
    rest.trim().to_owned()
}

/// Replace every character that is neither a word character nor whitespace
/// with `_`, then every whitespace character with `_`.
#[must_use]
pub fn sanitize(title: &str) -> String {
    non_word()
        .replace_all(title, "_")
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Returns `(clean title, sanitized identifier)` for a raw outline line.
#[must_use]
pub fn create_node_label(raw: &str) -> (String, String) {
    let title = clean_title(raw);
    let identifier = sanitize(&title);
    (title, identifier)
}

#[cfg(test)]
#[path = "sanitize_test.rs"]
mod tests;
