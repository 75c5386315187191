//! Keyboard shortcut filtering.

#[cfg(test)]
#[path = "keys_test.rs"]
mod keys_test;

/// Whether keystrokes aimed at an element with this tag belong to the element.
#[must_use]
pub fn is_text_entry(tag_name: Option<&str>) -> bool {
    tag_name.is_some_and(|tag| tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea"))
}

/// Whether the annotator claims `key` (and suppresses the browser default).
#[must_use]
pub fn is_annotation_shortcut(key: &str) -> bool {
    matches!(key, "d" | "D" | "Delete" | "Backspace")
}
