use super::*;

#[test]
fn inputs_and_textareas_are_text_entry() {
    assert!(is_text_entry(Some("INPUT")));
    assert!(is_text_entry(Some("textarea")));
    assert!(!is_text_entry(Some("DIV")));
    assert!(!is_text_entry(None));
}

#[test]
fn shortcut_keys() {
    for key in ["d", "D", "Delete", "Backspace"] {
        assert!(is_annotation_shortcut(key), "{key}");
    }
    assert!(!is_annotation_shortcut("s"));
    assert!(!is_annotation_shortcut("ArrowLeft"));
}
