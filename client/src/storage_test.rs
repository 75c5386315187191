use super::*;

#[test]
fn quota_error_names() {
    assert!(is_quota_error("QuotaExceededError"));
    assert!(is_quota_error("NS_ERROR_DOM_QUOTA_REACHED"));
    assert!(!is_quota_error("SecurityError"));
    assert!(!is_quota_error(""));
}
