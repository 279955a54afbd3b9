use crate::export::resolve::{derive_project_key, resolve_project_key, validate_project_key};

#[test]
fn test_derive_key_uppercases_and_strips() {
    let key = derive_project_key("My Cool Project").unwrap();
    assert_eq!(key, "MYCOOLPROJ");
}

#[test]
fn test_derive_key_is_deterministic() {
    let a = derive_project_key("Web App 2.0").unwrap();
    let b = derive_project_key("Web App 2.0").unwrap();
    assert_eq!(a, b);
    assert_eq!(a, "WEBAPP20");
}

#[test]
fn test_derive_key_drops_leading_digits() {
    let key = derive_project_key("2024 Roadmap").unwrap();
    assert_eq!(key, "ROADMAP");
}

#[test]
fn test_derive_key_bounded_length() {
    let key = derive_project_key("An Extremely Long Project Name Indeed").unwrap();
    assert!(key.len() <= 10);
    assert_eq!(key, "ANEXTREMEL");
}

#[test]
fn test_derive_key_rejects_no_letters() {
    assert!(derive_project_key("1234 !!!").is_err());
    assert!(derive_project_key("").is_err());
}

#[test]
fn test_validate_key_normalizes() {
    assert_eq!(validate_project_key("webapp").unwrap(), "WEBAPP");
    assert_eq!(validate_project_key("web-app").unwrap(), "WEBAPP");
}

#[test]
fn test_validate_key_rejects_garbage() {
    assert!(validate_project_key("---").is_err());
}

#[test]
fn test_resolve_prefers_supplied_key() {
    let key = resolve_project_key(true, Some("abc"), Some("Something Else")).unwrap();
    assert_eq!(key, "ABC");
}

#[test]
fn test_resolve_derives_for_new_project() {
    let key = resolve_project_key(true, None, Some("My Cool Project")).unwrap();
    assert_eq!(key, "MYCOOLPROJ");
}

#[test]
fn test_resolve_requires_key_for_existing_project() {
    assert!(resolve_project_key(false, None, Some("name")).is_err());
}

#[test]
fn test_resolve_requires_name_for_new_project_without_key() {
    assert!(resolve_project_key(true, None, None).is_err());
}
