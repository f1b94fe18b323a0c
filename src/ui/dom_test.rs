use super::*;

#[test]
fn setters_on_missing_element_are_noops() {
    let doc = MemoryDocument::new();
    doc.set_text("nope", "hello");
    doc.set_display("nope", display::BLOCK);
    assert!(!doc.has_element("nope"));
    assert_eq!(doc.text("nope"), None);
}

#[test]
fn full_page_has_every_known_id() {
    let doc = MemoryDocument::full_page();
    for id in [ids::MESSAGE, ids::SIGNUP_FORM, ids::SIGNIN_FORM, ids::LOGO_IMAGE, ids::IMAGE_UPLOAD_LOADING] {
        assert!(doc.has_element(id), "{id}");
    }
    assert_eq!(doc.field_value(ids::SIGNUP_FORM, "confirmPassword"), Some(String::new()));
}

#[test]
fn field_values_round_through_set_field() {
    let doc = MemoryDocument::new().with_form("f", &[("email", "a@b.com")]);
    doc.set_field("f", "password", "pw");
    assert_eq!(doc.field_value("f", "email").as_deref(), Some("a@b.com"));
    assert_eq!(doc.field_value("f", "password").as_deref(), Some("pw"));
    assert_eq!(doc.field_value("f", "missing"), None);
    assert_eq!(doc.field_value("other", "email"), None);
}

#[test]
fn submit_disabled_tracks_form_state() {
    let doc = MemoryDocument::new().with_form("f", &[]);
    assert!(!doc.submit_disabled("f"));
    doc.set_submit_disabled("f", true);
    assert!(doc.submit_disabled("f"));
    doc.set_submit_disabled("f", false);
    assert!(!doc.submit_disabled("f"));
}
