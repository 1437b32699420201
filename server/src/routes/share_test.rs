use super::*;

#[test]
fn plain_svg_is_accepted() {
    assert!(looks_like_svg(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#));
    assert!(looks_like_svg("  \n<svg>"));
}

#[test]
fn xml_declaration_is_allowed() {
    assert!(looks_like_svg(r#"<?xml version="1.0" encoding="utf-8"?>\n<svg/>"#));
}

#[test]
fn non_svg_is_rejected() {
    assert!(!looks_like_svg(""));
    assert!(!looks_like_svg("<html><svg/></html>"));
    assert!(!looks_like_svg("<?xml version=\"1.0\"?><html/>"));
    assert!(!looks_like_svg("<?xml version=\"1.0\" <svg/>"));
}

#[test]
fn store_error_to_status_maps_invalid_id() {
    assert_eq!(store_error_to_status(StoreError::InvalidId("x".into())), StatusCode::BAD_REQUEST);
}

#[test]
fn store_error_to_status_maps_io_to_500() {
    let err = StoreError::Io(std::io::Error::other("disk full"));
    assert_eq!(store_error_to_status(err), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(store_error_to_status(StoreError::IdsExhausted), StatusCode::INTERNAL_SERVER_ERROR);
}
