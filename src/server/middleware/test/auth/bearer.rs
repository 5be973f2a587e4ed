use super::*;

/// Tests the token is taken from a well-formed bearer header.
#[test]
fn extracts_bearer_token() {
    let headers = headers_with("Bearer abc.def.ghi");

    assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
}

/// Tests missing, empty and non-bearer headers are all treated as missing.
#[test]
fn rejects_missing_or_malformed_header() {
    assert!(matches!(
        bearer_token(&HeaderMap::new()),
        Err(AuthError::MissingToken)
    ));
    assert!(matches!(
        bearer_token(&headers_with("Bearer ")),
        Err(AuthError::MissingToken)
    ));
    assert!(matches!(
        bearer_token(&headers_with("Basic dXNlcjpwYXNz")),
        Err(AuthError::MissingToken)
    ));
}
