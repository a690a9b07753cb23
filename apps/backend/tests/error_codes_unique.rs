//! Registry-wide invariants on error codes: distinct wire strings, all
//! SCREAMING_SNAKE_CASE.

use std::collections::HashSet;

use backend::errors::ErrorCode;

#[test]
fn error_code_strings_are_unique() {
    let codes: Vec<&str> = ErrorCode::ALL.iter().map(|code| code.as_str()).collect();
    let distinct: HashSet<&str> = codes.iter().copied().collect();
    assert_eq!(codes.len(), distinct.len(), "duplicate error code strings");
}

#[test]
fn error_code_strings_are_screaming_snake_case() {
    for code in ErrorCode::ALL {
        let s = code.as_str();
        assert!(!s.is_empty());
        assert!(
            s.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'),
            "unexpected character in error code '{s}'"
        );
        assert!(!s.starts_with('_') && !s.ends_with('_'));
    }
}
