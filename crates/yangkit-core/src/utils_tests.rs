use crate::utils::{
    is_date, is_identifier, is_uri, parse_boolean, parse_identifier_ref, parse_integer,
    parse_non_negative, split_identifiers,
};

#[test]
fn identifiers() {
    assert!(is_identifier("interfaces"));
    assert!(is_identifier("_private"));
    assert!(is_identifier("a.b-c_d9"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("-lead"));
    assert!(!is_identifier("9lives"));
    assert!(!is_identifier("has space"));
    assert!(!is_identifier("xml-data"));
    assert!(!is_identifier("XML"));
    assert!(is_identifier("xm"));
}

#[test]
fn identifiers_reject_non_ascii() {
    assert!(!is_identifier("nämlich"));
    assert!(!is_identifier("xé"));
}

#[test]
fn identifier_refs() {
    assert_eq!(parse_identifier_ref("t:name"), Some((Some("t"), "name")));
    assert_eq!(parse_identifier_ref("name"), Some((None, "name")));
    assert_eq!(parse_identifier_ref(":name"), None);
    assert_eq!(parse_identifier_ref("t:"), None);
    assert_eq!(parse_identifier_ref("a:b:c"), None);
}

#[test]
fn booleans() {
    assert_eq!(parse_boolean("true"), Some(true));
    assert_eq!(parse_boolean("false"), Some(false));
    assert_eq!(parse_boolean("True"), None);
    assert_eq!(parse_boolean("1"), None);
}

#[test]
fn non_negative_integers() {
    assert_eq!(parse_non_negative("0"), Some(0));
    assert_eq!(parse_non_negative("42"), Some(42));
    assert_eq!(parse_non_negative("007"), None);
    assert_eq!(parse_non_negative("-1"), None);
    assert_eq!(parse_non_negative("+1"), None);
    assert_eq!(parse_non_negative(""), None);
    assert_eq!(parse_non_negative("18446744073709551616"), None);
}

#[test]
fn integers() {
    assert_eq!(parse_integer("-12"), Some(-12));
    assert_eq!(parse_integer("0"), Some(0));
    assert_eq!(parse_integer("-0"), None);
    assert_eq!(parse_integer("-"), None);
    assert_eq!(
        parse_integer("18446744073709551615"),
        Some(u64::MAX as i128)
    );
}

#[test]
fn dates() {
    assert!(is_date("2015-01-31"));
    assert!(is_date("2000-02-29"));
    assert!(!is_date("1900-02-29"));
    assert!(!is_date("2015-13-01"));
    assert!(!is_date("2015-04-31"));
    assert!(!is_date("2015-00-10"));
    assert!(!is_date("2015/01/01"));
    assert!(!is_date("15-01-01"));
    assert!(!is_date("2015-01-1x"));
}

#[test]
fn uris() {
    assert!(is_uri("urn:ietf:params:xml:ns:yang:ietf-interfaces"));
    assert!(is_uri("http://example.com/ns"));
    assert!(!is_uri("no-scheme"));
    assert!(!is_uri("urn:"));
    assert!(!is_uri("1urn:x"));
    assert!(!is_uri("urn:a b"));
}

#[test]
fn identifier_lists() {
    assert_eq!(split_identifiers("  name\ttype  "), vec!["name", "type"]);
    assert!(split_identifiers("   ").is_empty());
}
