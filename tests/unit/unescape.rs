//! Queries arriving from the site header: unescape, then normalize.

use petal::{query_terms, unescape_query};

#[test]
fn test_escaped_quotes_and_dots_normalize_away() {
    let raw = r"Mme\x2e \'Emile\'";
    assert_eq!(unescape_query(raw), "Mme. 'Emile'");
    assert_eq!(query_terms(&unescape_query(raw)), vec!["MME", "EMILE"]);
}

#[test]
fn test_double_quotes_and_backslash() {
    assert_eq!(unescape_query(r#"\"Red Charm\""#), r#""Red Charm""#);
    assert_eq!(unescape_query(r"a\\b"), r"a\b");
}

#[test]
fn test_malformed_escapes_become_separators() {
    assert_eq!(query_terms(&unescape_query(r"coral\qcharm")), vec!["CORAL", "CHARM"]);
    assert_eq!(query_terms(&unescape_query(r"coral\")), vec!["CORAL"]);
    assert_eq!(query_terms(&unescape_query(r"\xZZ")), vec!["ZZ"]);
    assert_eq!(query_terms(&unescape_query(r"red\x20charm")), vec!["RED", "CHARM"]);
}
