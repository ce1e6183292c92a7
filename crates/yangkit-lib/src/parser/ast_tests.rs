use indoc::indoc;

use super::ast::{Root, Statement, unquote_double};
use super::parse;
use crate::compilation::source_map::SourceId;

fn root(source: &str) -> Root {
    let res = parse(source, SourceId::default()).unwrap();
    assert!(res.diagnostics.is_empty(), "{:?}", res.diagnostics.kinds());
    res.root
}

fn first(source: &str) -> Statement {
    root(source).statements().next().unwrap()
}

fn argument(source: &str) -> String {
    first(source).argument().unwrap().value()
}

#[test]
fn keyword_and_argument() {
    let stmt = first("leaf name;");
    assert_eq!(stmt.keyword().unwrap().text(), "leaf");
    assert_eq!(stmt.argument().unwrap().value(), "name");
    assert!(stmt.block().is_none());
    assert_eq!(stmt.substatements().count(), 0);
}

#[test]
fn substatements_in_order() {
    let stmt = first("container c { leaf a; leaf-list b; list c; }");
    let keywords: Vec<String> = stmt
        .substatements()
        .map(|s| s.keyword().unwrap().text().to_string())
        .collect();
    assert_eq!(keywords, ["leaf", "leaf-list", "list"]);
}

#[test]
fn single_quotes_are_verbatim() {
    assert_eq!(argument(r"pattern '\d+\n';"), r"\d+\n");
}

#[test]
fn double_quote_escapes() {
    assert_eq!(argument(r#"description "a\tb\n\"c\" \\ \d";"#), "a\tb\n\"c\" \\ \\d");
}

#[test]
fn concatenation() {
    assert_eq!(argument(r#"pattern "ab" + 'c' + "d";"#), "abcd");
}

#[test]
fn multiline_indentation_is_trimmed() {
    let source = indoc! {r#"
    description "first line
                 second line
                   indented";
    "#};
    assert_eq!(argument(source), "first line\nsecond line\n  indented");
}

#[test]
fn indentation_trim_inside_block() {
    let source = indoc! {r#"
    container c {
      description
        "one
         two";
    }
    "#};
    let container = first(source);
    let description = container.substatements().next().unwrap();
    assert_eq!(description.argument().unwrap().value(), "one\ntwo");
}

#[test]
fn unquote_keeps_short_indentation() {
    assert_eq!(unquote_double("a\n  b", 10), "a\nb");
    assert_eq!(unquote_double("a\n\tb", 4), "a\n\tb");
    assert_eq!(unquote_double("a  \nb", 0), "a\nb");
}

#[test]
fn head_range_excludes_block() {
    let source = "leaf abc { type string; }";
    let stmt = first(source);
    let range = stmt.head_range();
    assert_eq!(&source[range], "leaf abc");
}

#[test]
fn quoted_flag() {
    assert!(first("description \"x\";").argument().unwrap().is_quoted());
    assert!(!first("leaf x;").argument().unwrap().is_quoted());
}
