use indoc::indoc;

use super::cardinality::{Card, check, check_one, exclusive, rules};
use super::keyword::Keyword;
use super::stmt::StmtCtx;
use crate::compilation::source_map::{SourceId, SourceMap};
use crate::diagnostics::DiagnosticKind;
use crate::parser::parse;

fn check_src(src: &str) -> Result<(), String> {
    let map = SourceMap::inline(src);
    let parsed = parse(src, SourceId(0)).unwrap();
    let stmt = parsed.root.statements().next().expect("one statement");
    let ctx = StmtCtx::new(&stmt, SourceId(0), &map);
    check(&ctx).map_err(|e| e.to_string())
}

#[test]
fn module_requires_namespace_and_prefix() {
    insta::assert_snapshot!(
        check_src("module m { prefix m; }").unwrap_err(),
        @"1:1: `module m`: missing required sub-statement: `namespace`"
    );
    insta::assert_snapshot!(
        check_src(r#"module m { namespace "urn:m"; }"#).unwrap_err(),
        @"1:1: `module m`: missing required sub-statement: `prefix`"
    );
}

#[test]
fn second_max_one_reported_at_the_duplicate() {
    let src = indoc! {r#"
        leaf x {
          type string;
          mandatory true;
          mandatory false;
        }
    "#};
    insta::assert_snapshot!(
        check_src(src).unwrap_err(),
        @"4:3: `mandatory false`: sub-statement cardinality violated: `mandatory` may appear at most once under `leaf`"
    );
}

#[test]
fn meta_statements_are_bounded_on_definitions() {
    let src = indoc! {r#"
        container c {
          description "one";
          description "two";
        }
    "#};
    let err = check_src(src).unwrap_err();
    assert!(err.contains("`description` may appear at most once under `container`"), "{err}");
}

#[test]
fn leaf_requires_type() {
    assert_eq!(
        check_src("leaf x { units ms; }").unwrap_err(),
        "1:1: `leaf x`: missing required sub-statement: `type`"
    );
}

#[test]
fn unbounded_statements_pass() {
    let src = indoc! {r#"
        container c {
          must "a";
          must "b";
          leaf x { type string; }
          leaf y { type string; }
        }
    "#};
    assert_eq!(check_src(src), Ok(()));
}

#[test]
fn exclusive_families_in_type() {
    let err = check_src(r#"type string { length "1..5"; pattern "[a-z]+"; range "1..2"; }"#)
        .unwrap_err();
    assert!(
        err.contains("`range` and `length` cannot both appear under `type`"),
        "{err}"
    );

    assert_eq!(
        check_src(r#"type decimal64 { fraction-digits 2; range "0..1"; }"#),
        Ok(())
    );
    assert_eq!(
        check_src(r#"type string { length "1..5"; pattern "a"; pattern "b"; }"#),
        Ok(())
    );
}

#[test]
fn check_one_bounds() {
    let src = "type enumeration;";
    let map = SourceMap::inline(src);
    let parsed = parse(src, SourceId(0)).unwrap();
    let stmt = parsed.root.statements().next().unwrap();
    let ctx = StmtCtx::new(&stmt, SourceId(0), &map);

    let err = check_one(&ctx, Keyword::Enum, Card::NonZero).unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::MissingRequiredSubstatement);
    assert_eq!(check_one(&ctx, Keyword::Enum, Card::MaxOne), Ok(()));
}

#[test]
fn tables() {
    assert!(rules(Keyword::Import).contains(&(Keyword::Prefix, Card::One)));
    assert!(rules(Keyword::Feature).is_empty());
    assert!(exclusive(Keyword::Leaf).is_empty());
    assert_eq!(exclusive(Keyword::Type).len(), 7);
}
