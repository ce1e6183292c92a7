use yangkit_core::{IntervalKind, MaxElements, OrderedBy, Status};

use super::stmt::StmtCtx;
use super::validate;
use crate::compilation::source_map::{SourceId, SourceMap};
use crate::diagnostics::DiagnosticKind;
use crate::parser::parse;

/// Runs `f` on the single statement in `src`.
fn on<T>(src: &str, f: impl FnOnce(&StmtCtx) -> T) -> T {
    let map = SourceMap::inline(src);
    let parsed = parse(src, SourceId(0)).unwrap();
    let stmt = parsed.root.statements().next().expect("one statement");
    f(&StmtCtx::new(&stmt, SourceId(0), &map))
}

fn rejected(src: &str, f: impl FnOnce(&StmtCtx) -> Result<(), super::SchemaError>) -> String {
    on(src, |ctx| {
        let err = f(ctx).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::InvalidArgument);
        err.message()
    })
}

#[test]
fn missing_argument() {
    insta::assert_snapshot!(
        rejected("leaf;", |c| validate::identifier(c).map(drop)),
        @"`leaf`: invalid argument: `leaf` requires an argument"
    );
}

#[test]
fn no_argument() {
    assert!(on("input;", |c| validate::no_argument(c)).is_ok());
    insta::assert_snapshot!(
        rejected("input x;", validate::no_argument),
        @"`input x`: invalid argument: `input` takes no argument, found `x`"
    );
}

#[test]
fn identifiers() {
    assert_eq!(on("leaf if-name;", |c| validate::identifier(c).map(str::to_owned)), Ok("if-name".to_string()));
    insta::assert_snapshot!(
        rejected("leaf xml-thing;", |c| validate::identifier(c).map(drop)),
        @"`leaf xml-thing`: invalid argument: `xml-thing` is not a valid identifier"
    );
}

#[test]
fn identifier_refs() {
    let name = on("uses t:common;", |c| validate::identifier_ref(c)).unwrap();
    assert_eq!(name.prefix.as_deref(), Some("t"));
    assert_eq!(name.name, "common");
    assert!(on("uses a:b:c;", |c| validate::identifier_ref(c)).is_err());
}

#[test]
fn booleans() {
    assert_eq!(on("config false;", |c| validate::boolean(c)), Ok(false));
    insta::assert_snapshot!(
        rejected("config yes;", |c| validate::boolean(c).map(drop)),
        @"`config yes`: invalid argument: `yes` is not `true` or `false`"
    );
}

#[test]
fn max_elements() {
    assert_eq!(on("max-elements unbounded;", |c| validate::max_elements(c)), Ok(MaxElements::Unbounded));
    assert_eq!(on("max-elements 4;", |c| validate::max_elements(c)), Ok(MaxElements::Bounded(4)));
    assert!(on("max-elements 0;", |c| validate::max_elements(c)).is_err());
    assert!(on("max-elements 007;", |c| validate::max_elements(c)).is_err());
}

#[test]
fn fraction_digits_bounds() {
    assert_eq!(on("fraction-digits 18;", |c| validate::fraction_digits(c)), Ok(18));
    insta::assert_snapshot!(
        rejected("fraction-digits 19;", |c| validate::fraction_digits(c).map(drop)),
        @"`fraction-digits 19`: invalid argument: `19` is outside 1..18"
    );
    assert!(on("fraction-digits 0;", |c| validate::fraction_digits(c)).is_err());
}

#[test]
fn keywords_with_fixed_values() {
    assert_eq!(on("status obsolete;", |c| validate::status(c)), Ok(Status::Obsolete));
    assert_eq!(on("ordered-by user;", |c| validate::ordered_by(c)), Ok(OrderedBy::User));
    assert!(on("ordered-by random;", |c| validate::ordered_by(c)).is_err());
    assert_eq!(on("yang-version 1.1;", |c| validate::yang_version(c).map(str::to_owned)), Ok("1.1".to_string()));
    assert!(on("yang-version 2;", |c| validate::yang_version(c).is_err()));
}

#[test]
fn dates_and_uris() {
    assert!(on("revision 2024-02-29;", |c| validate::date(c).is_ok()));
    insta::assert_snapshot!(
        rejected("revision 2023-02-29;", |c| validate::date(c).map(drop)),
        @"`revision 2023-02-29`: invalid argument: `2023-02-29` is not a valid YYYY-MM-DD date"
    );
    assert!(on(r#"namespace "urn:ietf:params:xml:ns:yang:x";"#, |c| validate::uri(c).is_ok()));
    assert!(on(r#"namespace "no scheme";"#, |c| validate::uri(c).is_err()));
}

#[test]
fn integers() {
    assert_eq!(on("value -3;", |c| validate::integer(c)), Ok(-3));
    assert!(on("value -0;", |c| validate::integer(c)).is_err());
    assert_eq!(on("position 7;", |c| validate::non_negative(c)), Ok(7));
    assert!(on("position -1;", |c| validate::non_negative(c)).is_err());
}

#[test]
fn intervals() {
    let range = on(r#"range "1..10 | 20";"#, |c| validate::intervals(c, IntervalKind::Range)).unwrap();
    assert_eq!(range.to_string(), "1..10 | 20");

    let err = on(r#"range "10..1";"#, |c| validate::intervals(c, IntervalKind::Range)).unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::InvalidArgument);
    assert!(on(r#"length "-1..4";"#, |c| validate::intervals(c, IntervalKind::Length)).is_err());
}

#[test]
fn patterns() {
    assert!(on(r#"pattern "[a-z][a-z0-9-]*";"#, |c| validate::pattern(c).is_ok()));
    let message = rejected(r#"pattern "[a-";"#, |c| validate::pattern(c).map(drop));
    assert!(message.starts_with("`pattern [a-`: invalid argument: invalid regular expression:"), "{message}");
}

#[test]
fn key_lists() {
    assert_eq!(
        on(r#"key "name  t:unit";"#, |c| validate::key_list(c)),
        Ok(vec!["name".to_string(), "unit".to_string()])
    );
    insta::assert_snapshot!(
        rejected(r#"key "a b a";"#, |c| validate::key_list(c).map(drop)),
        @"`key a b a`: invalid argument: key `a` is listed twice"
    );
    insta::assert_snapshot!(
        rejected(r#"key "";"#, |c| validate::key_list(c).map(drop)),
        @"`key `: invalid argument: empty key list"
    );
}

#[test]
fn unique_lists() {
    assert_eq!(
        on(r#"unique "ip port";"#, |c| validate::unique_list(c)),
        Ok(vec!["ip".to_string(), "port".to_string()])
    );
    assert!(on(r#"unique "/abs";"#, |c| validate::unique_list(c)).is_err());
}

#[test]
fn schema_node_ids() {
    assert!(on(r#"augment "/d:system";"#, |c| validate::schema_node_id(c, true)).is_ok());
    insta::assert_snapshot!(
        rejected(r#"refine "/d:system";"#, |c| validate::schema_node_id(c, false).map(drop)),
        @"`refine /d:system`: invalid argument: `/d:system` must be an descendant schema node identifier"
    );
}

#[test]
fn leafref_paths() {
    let path = on(r#"path "../name";"#, |c| validate::leafref_path(c)).unwrap();
    assert_eq!(path.up, 1);
    assert!(on(r#"path "name";"#, |c| validate::leafref_path(c)).is_err());
}

#[test]
fn enum_names() {
    assert_eq!(on(r#"enum "two words";"#, |c| validate::enum_name(c).map(str::to_owned)), Ok("two words".to_string()));
    assert!(on(r#"enum " padded";"#, |c| validate::enum_name(c).is_err()));
    assert!(on(r#"enum "";"#, |c| validate::enum_name(c).is_err()));
}
