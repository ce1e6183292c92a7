use indoc::indoc;
use yangkit_core::BuiltinType;

use crate::diagnostics::DiagnosticKind;
use crate::link::ResolvableKind;
use crate::schema::{NodeKind, NodeTag, SchemaTree, TypeSpec};
use crate::test_utils::{analyze, at, node_at};

fn module(body: &str) -> String {
    let body: String = body.lines().map(|line| format!("  {line}\n")).collect();
    format!("module demo {{\n  namespace \"urn:demo\";\n  prefix d;\n{body}}}\n")
}

fn error_of(body: &str) -> String {
    let analysis = analyze(&module(body));
    assert!(analysis.failed, "expected a failure");
    analysis
        .diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn enum_values(tree: &SchemaTree, path: &str) -> Vec<(String, i32)> {
    let NodeKind::Enumeration(data) = &at(tree, path).kind else {
        panic!("`{path}` is not an enumeration");
    };
    data.members.iter().map(|m| (m.name.clone(), m.value)).collect()
}

fn leaf_type<'t>(tree: &'t SchemaTree, path: &str) -> &'t TypeSpec {
    at(tree, path).kind.type_spec().expect("typed node")
}

#[test]
fn enum_values_continue_from_the_maximum() {
    let analysis = analyze(&module(indoc! {r#"
        leaf color {
          type enumeration {
            enum red;
            enum green { value 5; }
            enum blue;
          }
        }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
    assert_eq!(
        enum_values(&analysis.tree, "color/color_enum"),
        vec![
            ("red".to_string(), 0),
            ("green".to_string(), 5),
            ("blue".to_string(), 6),
        ]
    );
    let ty = leaf_type(&analysis.tree, "color");
    assert_eq!(ty.builtin, Some(BuiltinType::Enumeration));
    assert_eq!(ty.members, Some(node_at(&analysis.tree, "color/color_enum")));
}

#[test]
fn negative_enum_values() {
    let analysis = analyze(&module(indoc! {r#"
        leaf level {
          type enumeration {
            enum low { value -10; }
            enum mid;
          }
        }
    "#}));

    assert_eq!(
        enum_values(&analysis.tree, "level/level_enum"),
        vec![("low".to_string(), -10), ("mid".to_string(), -9)]
    );
}

#[test]
fn enum_value_already_used() {
    insta::assert_snapshot!(error_of(indoc! {r#"
        leaf color {
          type enumeration {
            enum red { value 1; }
            enum green { value 1; }
          }
        }
    "#}), @"error at 7:7: `enum green`: data model constraint violated: value 1 is already used by `red`");
}

#[test]
fn enum_value_below_the_maximum() {
    insta::assert_snapshot!(error_of(indoc! {r#"
        leaf color {
          type enumeration {
            enum red { value 5; }
            enum green { value 3; }
          }
        }
    "#}), @"error at 7:7: `enum green`: data model constraint violated: value 3 must be greater than the current maximum 5");
}

#[test]
fn enum_value_outside_32_bits() {
    let message = error_of(indoc! {r#"
        leaf color {
          type enumeration {
            enum red { value 2147483648; }
          }
        }
    "#});
    assert!(message.contains("outside the 32-bit signed range"), "{message}");
}

#[test]
fn bit_positions() {
    let analysis = analyze(&module(indoc! {r#"
        leaf flags {
          type bits {
            bit up;
            bit running { position 4; }
            bit lower-down;
          }
        }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
    let NodeKind::Bits(data) = &at(&analysis.tree, "flags/flags_bits").kind else {
        panic!("expected bits");
    };
    let positions: Vec<_> = data.members.iter().map(|m| (m.name.as_str(), m.position)).collect();
    assert_eq!(positions, vec![("up", 0), ("running", 4), ("lower-down", 5)]);
}

#[test]
fn bit_position_already_used() {
    let message = error_of(indoc! {r#"
        leaf flags {
          type bits {
            bit up { position 2; }
            bit down { position 2; }
          }
        }
    "#});
    assert!(message.ends_with("position 2 is already used by `up`"), "{message}");
}

#[test]
fn union_members_get_indexed_names() {
    let analysis = analyze(&module(indoc! {r#"
        leaf addr {
          type union {
            type string;
            type enumeration { enum none; }
            type bits { bit a; }
          }
        }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
    let tree = &analysis.tree;
    let NodeKind::Union(data) = &at(tree, "addr/addr_union").kind else {
        panic!("expected a union");
    };
    let names: Vec<_> = data.members.iter().map(|t| t.name.name.as_str()).collect();
    assert_eq!(names, vec!["string", "enumeration", "bits"]);
    assert_eq!(
        enum_values(tree, "addr/addr_union/addr_union_enum2"),
        vec![("none".to_string(), 0)]
    );
    assert_eq!(at(tree, "addr/addr_union/addr_union_bits3").tag(), NodeTag::Bits);
}

#[test]
fn typedef_members_are_named_after_the_typedef() {
    let analysis = analyze(&module(indoc! {r#"
        typedef speed {
          type enumeration { enum fast; enum slow; }
        }
    "#}));

    assert_eq!(
        enum_values(&analysis.tree, "speed/speed_enum"),
        vec![("fast".to_string(), 0), ("slow".to_string(), 1)]
    );
}

#[test]
fn typedef_named_like_a_builtin() {
    insta::assert_snapshot!(error_of(indoc! {r#"
        typedef string {
          type int8;
        }
    "#}), @"error at 4:3: `typedef string`: invalid argument: `string` is a built-in type name");
}

#[test]
fn typedef_derived_from_itself() {
    insta::assert_snapshot!(error_of(indoc! {r#"
        typedef loop {
          type d:loop;
        }
    "#}), @"error at 4:3: `typedef loop`: data model constraint violated: typedef `loop` is derived from itself");
}

#[test]
fn type_bodies_require_their_parts() {
    let cases = [
        ("type enumeration;", "`enum`"),
        ("type bits;", "`bit`"),
        ("type union;", "`type`"),
        ("type leafref;", "`path`"),
        ("type identityref;", "`base`"),
        ("type decimal64;", "`fraction-digits`"),
    ];
    for (ty, missing) in cases {
        let analysis = analyze(&module(&format!("leaf x {{ {ty} }}\n")));
        assert!(analysis.failed, "{ty}");
        assert_eq!(
            analysis.diagnostics.kinds(),
            vec![DiagnosticKind::MissingRequiredSubstatement],
            "{ty}"
        );
        let message = analysis.diagnostics.iter().next().unwrap().to_string();
        assert!(message.ends_with(missing), "{ty}: {message}");
    }
}

#[test]
fn range_outside_the_builtin_value_space() {
    insta::assert_snapshot!(error_of(indoc! {r#"
        leaf x {
          type int8 {
            range "0..200";
          }
        }
    "#}), @"error at 6:7: `range 0..200`: invalid argument: `0..200` is outside the value space of `int8`");
}

#[test]
fn range_with_symbolic_bounds() {
    let analysis = analyze(&module(indoc! {r#"
        leaf x {
          type uint16 { range "min..100 | 200..max"; }
        }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
    let ty = leaf_type(&analysis.tree, "x");
    let range = ty.value_range.as_ref().expect("range recorded");
    assert_eq!(range.intervals.to_string(), "min..100 | 200..max");
}

#[test]
fn decimal64_range_uses_fraction_digits() {
    let analysis = analyze(&module(indoc! {r#"
        leaf ratio {
          type decimal64 {
            fraction-digits 2;
            range "0.00..1.50";
          }
        }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
    assert_eq!(leaf_type(&analysis.tree, "ratio").fraction_digits, Some(2));
}

#[test]
fn length_only_on_string_like_types() {
    insta::assert_snapshot!(error_of(indoc! {r#"
        leaf x {
          type int8 {
            length "1";
          }
        }
    "#}), @"error at 6:7: `length 1`: statement is not allowed here: `length` is not allowed under `type int8`");
}

#[test]
fn restrictions_on_derived_types_wait_for_linking() {
    let analysis = analyze(&module(indoc! {r#"
        typedef percent { type uint8; }
        leaf p {
          type percent { range "0..100"; }
        }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
}

#[test]
fn fraction_digits_on_a_derived_type() {
    let message = error_of(indoc! {r#"
        typedef money { type decimal64 { fraction-digits 2; } }
        leaf price {
          type money { fraction-digits 4; }
        }
    "#});
    assert!(
        message.ends_with("`fraction-digits` is not allowed under `type money`"),
        "{message}"
    );
}

#[test]
fn string_restrictions() {
    let analysis = analyze(&module(indoc! {r#"
        leaf name {
          type string {
            length "1..8" {
              error-message "too long";
            }
            pattern "[a-z]+" {
              error-app-tag lowercase;
            }
            pattern "[^x]*";
          }
        }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
    let ty = leaf_type(&analysis.tree, "name");
    let length = ty.length.as_ref().expect("length recorded");
    assert_eq!(length.intervals.to_string(), "1..8");
    assert_eq!(length.error_message.as_deref(), Some("too long"));
    let patterns: Vec<_> = ty.patterns.iter().map(|p| p.regex.as_str()).collect();
    assert_eq!(patterns, vec!["[a-z]+", "[^x]*"]);
    assert_eq!(ty.patterns[0].error_app_tag.as_deref(), Some("lowercase"));
}

#[test]
fn references_are_queued_outside_typedefs() {
    let analysis = analyze(&module(indoc! {r#"
        identity proto;
        typedef port { type uint16; }
        typedef alias { type port; }
        leaf a { type port; }
        leaf b { type identityref { base proto; } }
        leaf c { type leafref { path "/d:a"; } }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
    let queued: Vec<_> = analysis
        .queue
        .iter()
        .map(|r| (r.kind.keyword(), r.reference.as_str()))
        .collect();
    assert_eq!(queued, vec![("type", "port"), ("base", "proto"), ("path", "/d:a")]);
    assert!(
        analysis
            .queue
            .iter()
            .all(|r| !matches!(r.kind, ResolvableKind::Base))
    );
}
