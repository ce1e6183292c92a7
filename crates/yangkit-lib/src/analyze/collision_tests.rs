use indoc::indoc;

use super::collision::Category;
use crate::diagnostics::DiagnosticKind;
use crate::schema::NodeTag;
use crate::test_utils::analyze;

fn first_error(src: &str) -> String {
    let analysis = analyze(src);
    assert!(analysis.failed, "expected a failure");
    analysis
        .diagnostics
        .iter()
        .next()
        .map(|d| d.to_string())
        .unwrap_or_default()
}

#[test]
fn categories() {
    assert_eq!(Category::of(NodeTag::Leaf, NodeTag::Container), Some(Category::DataTree));
    assert_eq!(Category::of(NodeTag::Leaf, NodeTag::Choice), Some(Category::Case));
    assert_eq!(Category::of(NodeTag::Case, NodeTag::Choice), Some(Category::Case));
    assert_eq!(Category::of(NodeTag::Rpc, NodeTag::Module), Some(Category::DataTree));
    assert_eq!(Category::of(NodeTag::Grouping, NodeTag::List), Some(Category::Grouping));
    assert_eq!(Category::of(NodeTag::Uses, NodeTag::Container), None);
    assert_eq!(Category::of(NodeTag::Enumeration, NodeTag::Leaf), None);
}

#[test]
fn duplicate_leaf_points_at_first_definition() {
    let message = first_error(indoc! {r#"
        module demo {
          namespace "urn:demo";
          prefix d;
          leaf a { type string; }
          leaf a { type int8; }
        }
    "#});

    assert!(
        message.starts_with("error at 5:3: `leaf a`: `a` is already defined"),
        "{message}"
    );
    assert!(message.contains("first defined here at 4:3"), "{message}");
}

#[test]
fn data_nodes_of_different_kinds_collide() {
    let message = first_error(indoc! {r#"
        module demo {
          namespace "urn:demo";
          prefix d;
          container c { leaf x { type string; } }
          list x { key k; leaf k { type string; } }
          rpc c;
        }
    "#});

    assert!(message.starts_with("error at 6:3: `rpc c`"), "{message}");
}

#[test]
fn separate_namespaces_do_not_collide() {
    let analysis = analyze(indoc! {r#"
        module demo {
          namespace "urn:demo";
          prefix d;
          typedef a { type string; }
          grouping a { leaf a { type a; } }
          identity a;
          feature a;
          container a { uses a; }
        }
    "#});

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
}

#[test]
fn case_and_shorthand_share_a_namespace() {
    let message = first_error(indoc! {r#"
        module demo {
          namespace "urn:demo";
          prefix d;
          container c {
            choice how {
              case fast { leaf speed { type uint8; } }
              container fast;
            }
          }
        }
    "#});

    assert!(
        message.starts_with("error at 7:7: `container fast`: `fast` is already defined"),
        "{message}"
    );
}

#[test]
fn same_name_in_different_parents() {
    let analysis = analyze(indoc! {r#"
        module demo {
          namespace "urn:demo";
          prefix d;
          container a { leaf name { type string; } }
          container b { leaf name { type string; } }
        }
    "#});

    assert!(!analysis.failed);
}

#[test]
fn duplicate_enum_member() {
    let analysis = analyze(indoc! {r#"
        module demo {
          namespace "urn:demo";
          prefix d;
          leaf color {
            type enumeration {
              enum red;
              enum red;
            }
          }
        }
    "#});

    assert_eq!(analysis.diagnostics.kinds(), vec![DiagnosticKind::DuplicateIdentifier]);
    let message = analysis.diagnostics.iter().next().unwrap().to_string();
    assert_eq!(message, "error at 7:7: `enum red`: `red` is already defined");
}

#[test]
fn duplicate_typedef_in_nested_scope_is_allowed() {
    let analysis = analyze(indoc! {r#"
        module demo {
          namespace "urn:demo";
          prefix d;
          typedef t { type string; }
          container c {
            typedef t { type int8; }
            leaf x { type t; }
          }
        }
    "#});

    assert!(!analysis.failed);
}
