use indoc::indoc;
use yangkit_core::{MaxElements, OrderedBy, Status};

use crate::diagnostics::DiagnosticKind;
use crate::schema::{Config, NodeKind, NodeTag};
use crate::test_utils::{analyze, at};

/// Wraps `body` in a module header, indented one level.
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

fn config_of(kind: &NodeKind) -> Config {
    kind.config().expect("config-bearing node")
}

#[test]
fn config_is_inherited_from_the_nearest_holder() {
    let analysis = analyze(&module(indoc! {r#"
          container state {
            config false;
            leaf uptime { type uint32; }
          }
          container settings {
            leaf name { type string; }
          }
    "#}));

    assert!(!analysis.failed);
    let tree = &analysis.tree;
    assert_eq!(config_of(&at(tree, "state").kind), Config { value: false, explicit: true });
    assert_eq!(config_of(&at(tree, "state/uptime").kind), Config::inherited(false));
    assert_eq!(config_of(&at(tree, "settings").kind), Config::inherited(true));
    assert_eq!(config_of(&at(tree, "settings/name").kind), Config::inherited(true));
}

#[test]
fn config_true_under_config_false() {
    insta::assert_snapshot!(error_of(indoc! {r#"
          container state {
            config false;
            leaf counter {
              config true;
              type uint32;
            }
          }
    "#}), @"error at 7:7: `config true`: data model constraint violated: `config true` under a `config false` node");
}

#[test]
fn leaf_attributes_are_recorded() {
    let analysis = analyze(&module(indoc! {r#"
          leaf mtu {
            type uint16;
            units octets;
            default 1500;
            status deprecated;
            description "Maximum transfer unit.";
            when "../enabled = 'true'";
            must ". >= 68" {
              error-message "too small";
            }
          }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
    let leaf = at(&analysis.tree, "mtu");
    let NodeKind::Leaf(data) = &leaf.kind else {
        panic!("expected a leaf");
    };
    assert_eq!(data.units.as_deref(), Some("octets"));
    assert_eq!(data.default.as_deref(), Some("1500"));
    assert!(!data.mandatory);
    assert_eq!(data.ty.as_ref().map(|t| t.name.name.as_str()), Some("uint16"));
    assert_eq!(leaf.meta.status, Status::Deprecated);
    assert_eq!(leaf.meta.description.as_deref(), Some("Maximum transfer unit."));
    assert_eq!(leaf.meta.when.as_ref().map(|w| w.condition.as_str()), Some("../enabled = 'true'"));
    assert_eq!(leaf.meta.musts.len(), 1);
    assert_eq!(leaf.meta.musts[0].error_message.as_deref(), Some("too small"));
}

#[test]
fn leaf_default_conflicts_with_mandatory() {
    insta::assert_snapshot!(error_of(indoc! {r#"
          leaf mtu {
            type uint16;
            default 1500;
            mandatory true;
          }
    "#}), @"error at 4:3: `leaf mtu`: data model constraint violated: a leaf with a `default` cannot be `mandatory true`");
}

#[test]
fn presence_only_on_containers() {
    insta::assert_snapshot!(error_of(indoc! {r#"
          leaf enabled {
            type boolean;
            presence "on";
          }
    "#}), @"error at 6:5: `presence on`: statement is not allowed here: `presence` is not allowed under `leaf`");
}

#[test]
fn presence_container() {
    let analysis = analyze(&module("container tls { presence \"enables TLS\"; }\n"));

    let NodeKind::Container(data) = &at(&analysis.tree, "tls").kind else {
        panic!("expected a container");
    };
    assert_eq!(data.presence.as_deref(), Some("enables TLS"));
}

#[test]
fn list_properties() {
    let analysis = analyze(&module(indoc! {r#"
          list server {
            key "name";
            unique "ip port";
            min-elements 1;
            max-elements 8;
            ordered-by user;
            leaf name { type string; }
            leaf ip { type string; }
            leaf port { type uint16; }
          }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
    let NodeKind::List(data) = &at(&analysis.tree, "server").kind else {
        panic!("expected a list");
    };
    assert_eq!(data.keys, vec!["name".to_string()]);
    assert_eq!(data.uniques, vec![vec!["ip".to_string(), "port".to_string()]]);
    assert_eq!(data.min_elements, 1);
    assert_eq!(data.max_elements, MaxElements::Bounded(8));
    assert_eq!(data.ordered_by, OrderedBy::User);
}

#[test]
fn list_without_data_nodes() {
    insta::assert_snapshot!(error_of(indoc! {r#"
          list servers {
            config false;
          }
    "#}), @"error at 4:3: `list servers`: data model constraint violated: a list must define at least one data node");
}

#[test]
fn min_elements_exceeding_max() {
    insta::assert_snapshot!(error_of(indoc! {r#"
          leaf-list tags {
            type string;
            min-elements 5;
            max-elements 2;
          }
    "#}), @"error at 4:3: `leaf-list tags`: data model constraint violated: min-elements 5 exceeds max-elements 2");
}

#[test]
fn configuration_list_needs_a_key() {
    insta::assert_snapshot!(error_of(indoc! {r#"
          list servers {
            leaf name { type string; }
          }
    "#}), @"error at 4:3: `list servers`: data model constraint violated: a configuration list must declare a `key`");
}

#[test]
fn keyless_lists_outside_the_datastore() {
    let analysis = analyze(&module(indoc! {r#"
          container stats {
            config false;
            list sample { leaf at { type string; } }
          }
          grouping entries {
            list entry { leaf v { type string; } }
          }
          rpc query {
            output {
              list row { leaf v { type string; } }
            }
          }
          notification fired {
            list detail { leaf v { type string; } }
          }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
}

#[test]
fn key_must_name_a_child_leaf() {
    insta::assert_snapshot!(error_of(indoc! {r#"
          list servers {
            key "name";
            leaf address { type string; }
          }
    "#}), @"error at 5:5: `key name`: data model constraint violated: key `name` is not a leaf of list `servers`");
}

#[test]
fn key_check_waits_for_uses() {
    let analysis = analyze(&module(indoc! {r#"
          grouping named {
            leaf name { type string; }
          }
          list servers {
            key "name";
            uses named;
          }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
    assert_eq!(analysis.deferred_keys.len(), 1);
    assert_eq!(analysis.tree.node(analysis.deferred_keys[0]).name, "servers");
}

#[test]
fn choice_with_default_case() {
    let analysis = analyze(&module(indoc! {r#"
          container transport {
            choice protocol {
              default tcp;
              case udp { leaf port { type uint16; } }
              leaf tcp { type empty; }
            }
          }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
    let choice = at(&analysis.tree, "transport/protocol");
    let NodeKind::Choice(data) = &choice.kind else {
        panic!("expected a choice");
    };
    assert_eq!(data.default.as_deref(), Some("tcp"));
    assert_eq!(at(&analysis.tree, "transport/protocol/udp").tag(), NodeTag::Case);
    assert_eq!(at(&analysis.tree, "transport/protocol/tcp").tag(), NodeTag::Leaf);
}

#[test]
fn choice_default_must_exist() {
    insta::assert_snapshot!(error_of(indoc! {r#"
          choice protocol {
            default sctp;
            case udp { leaf port { type uint16; } }
          }
    "#}), @"error at 4:3: `choice protocol`: data model constraint violated: default case `sctp` does not exist");
}

#[test]
fn choice_default_conflicts_with_mandatory() {
    let message = error_of(indoc! {r#"
          choice protocol {
            default udp;
            mandatory true;
            case udp { leaf port { type uint16; } }
          }
    "#});
    assert!(message.ends_with("a choice with a `default` cannot be `mandatory true`"), "{message}");
}

#[test]
fn case_only_under_choice() {
    insta::assert_snapshot!(error_of(indoc! {r#"
          container c {
            case a { leaf x { type string; } }
          }
    "#}), @"error at 5:5: `case a`: statement is not allowed here: `case` is not allowed under `container`");
}

#[test]
fn uses_records_refinements() {
    let analysis = analyze(&module(indoc! {r#"
          grouping endpoint {
            leaf port { type uint16; }
          }
          container server {
            uses endpoint {
              refine port {
                default 830;
                must "current() > 0";
              }
            }
          }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
    let uses = at(&analysis.tree, "server/endpoint");
    let NodeKind::Uses(data) = &uses.kind else {
        panic!("expected uses");
    };
    assert_eq!(data.grouping.name, "endpoint");
    assert_eq!(data.refines.len(), 1);
    assert_eq!(data.refines[0].target, "port");
    assert_eq!(data.refines[0].default.as_deref(), Some("830"));
    assert_eq!(data.refines[0].musts.len(), 1);
    // bound within the file
    assert!(data.target.is_some());
}

#[test]
fn refine_bounds() {
    let message = error_of(indoc! {r#"
          grouping g {
            leaf-list items { type string; }
          }
          container c {
            uses g {
              refine items {
                min-elements 3;
                max-elements 1;
              }
            }
          }
    "#});
    assert!(message.ends_with("min-elements 3 exceeds max-elements 1"), "{message}");
}

#[test]
fn top_level_augment_needs_an_absolute_path() {
    insta::assert_snapshot!(error_of(indoc! {r#"
          augment "system" {
            leaf extra { type string; }
          }
    "#}), @"error at 4:3: `augment system`: invalid argument: `system` must be an absolute schema node identifier");
}

#[test]
fn augment_must_add_data() {
    insta::assert_snapshot!(error_of(indoc! {r#"
          container system;
          augment "/d:system" {
            description "nothing";
          }
    "#}), @"error at 5:3: `augment /d:system`: data model constraint violated: an augment must add at least one data node");
}

#[test]
fn rpc_io_nodes() {
    let analysis = analyze(&module(indoc! {r#"
          rpc reset {
            input { leaf delay { type uint8; } }
            output { leaf done { type boolean; } }
          }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
    assert_eq!(at(&analysis.tree, "reset/input").tag(), NodeTag::Input);
    assert_eq!(at(&analysis.tree, "reset/output/done").tag(), NodeTag::Leaf);
}

#[test]
fn rpc_only_at_the_top() {
    let analysis = analyze(&module("container c { rpc r; }\n"));

    assert!(analysis.failed);
    assert_eq!(analysis.diagnostics.kinds(), vec![DiagnosticKind::InvalidHolder]);
}

#[test]
fn must_error_info_on_a_container() {
    let analysis = analyze(&module(indoc! {r#"
          container limits {
            must "max > min" {
              error-app-tag bad-limits;
              description "ordered";
            }
            leaf min { type uint8; }
            leaf max { type uint8; }
          }
    "#}));

    assert!(!analysis.failed, "{:?}", analysis.diagnostics.kinds());
    let must = &at(&analysis.tree, "limits").meta.musts[0];
    assert_eq!(must.condition, "max > min");
    assert_eq!(must.error_app_tag.as_deref(), Some("bad-limits"));
    assert_eq!(must.description.as_deref(), Some("ordered"));
}

#[test]
fn import_prefix_clash() {
    insta::assert_snapshot!(error_of(indoc! {r#"
          import other { prefix d; }
    "#}), @"error at 4:3: `import other`: `prefix d` is already defined");
}
