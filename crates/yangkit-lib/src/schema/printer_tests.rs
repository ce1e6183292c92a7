use indoc::indoc;

use crate::test_utils::{compile, compile_files, only_unit};

#[test]
fn linked_tree() {
    let schema = compile(indoc! {r#"
        module demo {
          namespace "urn:demo";
          prefix d;
          identity base-id;
          identity derived { base base-id; }
          typedef port { type uint16; }
          grouping addr { leaf ip { type string; } }
          container system {
            presence "on";
            uses addr;
            leaf p { type port; }
            leaf r { type leafref { path "../p"; } }
          }
          list server {
            key "name";
            leaf name { type string; }
            leaf color { type enumeration { enum red; enum blue { value 4; } } }
          }
          container state {
            config false;
            leaf flags { type bits { bit up; bit down; } }
          }
        }
    "#});

    let dump = only_unit(&schema).tree.printer().with_groupings(false).dump();
    insta::assert_snapshot!(dump, @r"
    module demo
      identity base-id
      identity derived : base-id -> demo:base-id
      container system rw presence
        uses addr -> demo:addr
        leaf p: port <uint16> rw
        leaf r: leafref -> demo:p rw
      list server rw key=name
        leaf name: string rw
        leaf color: enumeration rw
          enumeration color_enum {red=0, blue=4}
      container state ro
        leaf flags: bits ro
          bits flags_bits {up@0, down@1}
    ");
}

#[test]
fn groupings_are_printed_by_default() {
    let schema = compile(indoc! {r#"
        module demo {
          namespace "urn:demo";
          prefix d;
          typedef port { type uint16; }
          grouping addr { container inner; }
        }
    "#});

    let dump = only_unit(&schema).tree.printer().dump();
    assert!(dump.contains("\n  typedef port: uint16\n"), "{dump}");
    assert!(dump.contains("\n  grouping addr\n    container inner"), "{dump}");
}

#[test]
fn targets_in_other_units() {
    let schema = compile_files(&[
        (
            "base.yang",
            indoc! {r#"
                module base {
                  namespace "urn:base";
                  prefix b;
                  grouping addr { leaf ip { type string; } }
                }
            "#},
        ),
        (
            "app.yang",
            indoc! {r#"
                module app {
                  namespace "urn:app";
                  prefix a;
                  import base { prefix b; }
                  container server { uses b:addr; }
                }
            "#},
        ),
    ]);

    let app = schema.unit_by_name("app").unwrap();
    let trees = schema.units().map(|u| &u.tree);

    let named = app.tree.printer().with_units(trees).dump();
    assert!(named.contains("uses b:addr -> base:addr"), "{named}");

    let unnamed = app.tree.printer().dump();
    assert!(unnamed.contains("uses b:addr -> <unknown>"), "{unnamed}");
}

#[test]
fn unresolved_targets() {
    let schema = compile(indoc! {r#"
        module demo {
          namespace "urn:demo";
          prefix d;
          container c { uses missing; }
        }
    "#});

    let dump = only_unit(&schema).tree.printer().dump();
    assert!(dump.contains("uses missing -> ?"), "{dump}");
}
