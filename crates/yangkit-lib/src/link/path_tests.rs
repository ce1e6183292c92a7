use super::path::{parse_leafref_path, parse_schema_node_id};
use crate::schema::QName;

fn names(steps: &[QName]) -> Vec<String> {
    steps.iter().map(ToString::to_string).collect()
}

#[test]
fn absolute_leafref() {
    let path = parse_leafref_path("/if:interfaces/if:interface/if:name").unwrap();

    assert!(path.absolute);
    assert_eq!(path.up, 0);
    assert_eq!(
        names(&path.steps),
        vec!["if:interfaces", "if:interface", "if:name"]
    );
}

#[test]
fn relative_leafref_counts_parent_steps() {
    let path = parse_leafref_path("../../config/name").unwrap();

    assert!(!path.absolute);
    assert_eq!(path.up, 2);
    assert_eq!(names(&path.steps), vec!["config", "name"]);
}

#[test]
fn predicates_are_dropped() {
    let path = parse_leafref_path("/interface[name = current()/../ifname]/mtu").unwrap();

    assert_eq!(names(&path.steps), vec!["interface", "mtu"]);
}

#[test]
fn nested_predicates_are_dropped() {
    let path = parse_leafref_path("/a[b = c[d]]/e").unwrap();
    assert_eq!(names(&path.steps), vec!["a", "e"]);
}

#[test]
fn unbalanced_predicate() {
    assert_eq!(
        parse_leafref_path("/a[b = c/d").unwrap_err(),
        "unbalanced `[` in `/a[b = c/d`"
    );
    assert_eq!(
        parse_leafref_path("/a]/b").unwrap_err(),
        "unbalanced `]` in `/a]/b`"
    );
}

#[test]
fn bare_relative_leafref_rejected() {
    assert_eq!(
        parse_leafref_path("a/b").unwrap_err(),
        "`a/b` is neither absolute nor starts with `../`"
    );
}

#[test]
fn deref_rejected() {
    assert!(parse_leafref_path("deref(../x)/../y").is_err());
}

#[test]
fn invalid_step() {
    assert_eq!(
        parse_leafref_path("/a/1b").unwrap_err(),
        "`1b` is not a valid step in `/a/1b`"
    );
    assert!(parse_leafref_path("/a//b").is_err());
}

#[test]
fn schema_node_ids() {
    let absolute = parse_schema_node_id("/sys:system/sys:ntp").unwrap();
    assert!(absolute.absolute);
    assert_eq!(names(&absolute.steps), vec!["sys:system", "sys:ntp"]);

    let descendant = parse_schema_node_id("server/address").unwrap();
    assert!(!descendant.absolute);
    assert_eq!(names(&descendant.steps), vec!["server", "address"]);
}

#[test]
fn schema_node_id_steps_keep_prefixes() {
    let id = parse_schema_node_id("/t:a").unwrap();
    assert_eq!(id.steps[0].prefix.as_deref(), Some("t"));
    assert_eq!(id.steps[0].name, "a");
}

#[test]
fn schema_node_id_rejects_trailing_slash() {
    assert!(parse_schema_node_id("a/").is_err());
    assert!(parse_schema_node_id("/").is_err());
}
