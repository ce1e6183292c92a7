use yangkit_lib::{SchemaBuilder, SchemaLinked, SourceMap};

use super::modules::{render, summaries};

fn compile(files: &[(&str, &str)]) -> SchemaLinked {
    let mut map = SourceMap::new();
    for (path, content) in files {
        map.add_file(path, content);
    }
    SchemaBuilder::new(map).parse().unwrap().analyze().link()
}

const BASE: &str = r#"module base {
  namespace "urn:base";
  prefix b;
  revision 2024-01-01;
}
"#;

const APP: &str = r#"module app {
  namespace "urn:app";
  prefix a;
  import base { prefix b; revision-date 2024-01-01; }
  include app-types;
}
"#;

const APP_TYPES: &str = r#"submodule app-types {
  belongs-to app { prefix a; }
}
"#;

#[test]
fn text_listing() {
    let schema = compile(&[
        ("base.yang", BASE),
        ("app.yang", APP),
        ("app-types.yang", APP_TYPES),
    ]);
    assert!(schema.is_valid());

    insta::assert_snapshot!(render(&summaries(&schema)), @r"
    module base@2024-01-01 (base.yang)
    module app (app.yang)
      import base@2024-01-01
      include app-types
    submodule app-types (app-types.yang)
      belongs-to app
    ");
}

#[test]
fn json_listing() {
    let schema = compile(&[("base.yang", BASE), ("copy.yang", BASE)]);

    let rows = summaries(&schema);
    let json = serde_json::to_value(&rows).unwrap();
    assert_eq!(json[0]["name"], "base");
    assert_eq!(json[0]["revision"], "2024-01-01");
    assert_eq!(json[0]["failed"], false);
    assert_eq!(json[1]["source"], "copy.yang");
    assert_eq!(json[1]["failed"], true);
    assert!(json[1].get("imports").is_none());
    assert!(render(&rows).contains("module base@2024-01-01 (copy.yang) [failed]"));
}
