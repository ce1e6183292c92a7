use rowan::TextSize;
use yangkit_core::Position;

use super::source_map::{SourceId, SourceKind, SourceMap};

#[test]
fn inline_source() {
    let map = SourceMap::inline("module m {}");

    assert_eq!(map.len(), 1);
    assert_eq!(map.content(SourceId(0)), "module m {}");
    assert_eq!(map.kind(SourceId(0)), &SourceKind::Inline);
    assert_eq!(map.path(SourceId(0)), None);
}

#[test]
fn ids_follow_insertion_order() {
    let mut map = SourceMap::new();
    let a = map.add_file("a.yang", "module a {}");
    let b = map.add_stdin("module b {}");
    let c = map.add_inline("module c {}");

    assert_eq!((a, b, c), (SourceId(0), SourceId(1), SourceId(2)));
    assert_eq!(map.path(a), Some("a.yang"));
    assert_eq!(map.kind(b).display_name(), "<stdin>");
    assert_eq!(map.kind(c).display_name(), "<inline>");

    let contents: Vec<&str> = map.iter().map(|s| s.content).collect();
    assert_eq!(contents, vec!["module a {}", "module b {}", "module c {}"]);
}

#[test]
fn positions_are_one_based() {
    let map = SourceMap::inline("module m {\n  leaf x;\n}\n");
    let id = SourceId(0);

    assert_eq!(map.position(id, TextSize::from(0)), Position::new(1, 1));
    assert_eq!(map.position(id, TextSize::from(13)), Position::new(2, 3));
    assert_eq!(map.position(id, TextSize::from(21)), Position::new(3, 1));
}

#[test]
fn position_at_newline_stays_on_its_line() {
    let map = SourceMap::inline("ab\ncd");
    let id = SourceId(0);

    assert_eq!(map.position(id, TextSize::from(2)), Position::new(1, 3));
    assert_eq!(map.position(id, TextSize::from(3)), Position::new(2, 1));
}

#[test]
fn columns_count_characters() {
    let map = SourceMap::inline("d \"é\"; x");
    let id = SourceId(0);

    // `é` is two bytes
    assert_eq!(map.position(id, TextSize::from(7)), Position::new(1, 7));
}

#[test]
fn offset_past_end_is_clamped() {
    let map = SourceMap::inline("abc");
    assert_eq!(
        map.position(SourceId(0), TextSize::from(99)),
        Position::new(1, 4)
    );
}

#[test]
fn get_returns_borrowed_view() {
    let mut map = SourceMap::new();
    let id = map.add_file("dir/x.yang", "module x {}");
    let source = map.get(id);

    assert_eq!(source.id, id);
    assert_eq!(source.kind.display_name(), "dir/x.yang");
    assert_eq!(source.content, "module x {}");
}

#[test]
#[should_panic(expected = "invalid SourceId")]
fn unknown_id_panics() {
    let map = SourceMap::new();
    map.content(SourceId(3));
}
