use std::path::PathBuf;

use super::loader::{LoadError, load_sources, yang_files};

#[test]
fn only_yang_files_in_name_order() {
    let files = yang_files(
        ["b.yang", "notes.txt", "a.yang", "c.yang.bak", "dir/z.yang"]
            .into_iter()
            .map(PathBuf::from),
    );
    assert_eq!(
        files,
        vec![
            PathBuf::from("a.yang"),
            PathBuf::from("b.yang"),
            PathBuf::from("dir/z.yang"),
        ]
    );
}

#[test]
fn missing_file() {
    let err = load_sources(&[PathBuf::from("does/not/exist.yang")]).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
    assert!(
        err.to_string()
            .starts_with("failed to read 'does/not/exist.yang': "),
        "{err}"
    );
}

#[test]
fn directory_without_modules() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    let err = load_sources(&[dir.clone()]).unwrap_err();
    assert!(matches!(&err, LoadError::EmptyDirectory(d) if *d == dir));
}

#[test]
fn stdin_only_once() {
    let err = load_sources(&[PathBuf::from("-"), PathBuf::from("-")]);
    assert!(matches!(err, Err(LoadError::StdinTwice)));
}

#[test]
fn nothing_to_load() {
    let map = load_sources(&[]).unwrap();
    assert!(map.is_empty());
}
