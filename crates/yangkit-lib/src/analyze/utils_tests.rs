use super::utils::{edit_distance, find_similar, suggestion};

#[test]
fn distances() {
    assert_eq!(edit_distance("", "abc"), 3);
    assert_eq!(edit_distance("leaf", ""), 4);
    assert_eq!(edit_distance("leaf", "leaf"), 0);
    assert_eq!(edit_distance("contianer", "container"), 2);
    assert_eq!(edit_distance("kitten", "sitting"), 3);
}

#[test]
fn distance_counts_chars_not_bytes() {
    assert_eq!(edit_distance("naïve", "naive"), 1);
}

#[test]
fn closest_candidate_wins() {
    let candidates = ["leaf", "leaf-list", "list"];
    assert_eq!(find_similar("lef", &candidates), Some("leaf"));
    assert_eq!(find_similar("leaf-lst", &candidates), Some("leaf-list"));
}

#[test]
fn threshold_scales_with_length() {
    // short names tolerate a single edit
    assert_eq!(find_similar("ab", &["xy"]), None);
    assert_eq!(find_similar("ab", &["ax"]), Some("ax"));
    // long names tolerate at most three
    assert_eq!(find_similar("interfaces-state", &["interfaces-stats"]), Some("interfaces-stats"));
    assert_eq!(find_similar("interfaces-state", &["interface-s"]), None);
}

#[test]
fn suggestion_text() {
    assert_eq!(
        suggestion("contianer", &["container", "choice"]).as_deref(),
        Some("did you mean `container`?")
    );
    assert_eq!(suggestion("zzz", &["container"]), None);
    assert_eq!(suggestion("x", &[]), None);
}
