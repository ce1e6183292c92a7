//! Small string helpers shared by the analyzer and the linker.

/// Levenshtein distance over chars; meant for short identifiers.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Closest candidate within a distance scaled to the length of `name`.
pub fn find_similar<'a>(name: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let max_distance = (name.len() / 3).clamp(1, 3);
    candidates
        .iter()
        .map(|&c| (c, edit_distance(name, c)))
        .filter(|(_, d)| *d <= max_distance)
        .min_by_key(|(_, d)| *d)
        .map(|(c, _)| c)
}

/// `did you mean` hint for `name`, if some candidate is close.
pub fn suggestion(name: &str, candidates: &[&str]) -> Option<String> {
    find_similar(name, candidates).map(|s| format!("did you mean `{s}`?"))
}
