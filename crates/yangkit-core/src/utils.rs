//! Pure lexical validators for statement arguments.
//!
//! None of these know where the text came from; positioned wrappers live in
//! the analyzer.

/// YANG identifier: `[A-Za-z_][A-Za-z0-9_.-]*`, not starting with `xml` in any case.
///
/// # Examples
/// ```
/// use yangkit_core::utils::is_identifier;
/// assert!(is_identifier("if-name"));
/// assert!(!is_identifier("1st"));
/// assert!(!is_identifier("XmlThing"));
/// ```
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    if s.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("xml")) {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Splits `prefix:name`. Returns `None` when either side is not an identifier.
///
/// # Examples
/// ```
/// use yangkit_core::utils::parse_identifier_ref;
/// assert_eq!(parse_identifier_ref("if:type"), Some((Some("if"), "type")));
/// assert_eq!(parse_identifier_ref("type"), Some((None, "type")));
/// assert_eq!(parse_identifier_ref("a:b:c"), None);
/// ```
pub fn parse_identifier_ref(s: &str) -> Option<(Option<&str>, &str)> {
    match s.split_once(':') {
        Some((prefix, name)) => {
            (is_identifier(prefix) && is_identifier(name)).then_some((Some(prefix), name))
        }
        None => is_identifier(s).then_some((None, s)),
    }
}

pub fn parse_boolean(s: &str) -> Option<bool> {
    match s {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Decimal digits without sign or leading zeros.
pub fn parse_non_negative(s: &str) -> Option<u64> {
    if !is_unsigned_digits(s) {
        return None;
    }
    s.parse().ok()
}

/// Optionally negative decimal digits without leading zeros.
///
/// Wide enough for the whole int64/uint64 value space.
pub fn parse_integer(s: &str) -> Option<i128> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if !is_unsigned_digits(digits) || s == "-0" {
        return None;
    }
    s.parse().ok()
}

fn is_unsigned_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) && (s == "0" || !s.starts_with('0'))
}

/// `YYYY-MM-DD` naming an existing calendar day.
///
/// # Examples
/// ```
/// use yangkit_core::utils::is_date;
/// assert!(is_date("2024-02-29"));
/// assert!(!is_date("2023-02-29"));
/// assert!(!is_date("2023-2-1"));
/// ```
pub fn is_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return false;
    }
    let (Ok(year), Ok(month), Ok(day)) = (
        s[0..4].parse::<u32>(),
        s[5..7].parse::<u32>(),
        s[8..10].parse::<u32>(),
    ) else {
        return false;
    };
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    let days_in_month = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => return false,
    };
    (1..=days_in_month).contains(&day)
}

/// URI with a scheme: `scheme:rest`, no whitespace.
pub fn is_uri(s: &str) -> bool {
    let Some((scheme, rest)) = s.split_once(':') else {
        return false;
    };
    let mut scheme_chars = scheme.chars();
    scheme_chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme_chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.is_empty()
        && !s.chars().any(char::is_whitespace)
}

/// Splits a whitespace-separated list of identifiers (`key`, `unique` components).
pub fn split_identifiers(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}
