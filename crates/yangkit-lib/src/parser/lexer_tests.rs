use super::cst::SyntaxKind::{self, *};
use super::lexer::{lex, token_text};

fn kinds(source: &str) -> Vec<SyntaxKind> {
    lex(source).into_iter().map(|t| t.kind).collect()
}

fn significant(source: &str) -> Vec<(SyntaxKind, &str)> {
    lex(source)
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| (t.kind, token_text(source, &t)))
        .collect()
}

#[test]
fn simple_statement() {
    assert_eq!(
        kinds("leaf a;"),
        vec![Word, Whitespace, Word, Semicolon]
    );
}

#[test]
fn block_statement() {
    assert_eq!(
        significant("container c { leaf x; }"),
        vec![
            (Word, "container"),
            (Word, "c"),
            (BraceOpen, "{"),
            (Word, "leaf"),
            (Word, "x"),
            (Semicolon, ";"),
            (BraceClose, "}"),
        ]
    );
}

#[test]
fn quoted_strings() {
    assert_eq!(
        significant(r#"description "a \"b\" c" + 'd';"#),
        vec![
            (Word, "description"),
            (DqString, r#""a \"b\" c""#),
            (Plus, "+"),
            (SqString, "'d'"),
            (Semicolon, ";"),
        ]
    );
}

#[test]
fn paths_stay_one_word() {
    assert_eq!(
        significant("path ../if:name/x;"),
        vec![(Word, "path"), (Word, "../if:name/x"), (Semicolon, ";")]
    );
    assert_eq!(
        significant("target-node /a:b/a:c;"),
        vec![(Word, "target-node"), (Word, "/a:b/a:c"), (Semicolon, ";")]
    );
}

#[test]
fn comments_are_trivia() {
    assert_eq!(
        kinds("// note\nleaf /* inline */ a;"),
        vec![
            LineComment,
            Newline,
            Word,
            Whitespace,
            BlockComment,
            Whitespace,
            Word,
            Semicolon
        ]
    );
}

#[test]
fn range_expression_is_a_word() {
    assert_eq!(
        significant("range 1..10|20..max;"),
        vec![(Word, "range"), (Word, "1..10|20..max"), (Semicolon, ";")]
    );
}

#[test]
fn crlf_newline() {
    assert_eq!(kinds("a;\r\nb;"), vec![Word, Semicolon, Newline, Word, Semicolon]);
}

#[test]
fn unterminated_string_becomes_garbage() {
    let tokens = significant("description \"oops");
    assert_eq!(tokens[0], (Word, "description"));
    assert!(tokens[1..].iter().any(|(k, _)| *k == Garbage));
}

#[test]
fn plus_between_quoted_parts() {
    assert_eq!(
        significant(r#"pattern "a" + "b";"#),
        vec![
            (Word, "pattern"),
            (DqString, r#""a""#),
            (Plus, "+"),
            (DqString, r#""b""#),
            (Semicolon, ";"),
        ]
    );
    assert_eq!(
        significant("pattern a+b;"),
        vec![(Word, "pattern"), (Word, "a+b"), (Semicolon, ";")]
    );
}
