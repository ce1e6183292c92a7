use indoc::indoc;

use super::{dump_cst, parse};
use crate::compilation::source_map::SourceId;
use crate::diagnostics::DiagnosticKind;

fn cst(source: &str) -> String {
    let res = parse(source, SourceId::default()).unwrap();
    assert!(res.diagnostics.is_empty(), "{:?}", res.diagnostics.kinds());
    dump_cst(res.root.as_cst())
}

fn errors(source: &str) -> Vec<DiagnosticKind> {
    parse(source, SourceId::default())
        .unwrap()
        .diagnostics
        .kinds()
}

#[test]
fn statement_with_argument() {
    insta::assert_snapshot!(cst("leaf a;"), @r"
    Root
      Statement
        Word leaf
        Argument
          Word a
        Semicolon ;
    ");
}

#[test]
fn statement_without_argument() {
    insta::assert_snapshot!(cst("input { }"), @r"
    Root
      Statement
        Word input
        Block
          BraceOpen {
          BraceClose }
    ");
}

#[test]
fn nested_blocks() {
    let input = indoc! {r#"
    container c {
      leaf x { type string; }
    }
    "#};

    insta::assert_snapshot!(cst(input), @r"
    Root
      Statement
        Word container
        Argument
          Word c
        Block
          BraceOpen {
          Statement
            Word leaf
            Argument
              Word x
            Block
              BraceOpen {
              Statement
                Word type
                Argument
                  Word string
                Semicolon ;
              BraceClose }
          BraceClose }
    ");
}

#[test]
fn concatenated_argument() {
    insta::assert_snapshot!(cst(r#"pattern "[a-z]" + '*';"#), @r#"
    Root
      Statement
        Word pattern
        Argument
          DqString "[a-z]"
          Plus +
          SqString '*'
        Semicolon ;
    "#);
}

#[test]
fn comments_anywhere() {
    let input = indoc! {r#"
    // header
    module m { /* inline */ prefix p; }
    "#};

    let res = parse(input, SourceId::default()).unwrap();
    assert!(res.diagnostics.is_empty());
    assert_eq!(res.root.statements().count(), 1);
    assert_eq!(res.root.as_cst().text().to_string(), input);
}

#[test]
fn missing_terminator_at_eof() {
    assert_eq!(errors("leaf a"), vec![DiagnosticKind::ExpectedTerminator]);
}

#[test]
fn unclosed_block() {
    assert_eq!(
        errors("container c { leaf a;"),
        vec![DiagnosticKind::UnclosedBlock]
    );
}

#[test]
fn stray_close_brace() {
    assert_eq!(
        errors("leaf a; }"),
        vec![DiagnosticKind::UnexpectedBlockClose]
    );
}

#[test]
fn quoted_keyword() {
    let kinds = errors(r#""leaf" a;"#);
    assert_eq!(kinds.first(), Some(&DiagnosticKind::ExpectedKeyword));
}

#[test]
fn dangling_plus() {
    assert_eq!(
        errors(r#"description "a" + ;"#),
        vec![DiagnosticKind::ExpectedString]
    );
}

#[test]
fn recursion_limit() {
    let deep = "a {".repeat(10) + &"}".repeat(10);
    let source_id = SourceId::default();
    let res = super::Parser::new(&deep, source_id, super::lex(&deep))
        .with_recursion_fuel(Some(4))
        .parse();
    assert!(matches!(res, Err(crate::Error::RecursionLimitExceeded)));
}

#[test]
fn exec_fuel() {
    let source = "leaf a; leaf b; leaf c;";
    let res = super::Parser::new(source, SourceId::default(), super::lex(source))
        .with_exec_fuel(Some(3))
        .parse();
    assert!(matches!(res, Err(crate::Error::ExecFuelExhausted)));

    let res = super::Parser::new(source, SourceId::default(), super::lex(source))
        .with_exec_fuel(Some(100))
        .parse()
        .unwrap();
    assert_eq!(res.exec_fuel_consumed, 9);
}
