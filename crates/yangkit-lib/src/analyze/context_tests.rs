use super::context::{ContextStack, Frame, FrameKind};
use super::error::Phase;
use super::stmt::StmtCtx;
use crate::compilation::source_map::{SourceId, SourceMap};
use crate::diagnostics::DiagnosticKind;
use crate::parser::parse;
use crate::schema::{Must, NodeId, QName, TypeSpec};

fn with_stmt(src: &str, f: impl FnOnce(&StmtCtx)) {
    let map = SourceMap::inline(src);
    let parsed = parse(src, SourceId(0)).unwrap();
    let stmt = parsed.root.statements().next().expect("one statement");
    f(&StmtCtx::new(&stmt, SourceId(0), &map));
}

fn type_frame(name: &str) -> Frame {
    let spec = TypeSpec::new(QName::local(name), Default::default(), Default::default());
    Frame::Type(Box::new(spec))
}

#[test]
fn push_then_pop_returns_to_empty() {
    with_stmt("leaf x;", |ctx| {
        let mut stack = ContextStack::new();
        stack.push(Frame::Node(NodeId::ROOT));
        stack.push(type_frame("string"));
        assert_eq!(stack.depth(), 2);

        let top = stack.pop(ctx, FrameKind::Type).unwrap();
        assert!(matches!(top, Frame::Type(spec) if spec.name.name == "string"));
        stack.pop_node(ctx, NodeId::ROOT).unwrap();

        assert!(stack.is_empty());
        assert_eq!(stack.depth(), 0);
    });
}

#[test]
fn peek_sees_the_latest_frame() {
    with_stmt("must \"x\";", |ctx| {
        let mut stack = ContextStack::new();
        stack.push(Frame::Node(NodeId::ROOT));
        stack.push(Frame::Must(Must {
            condition: "x".to_string(),
            ..Must::default()
        }));

        assert_eq!(stack.peek(ctx, Phase::Entry).unwrap().kind(), FrameKind::Must);
        if let Frame::Must(must) = stack.peek_mut(ctx, Phase::Entry).unwrap() {
            must.error_message = Some("bad".to_string());
        }
        let Frame::Must(must) = stack.pop(ctx, FrameKind::Must).unwrap() else {
            panic!("expected a must frame");
        };
        assert_eq!(must.error_message.as_deref(), Some("bad"));
        assert_eq!(stack.peek(ctx, Phase::Entry).unwrap().as_node(), Some(NodeId::ROOT));
    });
}

#[test]
fn empty_stack() {
    with_stmt("leaf x;", |ctx| {
        let mut stack = ContextStack::new();

        let err = stack.peek(ctx, Phase::Entry).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::StackEmpty);
        assert_eq!(err.phase, Phase::Entry);
        assert_eq!(err.message(), "`leaf x` (entry): context stack is empty: no open holder");

        let err = stack.pop(ctx, FrameKind::Node).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::StackEmpty);
        assert_eq!(err.phase, Phase::Exit);
    });
}

#[test]
fn pop_of_wrong_kind_keeps_the_frame() {
    with_stmt("type string;", |ctx| {
        let mut stack = ContextStack::new();
        stack.push(Frame::Node(NodeId::ROOT));

        let err = stack.pop(ctx, FrameKind::Type).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::HolderMismatch);
        insta::assert_snapshot!(err.message(), @"`type string` (exit): context stack holder mismatch: expected `type` on top, found `node`");
        assert_eq!(stack.depth(), 1);
    });
}

#[test]
fn pop_node_checks_identity() {
    with_stmt("container c;", |ctx| {
        let mut stack = ContextStack::new();
        stack.push(type_frame("int8"));

        let err = stack.pop_node(ctx, NodeId::ROOT).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::HolderMismatch);
        assert_eq!(stack.depth(), 1);
    });
}

#[test]
fn frame_kind_names() {
    assert_eq!(FrameKind::BelongsTo.to_string(), "belongs-to");
    assert_eq!(type_frame("x").kind().to_string(), "type");
    assert_eq!(Frame::Node(NodeId::ROOT).as_node(), Some(NodeId::ROOT));
    assert_eq!(type_frame("x").as_node(), None);
}
