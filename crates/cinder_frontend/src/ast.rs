//! Source-level syntax tree.
//!
//! The supported grammar only allows one shape of program, so every node has
//! exactly one child: a program is one function, whose body is one `return`
//! of one integer constant.

use cinder_diagnostic::span::Span;

use crate::{Node, NodeCopy};

#[derive(Node!)]
pub struct Program {
    pub function: Function,
}

#[derive(Node!)]
pub struct Function {
    pub name: Identifier,
    pub return_type: ReturnType,
    pub params: Params,
    pub body: Statement,
}

#[derive(NodeCopy!)]
pub enum ReturnType {
    Int,
}

#[derive(NodeCopy!)]
pub enum Params {
    Void,
}

#[derive(Node!)]
pub enum Statement {
    Return(Expression),
}

#[derive(Node!)]
pub enum Expression {
    Constant(IntegerConstant),
}

#[derive(Node!)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

#[derive(NodeCopy!)]
pub struct IntegerConstant {
    pub value: i32,
    pub span: Span,
}
