#[macro_use]
extern crate macro_rules_attribute;

mod emit;
mod lower;

pub mod asm;
pub mod print;
pub mod target;

use cinder_frontend::ast;

pub use target::{Target, UnsupportedTarget};

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)];
}

/// Translates a source program into machine instructions.
pub fn lower(program: &ast::Program) -> asm::Program {
    lower::lower_program(program)
}

/// Renders a machine program as GNU assembler (AT&T syntax) text.
///
/// The output only depends on the program and the target, so compiling the
/// same input twice gives byte-identical text.
pub fn emit(program: &asm::Program, target: &Target) -> String {
    emit::Emitter::new(target).run(program)
}
