//! Machine-level syntax tree for x86-64.

use std::fmt;

use crate::{Node, NodeCopy};

#[derive(Node!)]
pub struct Program {
    pub function: Function,
}

#[derive(Node!)]
pub struct Function {
    pub name: String,
    pub instructions: Vec<Instruction>,
}

#[derive(NodeCopy!)]
pub enum Instruction {
    Mov { src: Operand, dst: Operand },
    Ret,
}

#[derive(NodeCopy!)]
pub enum Operand {
    Imm(i32),
    Register(Register),
}

#[derive(NodeCopy!)]
pub enum Register {
    Eax,
}

impl Register {
    /// Where an `int` return value is left for the caller. Both the System V
    /// AMD64 and the Microsoft x64 calling conventions use `%eax`.
    pub const RETURN_VALUE: Register = Register::Eax;
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Register::Eax => "eax",
        };

        write!(f, "%{name}")
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Imm(value) => write!(f, "${value}"),
            Operand::Register(reg) => write!(f, "{reg}"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instruction::Mov { src, dst } => write!(f, "movl {src}, {dst}"),
            Instruction::Ret => write!(f, "ret"),
        }
    }
}
