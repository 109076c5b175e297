use cinder_frontend::ast;

use crate::asm::{Function, Instruction, Operand, Program, Register};

pub fn lower_program(program: &ast::Program) -> Program {
    Program {
        function: lower_function(&program.function),
    }
}

fn lower_function(function: &ast::Function) -> Function {
    Function {
        name: function.name.name.clone(),
        instructions: lower_statement(&function.body),
    }
}

// One statement may need several instructions.
fn lower_statement(statement: &ast::Statement) -> Vec<Instruction> {
    match statement {
        ast::Statement::Return(expr) => vec![
            Instruction::Mov {
                src: lower_expression(expr),
                dst: Operand::Register(Register::RETURN_VALUE),
            },
            Instruction::Ret,
        ],
    }
}

fn lower_expression(expr: &ast::Expression) -> Operand {
    match expr {
        ast::Expression::Constant(constant) => Operand::Imm(constant.value),
    }
}
