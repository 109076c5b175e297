use crate::asm::{Instruction, Operand, Program};

/// Indented dump of a machine program for `--debug` output.
pub fn program(program: &Program) -> String {
    let function = &program.function;

    let mut lines = vec![
        "Program".to_owned(),
        format!("  Function `{}`", function.name),
    ];

    for instruction in &function.instructions {
        match instruction {
            Instruction::Mov { src, dst } => {
                lines.push("    Mov".to_owned());
                lines.push(format!("      src: {}", operand(src)));
                lines.push(format!("      dst: {}", operand(dst)));
            }
            Instruction::Ret => lines.push("    Ret".to_owned()),
        }
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn operand(operand: &Operand) -> String {
    match operand {
        Operand::Imm(value) => format!("Imm({value})"),
        Operand::Register(reg) => format!("Register({reg:?})"),
    }
}
