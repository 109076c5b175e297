//! Human-readable dumps of the token stream and the syntax tree, used by the
//! compiler's `--debug` output.

use crate::ast::*;
use crate::token::Token;

/// One token per line, prefixed by its byte range.
pub fn tokens(tokens: &[Token]) -> String {
    let mut printer = Printer::default();

    for token in tokens {
        let range = format!("{}..{}", token.span.start, token.span.end);
        printer.push_line(0, format!("{range:<10}{}", token.kind.describe()));
    }

    printer.output
}

pub fn program(program: &Program) -> String {
    let mut printer = Printer::default();

    printer.push_line(0, "Program");
    printer.function(&program.function, 1);

    printer.output
}

#[derive(Default)]
struct Printer {
    output: String,
}

impl Printer {
    fn function(&mut self, function: &Function, indent: u8) {
        self.push_line(indent, format!("Function `{}`", function.name.name));

        let return_type = match function.return_type {
            ReturnType::Int => "int",
        };
        self.push_line(indent + 1, format!("return type: {return_type}"));

        let params = match function.params {
            Params::Void => "void",
        };
        self.push_line(indent + 1, format!("params: {params}"));

        self.push_line(indent + 1, "body:");
        self.statement(&function.body, indent + 2);
    }

    fn statement(&mut self, statement: &Statement, indent: u8) {
        match statement {
            Statement::Return(expr) => {
                self.push_line(indent, "Return");
                self.expression(expr, indent + 1);
            }
        }
    }

    fn expression(&mut self, expr: &Expression, indent: u8) {
        match expr {
            Expression::Constant(constant) => {
                self.push_line(indent, format!("Constant {}", constant.value));
            }
        }
    }

    fn push_line(&mut self, indent: u8, s: impl AsRef<str>) {
        const INDENT: &str = "  ";

        for _ in 0..indent {
            self.output.push_str(INDENT);
        }

        self.output.push_str(s.as_ref());
        self.output.push('\n');
    }
}
