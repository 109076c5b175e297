use crate::asm::{Function, Program};
use crate::target::Target;

pub struct Emitter<'t> {
    target: &'t Target,
    output: String,
}

impl<'t> Emitter<'t> {
    pub fn new(target: &'t Target) -> Self {
        Self {
            target,
            output: String::new(),
        }
    }

    pub fn run(mut self, program: &Program) -> String {
        self.emit_function(&program.function);
        self.output
    }

    fn emit_function(&mut self, function: &Function) {
        let name = self.target.symbol(&function.name);

        self.push_line(1, format!(".globl {name}"));
        self.push_line(0, format!("{name}:"));

        for instruction in &function.instructions {
            self.push_line(1, instruction.to_string());
        }

        self.push_line(0, "");
    }

    fn push_line(&mut self, indent: u8, s: impl AsRef<str>) {
        const INDENT: &str = "    ";

        for _ in 0..indent {
            self.output.push_str(INDENT);
        }

        self.output.push_str(s.as_ref());
        self.output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use cinder_frontend::{lex, parse};
    use target_lexicon::Triple;

    use crate::Target;

    fn compile(source: &str, triple: &str) -> String {
        let (tokens, errors) = lex(source.as_bytes());
        assert!(errors.is_empty(), "{errors:?}");

        let program = parse(&tokens).unwrap();
        let target = Target::from_triple(&Triple::from_str(triple).unwrap()).unwrap();

        crate::emit(&crate::lower(&program), &target)
    }

    fn compile_linux(source: &str) -> String {
        compile(source, "x86_64-unknown-linux-gnu")
    }

    #[test]
    fn return_2() {
        insta::assert_snapshot!(compile_linux("int main(void) { return 2; }"));
    }

    #[test]
    fn exact_layout() {
        assert_eq!(
            compile_linux("int main(void){return 2;}"),
            "    .globl main\nmain:\n    movl $2, %eax\n    ret\n\n"
        );
    }

    #[test]
    fn macho_prefix() {
        assert_eq!(
            compile("int main(void) { return 2; }", "x86_64-apple-darwin"),
            "    .globl _main\n_main:\n    movl $2, %eax\n    ret\n\n"
        );
    }

    #[test]
    fn constants_are_verbatim() {
        for value in ["0", "1", "42", "1000000", "2147483647"] {
            let asm = compile_linux(&format!("int main(void) {{ return {value}; }}"));
            assert!(
                asm.contains(&format!("    movl ${value}, %eax\n")),
                "missing `{value}` in:\n{asm}"
            );
        }
    }

    #[test]
    fn octal_constants_emit_their_value() {
        let asm = compile_linux("int main(void) { return 010; }");
        assert!(asm.contains("    movl $8, %eax\n"), "{asm}");

        let asm = compile_linux("int main(void) { return 0; }");
        assert!(asm.contains("    movl $0, %eax\n"), "{asm}");
    }

    #[test]
    fn deterministic() {
        let source = "int main(void) {\n    return 42;\n}\n";
        assert_eq!(compile_linux(source), compile_linux(source));
    }

    #[test]
    fn function_name_is_used() {
        let asm = compile_linux("int answer(void) { return 42; }");
        assert!(asm.starts_with("    .globl answer\nanswer:\n"));
    }
}
