use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use temp_dir::TempDir;

const RETURN_2: &str = "int main(void) {\n    return 2;\n}\n";

struct Scratch {
    dir: TempDir,
}

impl Scratch {
    fn new(source: &str) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.child("main.c"), source).unwrap();
        Self { dir }
    }

    fn input(&self) -> PathBuf {
        self.dir.child("main.c")
    }

    fn output(&self) -> PathBuf {
        self.dir.child("main.s")
    }

    fn run(&self, extra_args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_cinder"))
            .arg(self.input())
            .arg("-o")
            .arg(self.output())
            .args(["--target", "x86_64-unknown-linux-gnu"])
            .args(extra_args)
            .output()
            .unwrap()
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn compiles_return_2() {
    let scratch = Scratch::new(RETURN_2);
    let output = scratch.run(&[]);

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(
        read(&scratch.output()),
        "    .globl main\nmain:\n    movl $2, %eax\n    ret\n\n"
    );
}

#[test]
fn macho_target() {
    let scratch = Scratch::new(RETURN_2);
    let output = Command::new(env!("CARGO_BIN_EXE_cinder"))
        .arg(scratch.input())
        .args(["--stdout", "--target", "x86_64-apple-darwin"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let asm = String::from_utf8(output.stdout).unwrap();
    assert!(asm.contains("_main:\n"));
}

#[test]
fn output_is_deterministic() {
    let scratch = Scratch::new("int main(void){return 1000000;}");

    assert!(scratch.run(&[]).status.success());
    let first = read(&scratch.output());

    assert!(scratch.run(&[]).status.success());
    assert_eq!(read(&scratch.output()), first);
    assert!(first.contains("movl $1000000, %eax"));
}

#[test]
fn unexpected_character() {
    let scratch = Scratch::new("int main(void) {\n    return #2;\n}\n");
    let output = scratch.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!scratch.output().exists());

    let stderr = stderr(&output);
    assert!(stderr.contains("[lex] Error: unexpected character `#`"), "{stderr}");
    assert!(stderr.contains("In main.c:2:12"), "{stderr}");
}

#[test]
fn malformed_constant() {
    let scratch = Scratch::new("int main(void) { return 1a; }");
    let output = scratch.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!scratch.output().exists());
    assert!(stderr(&output).contains("[lex] Error: invalid integer constant"));
}

#[test]
fn missing_semicolon() {
    let scratch = Scratch::new("int main(void) { return 2 }");
    let output = scratch.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!scratch.output().exists());

    let stderr = stderr(&output);
    assert!(stderr.contains("[parse] Error: expected `;`, found `}`"), "{stderr}");

    // the diagnostic is the only report
    assert_eq!(stderr.matches("Error:").count(), 1, "{stderr}");
    assert!(!stderr.contains("errors while compiling"), "{stderr}");
}

#[test]
fn octal_constant() {
    let scratch = Scratch::new("int main(void) { return 010; }");
    let output = scratch.run(&[]);

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(read(&scratch.output()).contains("movl $8, %eax"));

    let scratch = Scratch::new("int main(void) { return 09; }");
    let output = scratch.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("[lex] Error: invalid digit `9` (0x39) in octal constant"));
}

#[test]
fn output_replaces_existing_file() {
    let scratch = Scratch::new(RETURN_2);
    std::fs::write(scratch.output(), "previous output that is longer than the new one\n".repeat(10))
        .unwrap();

    assert!(scratch.run(&[]).status.success());
    assert_eq!(
        read(&scratch.output()),
        "    .globl main\nmain:\n    movl $2, %eax\n    ret\n\n"
    );

    // no temporary files are left next to the output
    assert_eq!(std::fs::read_dir(scratch.dir.path()).unwrap().count(), 2);
}

#[test]
fn unwritable_output() {
    let scratch = Scratch::new(RETURN_2);
    let output = Command::new(env!("CARGO_BIN_EXE_cinder"))
        .arg(scratch.input())
        .arg("-o")
        .arg(scratch.dir.child("missing").join("main.s"))
        .args(["--target", "x86_64-unknown-linux-gnu"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to write"));
}

#[test]
fn trailing_tokens() {
    let scratch = Scratch::new("int main(void) { return 2; } int x;");
    let output = scratch.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!scratch.output().exists());
    assert!(stderr(&output).contains("after the end of the program"));
}

#[test]
fn failure_keeps_existing_output() {
    let scratch = Scratch::new("int main(void) { return 2 }");
    std::fs::write(scratch.output(), "previous").unwrap();

    assert_eq!(scratch.run(&[]).status.code(), Some(1));
    assert_eq!(read(&scratch.output()), "previous");
}

#[test]
fn stage_flags_write_nothing() {
    for flag in ["--lex", "--parse", "--codegen"] {
        let scratch = Scratch::new(RETURN_2);
        let output = scratch.run(&[flag]);

        assert_eq!(output.status.code(), Some(0), "{flag}: {}", stderr(&output));
        assert!(!scratch.output().exists(), "{flag} wrote output");
    }
}

#[test]
fn lex_flag_ignores_grammar() {
    let scratch = Scratch::new("return int ; ;");
    assert_eq!(scratch.run(&["--lex"]).status.code(), Some(0));
    assert_eq!(scratch.run(&["--parse"]).status.code(), Some(1));
}

#[test]
fn stage_flags_fail_on_errors() {
    let scratch = Scratch::new("int main(void) { return 2; } $");
    assert_eq!(scratch.run(&["--lex"]).status.code(), Some(1));

    let scratch = Scratch::new("int main(void) { return; }");
    assert_eq!(scratch.run(&["--lex"]).status.code(), Some(0));
    assert_eq!(scratch.run(&["--parse"]).status.code(), Some(1));
}

#[test]
fn debug_traces_go_to_stderr() {
    let scratch = Scratch::new(RETURN_2);
    let output = scratch.run(&["--debug"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = stderr(&output);
    assert!(stderr.contains("keyword `return`"), "{stderr}");
    assert!(stderr.contains("Constant 2"), "{stderr}");
    assert!(stderr.contains("dst: Register(Eax)"), "{stderr}");

    assert_eq!(
        read(&scratch.output()),
        "    .globl main\nmain:\n    movl $2, %eax\n    ret\n\n"
    );
}

#[test]
fn missing_input() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_cinder"))
        .arg(dir.child("missing.c"))
        .arg("-o")
        .arg(dir.child("out.s"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to read"));
    assert!(!dir.child("out.s").exists());
}

#[test]
fn usage_errors_exit_1() {
    let output = Command::new(env!("CARGO_BIN_EXE_cinder")).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let output = Command::new(env!("CARGO_BIN_EXE_cinder"))
        .args(["main.c", "-o", "main.s", "--lex", "--parse"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn help_exits_0() {
    let output = Command::new(env!("CARGO_BIN_EXE_cinder"))
        .arg("--help")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--lex"));
}
