use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use target_lexicon::Triple;

use crate::compiler::Stage;

/// Compiles a preprocessed C file to x86-64 assembly.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The preprocessed source file.
    pub input: PathBuf,

    /// Where to write the assembly.
    #[arg(short, long, required_unless_present = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the assembly to stdout.
    #[arg(short = 'S', long)]
    pub stdout: bool,

    /// Stop after lexing.
    #[arg(long, conflicts_with_all = ["parse", "codegen"])]
    pub lex: bool,

    /// Stop after parsing.
    #[arg(long, conflicts_with = "codegen")]
    pub parse: bool,

    /// Stop after lowering to machine instructions.
    #[arg(long)]
    pub codegen: bool,

    /// Print the tokens and trees of each stage to stderr.
    #[arg(long)]
    pub debug: bool,

    /// The target triple. Defaults to the host.
    #[arg(long, value_parser = Triple::from_str)]
    pub target: Option<Triple>,
}

impl Cli {
    pub fn stop_after(&self) -> Option<Stage> {
        if self.lex {
            Some(Stage::Lex)
        } else if self.parse {
            Some(Stage::Parse)
        } else if self.codegen {
            Some(Stage::Codegen)
        } else {
            None
        }
    }
}
