mod cli;
mod compiler;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cinder_diagnostic::source::Source;
use cinder_session::diagnostics::PrettyDiagnosticEmitter;
use cinder_session::{ErrorsEmitted, Session};
use clap::Parser as _;
use cli::Cli;
use target_lexicon::Triple;
use temp_file::TempFile;

use crate::compiler::Compiler;

#[derive(thiserror::Error, Debug)]
enum CompilerError {
    #[error("failed to read `{}`: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write `{}`: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("errors while compiling")]
    HadErrors,
}

impl From<ErrorsEmitted> for CompilerError {
    fn from(_: ErrorsEmitted) -> Self {
        Self::HadErrors
    }
}

type CompilerResult<T> = Result<T, CompilerError>;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();

            // help and version are printed to stdout and are not failures
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,

        // the diagnostics have already been printed
        Err(CompilerError::HadErrors) => ExitCode::FAILURE,

        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CompilerResult<()> {
    let bytes = std::fs::read(&cli.input).map_err(|source| CompilerError::ReadInput {
        path: cli.input.clone(),
        source,
    })?;

    let name = cli
        .input
        .file_name()
        .map_or_else(|| cli.input.display().to_string(), |name| name.to_string_lossy().into_owned());
    let source = Source::new(name, bytes).with_path(&cli.input);

    let triple = cli.target.clone().unwrap_or_else(Triple::host);
    let session = Session::new(triple, source, PrettyDiagnosticEmitter::default());

    let mut compiler = Compiler::new(session, cli.debug);
    let Some(asm) = compiler.compile(cli.stop_after())? else {
        return Ok(());
    };

    if let Some(output) = &cli.output {
        write_output(output, &asm).map_err(|source| CompilerError::WriteOutput {
            path: output.clone(),
            source,
        })?;
    }

    if cli.stdout {
        print!("{asm}");
    }

    Ok(())
}

/// Writes through a temporary file in the output's directory, so the output
/// is either fully replaced or not touched at all.
fn write_output(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let temp = TempFile::in_dir(dir)
        .and_then(|temp| temp.with_contents(contents.as_bytes()))
        .map_err(std::io::Error::other)?;

    std::fs::rename(temp.path(), path)
}
