use std::io::IsTerminal;

use cinder_diagnostic::source::Source;
use cinder_diagnostic::termcolor::{ColorChoice, StandardStream};

pub use cinder_diagnostic::*;

pub mod prelude {
    pub use super::IntoDiagnostic;
    pub use cinder_diagnostic::span::Span;
    pub use cinder_diagnostic::{Diagnostic, Severity, Snippet, SnippetKind};
}

pub trait DiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, source: &Source);
}

impl DiagnosticEmitter for Vec<Diagnostic> {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, _source: &Source) {
        self.push(diagnostic);
    }
}

#[derive(Debug)]
pub struct PrettyDiagnosticEmitter {
    pub stream: StandardStream,
    pub config: Config,
}

impl Default for PrettyDiagnosticEmitter {
    fn default() -> Self {
        // termcolor does not check for a terminal itself
        let color_choice = if std::io::stderr().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };

        Self {
            stream: StandardStream::stderr(color_choice),
            config: Config::default(),
        }
    }
}

impl DiagnosticEmitter for PrettyDiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, source: &Source) {
        diagnostic
            .write_to_stream(source, &self.config, &mut self.stream)
            .expect("failed to emit diagnostic");
    }
}

pub trait IntoDiagnostic {
    fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Diagnostic {
    fn into_diagnostic(self) -> Diagnostic {
        self
    }
}
