pub mod diagnostics;

use cinder_diagnostic::source::Source;
use diagnostics::{DiagnosticEmitter, IntoDiagnostic, Severity};
use target_lexicon::Triple;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorsEmitted;

/// State for compiling one source file.
pub struct Session<D: DiagnosticEmitter> {
    pub target: Triple,
    pub source: Source,
    pub diagnostics: D,
}

impl<D: DiagnosticEmitter> Session<D> {
    pub fn new(target: Triple, source: Source, diagnostics: D) -> Self {
        Self {
            target,
            source,
            diagnostics,
        }
    }

    pub fn report(&mut self, diagnostic: impl IntoDiagnostic) -> Result<(), ErrorsEmitted> {
        let diagnostic = diagnostic.into_diagnostic();
        let severity = diagnostic.severity;

        self.diagnostics.emit_diagnostic(diagnostic, &self.source);

        if severity < Severity::Error {
            Ok(())
        } else {
            Err(ErrorsEmitted)
        }
    }

    pub fn report_all<I>(&mut self, diagnostics: I) -> Result<(), ErrorsEmitted>
    where
        I: IntoIterator,
        I::Item: IntoDiagnostic,
    {
        let mut had_error = false;

        for diagnostic in diagnostics {
            let diagnostic = diagnostic.into_diagnostic();
            had_error |= diagnostic.severity >= Severity::Error;
            self.diagnostics.emit_diagnostic(diagnostic, &self.source);
        }

        if had_error {
            Err(ErrorsEmitted)
        } else {
            Ok(())
        }
    }
}
