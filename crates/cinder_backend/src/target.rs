use cinder_session::diagnostics::prelude::*;
use target_lexicon::{Architecture, BinaryFormat, Triple};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedTarget {
    #[error("unsupported architecture: {0}")]
    Arch(Architecture),
}

impl IntoDiagnostic for UnsupportedTarget {
    fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error()
            .with_id("codegen")
            .with_message(self.to_string())
            .with_note("only x86_64 targets are supported")
    }
}

/// Assembler conventions of the platform the output is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    symbol_prefix: &'static str,
}

impl Target {
    pub fn from_triple(triple: &Triple) -> Result<Self, UnsupportedTarget> {
        match triple.architecture {
            Architecture::X86_64 => {}
            arch => return Err(UnsupportedTarget::Arch(arch)),
        }

        // Mach-O symbols carry a leading underscore
        let symbol_prefix = match triple.binary_format {
            BinaryFormat::Macho => "_",
            _ => "",
        };

        Ok(Self { symbol_prefix })
    }

    /// The assembler symbol for a C-level name.
    pub fn symbol(&self, name: &str) -> String {
        format!("{}{name}", self.symbol_prefix)
    }
}
