use cinder_backend::{asm, Target};
use cinder_frontend::ast::Program;
use cinder_frontend::token::Token;
use cinder_session::diagnostics::{DiagnosticEmitter, IntoDiagnostic};
use cinder_session::Session;

use crate::{CompilerError, CompilerResult};

/// The last stage to run when compilation should stop early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lex,
    Parse,
    Codegen,
}

pub struct Compiler<D: DiagnosticEmitter> {
    pub session: Session<D>,
    debug: bool,
}

impl<D: DiagnosticEmitter> Compiler<D> {
    pub fn new(session: Session<D>, debug: bool) -> Self {
        Self { session, debug }
    }

    /// Runs the pipeline up to and including `stop_after`, or all the way to
    /// assembly text if it is `None`. Text is only returned when every stage
    /// succeeded.
    pub fn compile(&mut self, stop_after: Option<Stage>) -> CompilerResult<Option<String>> {
        let tokens = self.lex()?;
        if stop_after == Some(Stage::Lex) {
            return Ok(None);
        }

        let program = self.parse(&tokens)?;
        if stop_after == Some(Stage::Parse) {
            return Ok(None);
        }

        let target = self.check(Target::from_triple(&self.session.target))?;
        let machine_program = self.lower(&program);
        if stop_after == Some(Stage::Codegen) {
            return Ok(None);
        }

        Ok(Some(cinder_backend::emit(&machine_program, &target)))
    }

    fn lex(&mut self) -> CompilerResult<Vec<Token>> {
        let (tokens, errors) = cinder_frontend::lex(self.session.source.bytes());

        if self.debug {
            eprintln!("tokens:\n{}", cinder_frontend::print::tokens(&tokens));
        }

        self.session.report_all(errors)?;

        Ok(tokens)
    }

    fn parse(&mut self, tokens: &[Token]) -> CompilerResult<Program> {
        let program = self.check(cinder_frontend::parse(tokens))?;

        if self.debug {
            eprintln!("ast:\n{}", cinder_frontend::print::program(&program));
        }

        Ok(program)
    }

    fn lower(&mut self, program: &Program) -> asm::Program {
        let machine_program = cinder_backend::lower(program);

        if self.debug {
            eprintln!("asm ast:\n{}", cinder_backend::print::program(&machine_program));
        }

        machine_program
    }

    fn check<T, E: IntoDiagnostic>(&mut self, result: Result<T, E>) -> CompilerResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                self.session.report(err)?;
                Err(CompilerError::HadErrors)
            }
        }
    }
}
