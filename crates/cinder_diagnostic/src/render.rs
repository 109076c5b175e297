use std::io;

use termcolor::{ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use crate::source::Source;
use crate::span::Span;
use crate::{Config, Diagnostic, Severity, Snippet, SnippetKind};

const TAB: &str = "    ";

impl Diagnostic {
    pub fn write_to_stream(
        &self,
        source: &Source,
        config: &Config,
        stream: &mut impl WriteColor,
    ) -> io::Result<()> {
        DiagnosticWriter {
            diagnostic: self,
            source,
            stream,
            config,
        }
        .draw_all()
    }
}

struct DiagnosticWriter<'stream, 'a, W: WriteColor> {
    diagnostic: &'a Diagnostic,
    source: &'a Source,

    stream: &'stream mut W,
    config: &'a Config,
}

impl<'a, W: WriteColor> DiagnosticWriter<'_, 'a, W> {
    fn draw_all(mut self) -> io::Result<()> {
        self.draw_header()?;

        let diagnostic = self.diagnostic;
        let source = self.source;

        let mut snippets: Vec<&Snippet> = diagnostic.snippets.iter().collect();
        snippets.sort_by_key(|snippet| snippet.span.start);

        let line_num_width = snippets
            .iter()
            .filter_map(|snippet| source.byte_to_line_index(snippet.span.start))
            .map(|line| num_width(line + 1))
            .max()
            .unwrap_or(1);

        for snippet in snippets {
            self.draw_snippet(snippet, line_num_width)?;
        }

        for note in &diagnostic.notes {
            write!(self.stream, "{:>line_num_width$} = ", "")?;

            self.stream.set_color(&self.config.emphasis)?;
            write!(self.stream, "note:")?;
            self.stream.reset()?;

            writeln!(self.stream, " {note}")?;
        }

        writeln!(self.stream)?;

        Ok(())
    }

    fn draw_header(&mut self) -> io::Result<()> {
        self.stream.set_color(self.get_primary_color())?;

        if let Some(id) = &self.diagnostic.id {
            write!(self.stream, "[{id}] ")?;
        }

        write!(self.stream, "{}:", self.diagnostic.severity.as_str())?;

        self.stream.reset()?;

        match &self.diagnostic.message {
            Some(message) => writeln!(self.stream, " {message}"),
            None => writeln!(self.stream),
        }
    }

    fn draw_snippet(&mut self, snippet: &Snippet, line_num_width: usize) -> io::Result<()> {
        let source = self.source;

        let Some(line) = source.byte_to_line_index(snippet.span.start) else {
            // span outside the source, so there is nothing to point at
            return writeln!(self.stream, "{}", snippet.label);
        };

        let (line_num, col_num) = source
            .byte_to_line_col(snippet.span.start)
            .unwrap_or((line + 1, 1));

        self.stream.set_color(&self.config.subtle)?;
        write!(self.stream, "In {}:{line_num}:{col_num}", source.name())?;

        if let Some(path) = source.path() {
            write!(self.stream, " ({}:{line_num}:{col_num})", path.display())?;
        }

        writeln!(self.stream)?;
        self.stream.reset()?;

        let line_bytes = source.line_bytes(line).unwrap_or_default();
        let line_start = source.line_to_byte(line).unwrap_or_default();

        self.draw_gutter(Some(line_num), line_num_width)?;
        let line_str = String::from_utf8_lossy(line_bytes).replace('\t', TAB);
        writeln!(self.stream, "{line_str}")?;

        // underline at most up to the end of the line
        let start_in_line = (snippet.span.start - line_start).min(line_bytes.len());
        let end_in_line = (snippet.span.end.saturating_sub(line_start)).min(line_bytes.len());
        let underline = Span::new(start_in_line, end_in_line);
        let underline_len = if underline.is_empty() { 1 } else { underline.len() };

        let offset = str_width(&String::from_utf8_lossy(&line_bytes[..start_in_line]));

        self.draw_gutter(None, line_num_width)?;

        self.stream.set_color(self.get_snippet_color(snippet.kind))?;
        write!(self.stream, "{:<offset$}", "")?;
        for _ in 0..underline_len {
            write!(self.stream, "{}", self.config.underline)?;
        }
        writeln!(
            self.stream,
            "{}{}",
            self.config.underline_after, snippet.label
        )?;
        self.stream.reset()?;

        Ok(())
    }

    fn draw_gutter(&mut self, line: Option<usize>, line_num_width: usize) -> io::Result<()> {
        self.stream.set_color(&self.config.subtle)?;

        if let Some(line) = line {
            write!(self.stream, "{line:>line_num_width$}")?;
        } else {
            write!(self.stream, "{:>line_num_width$}", "")?;
        }

        write!(self.stream, " {} ", self.config.gutter)?;

        self.stream.reset()?;

        Ok(())
    }

    fn get_primary_color(&self) -> &'a ColorSpec {
        match self.diagnostic.severity {
            Severity::Warning => &self.config.warning_color,
            Severity::Error => &self.config.error_color,
        }
    }

    fn get_snippet_color(&self, kind: SnippetKind) -> &'a ColorSpec {
        match kind {
            SnippetKind::Primary => self.get_primary_color(),
            SnippetKind::Secondary => &self.config.emphasis,
        }
    }
}

fn num_width(n: usize) -> usize {
    1 + n.max(1).ilog10() as usize
}

fn str_width(s: &str) -> usize {
    let num_tabs = s.chars().filter(|&ch| ch == '\t').count();
    s.width() + num_tabs * TAB.len()
}
