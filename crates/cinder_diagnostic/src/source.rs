use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// A source buffer with its line breaks cached for position lookups.
///
/// The buffer is kept as raw bytes since the lexer works on bytes and the
/// input is not required to be valid UTF-8. Lines are decoded lossily when
/// rendered.
#[derive(Debug, Clone)]
pub struct Source {
    name: String,
    path: Option<PathBuf>,
    bytes: Vec<u8>,

    line_breaks: Vec<usize>,
}

impl Source {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let line_breaks = bytes
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| (b == b'\n').then_some(i))
            .collect();

        Self {
            name: name.into(),
            path: None,
            bytes,
            line_breaks,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// One-based line and column (in bytes) of a byte offset.
    pub fn byte_to_line_col(&self, byte: usize) -> Option<(usize, usize)> {
        let line = self.byte_to_line_index(byte)?;

        let line_start = self.line_to_byte(line)?;
        let col = byte - line_start;

        Some((line + 1, col + 1))
    }

    pub fn byte_to_line_index(&self, byte: usize) -> Option<usize> {
        if byte > self.bytes.len() {
            return None;
        }

        match self.line_breaks.binary_search(&byte) {
            Ok(line) | Err(line) => Some(line),
        }
    }

    pub fn line_to_byte(&self, line: usize) -> Option<usize> {
        if line == 0 {
            Some(0)
        } else {
            self.line_breaks.get(line - 1).map(|&byte| byte + 1)
        }
    }

    /// The line's bytes without its line terminator.
    pub fn line_bytes(&self, index: usize) -> Option<&[u8]> {
        let start = self.line_to_byte(index)?;
        let end = self.line_to_byte(index + 1).unwrap_or(self.bytes.len());

        let line = &self.bytes[start..end];
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        Some(line)
    }

    pub fn line_str(&self, index: usize) -> Option<Cow<'_, str>> {
        self.line_bytes(index).map(String::from_utf8_lossy)
    }

    pub fn num_lines(&self) -> usize {
        1 + self.line_breaks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::Source;

    fn source(s: &str) -> Source {
        Source::new("sample", s)
    }

    #[test]
    fn line_index() {
        let src = source("");
        assert_eq!(src.byte_to_line_index(0), Some(0));
        assert_eq!(src.byte_to_line_index(1), None);

        let src = source("x\n");
        assert_eq!(src.byte_to_line_index(0), Some(0));
        assert_eq!(src.byte_to_line_index(1), Some(0));
        assert_eq!(src.byte_to_line_index(2), Some(1));
        assert_eq!(src.byte_to_line_index(3), None);

        let src = source("\nx");
        assert_eq!(src.byte_to_line_index(0), Some(0));
        assert_eq!(src.byte_to_line_index(1), Some(1));
        assert_eq!(src.byte_to_line_index(2), Some(1));
    }

    #[test]
    fn line_col() {
        let src = source("int\nmain");
        assert_eq!(src.byte_to_line_col(0), Some((1, 1)));
        assert_eq!(src.byte_to_line_col(3), Some((1, 4)));
        assert_eq!(src.byte_to_line_col(4), Some((2, 1)));
        assert_eq!(src.byte_to_line_col(8), Some((2, 5)));
        assert_eq!(src.byte_to_line_col(9), None);
    }

    #[test]
    fn line_str_strips_terminators() {
        let src = source("int\r\nmain\n");
        assert_eq!(src.num_lines(), 3);
        assert_eq!(src.line_str(0).as_deref(), Some("int"));
        assert_eq!(src.line_str(1).as_deref(), Some("main"));
        assert_eq!(src.line_str(2).as_deref(), Some(""));
        assert_eq!(src.line_str(3), None);
    }

    #[test]
    fn invalid_utf8_is_lossy() {
        let src = Source::new("sample", vec![b'a', 0xff, b'b']);
        assert_eq!(src.line_str(0).as_deref(), Some("a\u{fffd}b"));
    }
}
