//! Line-oriented reader with one byte of lookahead.

use std::io::{self, BufRead};

/// Wraps a buffered text source and hands out `.meta` lines one at a time.
///
/// Lookahead goes through [`BufRead::fill_buf`], so the source never has to
/// be seekable.
pub struct LineReader<R> {
    inner: R,
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, line: 0 }
    }

    /// Return the next byte without consuming it, or `None` at end of stream.
    pub fn peek(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    /// Read one line with its `\n` (or `\r\n`) terminator stripped.
    ///
    /// Returns `None` once the stream is exhausted.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.inner.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }

    /// 1-based number of the line most recently returned by [`Self::read_line`].
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Consume whitespace up to the next visible byte, counting the lines it
    /// spans.
    ///
    /// Returns `true` if anything else is left. Works on raw bytes, so the
    /// rest of the stream does not have to be valid UTF-8.
    pub fn skip_blank(&mut self) -> io::Result<bool> {
        loop {
            let buf = match self.inner.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                return Ok(false);
            }
            let blank = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
            let newlines = buf[..blank].iter().filter(|&&b| b == b'\n').count();
            let found = blank < buf.len();
            self.line += newlines;
            self.inner.consume(blank);
            if found {
                return Ok(true);
            }
        }
    }

    /// True if the next line opens a new `[...]` section or the stream ended.
    pub fn at_section_boundary(&mut self) -> io::Result<bool> {
        Ok(matches!(self.peek()?, None | Some(b'[')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_consume() {
        let mut reader = LineReader::new("[Mesh]\nName = \"a\"\n".as_bytes());
        assert_eq!(reader.peek().unwrap(), Some(b'['));
        assert_eq!(reader.peek().unwrap(), Some(b'['));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("[Mesh]"));
        assert_eq!(reader.peek().unwrap(), Some(b'N'));
        assert_eq!(reader.line_number(), 1);
    }

    #[test]
    fn strips_terminators() {
        let mut reader = LineReader::new("a\r\nb\n\nc".as_bytes());
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("a"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("b"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("c"));
        assert_eq!(reader.read_line().unwrap(), None);
        assert_eq!(reader.peek().unwrap(), None);
        assert_eq!(reader.line_number(), 4);
    }

    #[test]
    fn skip_blank_stops_at_content() {
        let mut reader = LineReader::new(&b"x\n\n  \r\n\t\xff\xfe\n"[..]);
        reader.read_line().unwrap();
        assert!(reader.skip_blank().unwrap());
        assert_eq!(reader.line_number(), 3);
        assert_eq!(reader.peek().unwrap(), Some(0xff));

        let mut reader = LineReader::new(&b"\n \n"[..]);
        assert!(!reader.skip_blank().unwrap());
        assert_eq!(reader.peek().unwrap(), None);
    }

    #[test]
    fn section_boundary() {
        let mut reader = LineReader::new("x = 1\n[Chunk]\n".as_bytes());
        assert!(!reader.at_section_boundary().unwrap());
        reader.read_line().unwrap();
        assert!(reader.at_section_boundary().unwrap());
        reader.read_line().unwrap();
        assert!(reader.at_section_boundary().unwrap());
    }
}
