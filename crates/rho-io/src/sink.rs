//! Redirectable output sink.
//!
//! A [`Sink`] is where rendered output goes: stdout by default, or a file
//! after [`redirect`](Sink::redirect). Swapping targets or dropping the
//! sink closes the previously opened file best-effort; closing never
//! raises, matching the rule that shutdown cleanup must not fail.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::IoResult;

/// Output destination: stdout, or a file opened by this sink.
pub struct Sink {
    file: Option<File>,
}

impl Sink {
    /// A sink writing to stdout.
    pub fn stdout() -> Self {
        Self { file: None }
    }

    /// A sink writing to a fresh file at `path` (truncating).
    pub fn to_file(path: impl AsRef<Path>) -> IoResult<Self> {
        Ok(Self {
            file: Some(File::create(path)?),
        })
    }

    /// Redirect subsequent output to `path`, closing any previous file.
    pub fn redirect(&mut self, path: impl AsRef<Path>) -> IoResult<()> {
        let file = File::create(path)?;
        self.close_current();
        self.file = Some(file);
        Ok(())
    }

    /// Restore output to stdout, closing any previous file.
    pub fn restore(&mut self) {
        self.close_current();
    }

    /// Returns `true` while output goes to a file.
    pub fn is_redirected(&self) -> bool {
        self.file.is_some()
    }

    /// Write a rendered chunk followed by a newline.
    pub fn emit(&mut self, text: &str) -> IoResult<()> {
        self.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            self.write_all(b"\n")?;
        }
        Ok(())
    }

    fn close_current(&mut self) {
        if let Some(mut file) = self.file.take() {
            // Best effort: a failed flush on close is deliberately ignored.
            let _ = file.flush();
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.file {
            Some(file) => file.write(buf),
            None => io::stdout().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.file {
            Some(file) => file.flush(),
            None => io::stdout().flush(),
        }
    }
}

impl Drop for Sink {
    fn drop(&mut self) {
        self.close_current();
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("redirected", &self.is_redirected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirected_output_lands_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut sink = Sink::stdout();
        sink.redirect(&path).unwrap();
        sink.emit("hello").unwrap();
        sink.emit("world\n").unwrap();
        sink.restore();
        assert!(!sink.is_redirected());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\nworld\n");
    }

    #[test]
    fn redirect_swaps_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        let mut sink = Sink::to_file(&first).unwrap();
        sink.emit("one").unwrap();
        sink.redirect(&second).unwrap();
        sink.emit("two").unwrap();
        drop(sink);
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "one\n");
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "two\n");
    }

    #[test]
    fn drop_closes_without_panicking() {
        let dir = tempfile::tempdir().unwrap();
        let sink = Sink::to_file(dir.path().join("out.txt")).unwrap();
        drop(sink);
    }
}
