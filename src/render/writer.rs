//! Sinks receiving rendered lines.

use std::io::{self, Write};

/// Receives one rendered line at a time, without the line terminator.
pub trait LineWriter {
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

impl<W: LineWriter + ?Sized> LineWriter for &mut W {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

/// Collects lines in memory.
impl LineWriter for Vec<String> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// Appends each line followed by `\n`.
impl LineWriter for String {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.push_str(line);
        self.push('\n');
        Ok(())
    }
}

/// Adapts any [`io::Write`] into a [`LineWriter`].
#[derive(Debug)]
pub struct IoLineWriter<W: Write> {
    inner: W,
}

impl<W: Write> IoLineWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> LineWriter for IoLineWriter<W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.inner, "{line}")
    }
}
