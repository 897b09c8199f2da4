//! HPGL command writer.
//!
//! Thin line-oriented sink around any [`Write`]. The writer is open from
//! construction until [`CommandWriter::close`], which flushes and hands the
//! underlying sink back; any write after that is a usage error.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::command::Instruction;
use crate::error::{HpglError, Result};
use crate::utils::format_number;

pub struct CommandWriter<W: Write> {
    /// Output sink, `None` once closed
    sink: Option<W>,
    /// Whether the header has been emitted
    header_written: bool,
    /// Number of lines written so far
    lines: usize,
}

/// Create a buffered file at `destination`.
///
/// Fails with a configuration error when no destination was configured and
/// with an I/O error when the file cannot be created.
pub fn open_file(destination: Option<&Path>) -> Result<BufWriter<File>> {
    let path = destination.ok_or_else(|| {
        HpglError::config("no output path configured; set one before beginning a session")
    })?;
    let file = File::create(path)?;
    debug!(path = %path.display(), "opened HPGL output");
    Ok(BufWriter::new(file))
}

impl CommandWriter<BufWriter<File>> {
    /// Open a command writer on a new file at `destination`.
    pub fn open(destination: Option<&Path>) -> Result<Self> {
        open_file(destination).map(Self::new)
    }
}

impl<W: Write> CommandWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Some(sink),
            header_written: false,
            lines: 0,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    fn sink(&mut self) -> Result<&mut W> {
        self.sink
            .as_mut()
            .ok_or_else(|| HpglError::precondition("write after the command writer was closed"))
    }

    /// Write one line of raw text followed by a newline.
    pub fn write_line(&mut self, text: &str) -> Result<()> {
        let sink = self.sink()?;
        sink.write_all(text.as_bytes())?;
        sink.write_all(b"\n")?;
        self.lines += 1;
        trace!(line = text, "hpgl");
        Ok(())
    }

    /// Write a single instruction on its own line.
    pub fn emit(&mut self, instruction: &Instruction) -> Result<()> {
        self.write_line(&instruction.to_string())
    }

    /// Write several instructions on one line.
    pub fn emit_line(&mut self, instructions: &[Instruction]) -> Result<()> {
        let line: String = instructions.iter().map(ToString::to_string).collect();
        self.write_line(&line)
    }

    /// Write a command on one line and its numeric parameter on the next.
    pub fn write(&mut self, command: &str, value: f64) -> Result<()> {
        self.write_line(command)?;
        self.write_line(&format_number(value))
    }

    /// Initialize the plotter and select the default pen.
    pub fn write_header(&mut self) -> Result<()> {
        if self.header_written {
            return Err(HpglError::precondition("HPGL header already written"));
        }
        self.emit_line(&[Instruction::Initialize, Instruction::SelectPen(1)])?;
        self.header_written = true;
        Ok(())
    }

    /// Return the pen to the origin.
    pub fn write_footer(&mut self) -> Result<()> {
        self.emit(&Instruction::pen_up_to((0.0, 0.0)))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink()?.flush()?;
        Ok(())
    }

    /// Flush and release the sink.
    pub fn close(&mut self) -> Result<W> {
        let mut sink = self
            .sink
            .take()
            .ok_or_else(|| HpglError::precondition("command writer already closed"))?;
        sink.flush()?;
        debug!(lines = self.lines, "closed HPGL output");
        Ok(sink)
    }
}
