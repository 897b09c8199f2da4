//! Raw output for instructions the session has no operator for.

use std::io::Write;

use crate::error::Result;
use crate::graphics::HpglGraphics;

impl<W: Write> HpglGraphics<W> {
    /// Writes `command` on one line and `value` on the next.
    pub fn write(&mut self, command: &str, value: f64) -> Result<()> {
        self.writer_mut("write")?.write(command, value)
    }

    /// Writes one line of text verbatim.
    pub fn write_line(&mut self, text: &str) -> Result<()> {
        self.writer_mut("write_line")?.write_line(text)
    }
}
