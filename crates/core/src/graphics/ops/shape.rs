//! Shape operators.
//!
//! Handles: begin_shape, vertex, curve_vertex, bezier_vertex, end_shape
//!
//! Shape construction:
//! - vertex: plain polyline vertex
//! - curve_vertex: Catmull-Rom control point
//! - bezier_vertex: cubic segment from the previous vertex
//!
//! Nothing is written until `end_shape`, except native `BZ` curves which are
//! emitted as soon as they arrive.

use std::io::Write;

use tracing::debug;

use crate::command::Instruction;
use crate::config::BezierOutput;
use crate::curve::flatten_bezier;
use crate::error::{HpglError, Result};
use crate::graphics::HpglGraphics;
use crate::shape::{EndMode, ShapeKind};

impl<W: Write> HpglGraphics<W> {
    /// Starts a new shape.
    pub fn begin_shape(&mut self, kind: ShapeKind) -> Result<()> {
        self.ensure_open("begin_shape")?;
        self.shape.open(kind);
        Ok(())
    }

    /// Adds a polyline vertex to the open shape.
    pub fn vertex(&mut self, x: f64, y: f64) -> Result<()> {
        self.ensure_open("vertex")?;
        let p = self.pipeline.try_to_device(x, y)?;
        let detail = self.config.curve_detail;
        let buffer = self.shape.buffer_mut("vertex")?;
        buffer.flush_curve(detail);
        buffer.push(p);
        Ok(())
    }

    /// Adds a Catmull-Rom control point to the open shape.
    ///
    /// The first and last curve vertices of a run only shape the tangents.
    pub fn curve_vertex(&mut self, x: f64, y: f64) -> Result<()> {
        self.ensure_open("curve_vertex")?;
        let p = self.pipeline.try_to_device(x, y)?;
        self.shape.buffer_mut("curve_vertex")?.push_curve_point(p);
        Ok(())
    }

    /// Adds a cubic Bézier segment starting at the previous vertex.
    ///
    /// With native output this writes `PU<start>;` and
    /// `BZ<x2>,<y2>,<x3>,<y3>,<x4>,<y4>;` immediately and puts the shape in
    /// curve mode. With polyline output the curve is flattened into ordinary
    /// vertices.
    #[allow(clippy::too_many_arguments)]
    pub fn bezier_vertex(
        &mut self,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        x4: f64,
        y4: f64,
    ) -> Result<()> {
        self.ensure_open("bezier_vertex")?;
        let c2 = self.pipeline.try_to_device(x2, y2)?;
        let c3 = self.pipeline.try_to_device(x3, y3)?;
        let c4 = self.pipeline.try_to_device(x4, y4)?;
        let detail = self.config.curve_detail;
        let output = self.config.bezier;

        let buffer = self.shape.buffer_mut("bezier_vertex")?;
        buffer.flush_curve(detail);
        let start = buffer.last().ok_or_else(|| {
            HpglError::precondition("bezier_vertex needs a preceding vertex in the shape")
        })?;

        match output {
            BezierOutput::Polyline => {
                for p in flatten_bezier(&[start, c2, c3, c4], detail) {
                    buffer.push(p);
                }
                Ok(())
            }
            BezierOutput::Native => {
                buffer.push(c2);
                buffer.push(c3);
                buffer.push(c4);
                buffer.set_curve_mode();
                let writer = self.writer_mut("bezier_vertex")?;
                writer.emit(&Instruction::pen_up_to(start))?;
                writer.emit(&Instruction::Bezier([c2, c3, c4]))
            }
        }
    }

    /// Finishes the open shape and writes its outline.
    ///
    /// `EndMode::Close` adds a final stroke back to the first vertex.
    pub fn end_shape(&mut self, mode: EndMode) -> Result<()> {
        self.ensure_open("end_shape")?;
        let detail = self.config.curve_detail;
        let mut buffer = self.shape.close()?;
        buffer.flush_curve(detail);
        debug!(
            kind = ?buffer.kind(),
            vertices = buffer.len(),
            curve_mode = buffer.in_curve_mode(),
            ?mode,
            "closing shape"
        );
        let outline = buffer.outline(mode);
        let writer = self.writer_mut("end_shape")?;
        for instruction in &outline {
            writer.emit(instruction)?;
        }
        Ok(())
    }
}
