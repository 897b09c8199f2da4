//! Primitive drawing operators.
//!
//! Handles: line, rect, ellipse, circle, arc, select_pen
//!
//! Every primitive maps its points through the coordinate pipeline and ends
//! with a pen lift (`PU;`).

use std::io::Write;

use tracing::debug;

use crate::command::Instruction;
use crate::device::ArcMode;
use crate::error::{HpglError, Result};
use crate::graphics::HpglGraphics;
use crate::utils::{EPSILON, Point};

/// Width/height difference below which an ellipse or arc is circular.
pub const CIRCLE_EPSILON: f64 = 0.1;

/// Upper bound on chord-angle samples for one ellipse or arc.
pub const MAX_CHORD_STEPS: usize = 1 << 20;

/// Sampled ellipse coordinates smaller than this are pushed out to it.
const MIN_SAMPLE_MAGNITUDE: f64 = 0.01;

/// Number of chord-angle steps needed to cover `span` degrees.
fn step_count(op: &str, span: f64, chord_angle: f64) -> Result<usize> {
    let ratio = span / chord_angle;
    if !ratio.is_finite() || ratio > MAX_CHORD_STEPS as f64 {
        return Err(HpglError::config(format!(
            "{op} spanning {span} degrees at chord angle {chord_angle} exceeds {MAX_CHORD_STEPS} steps"
        )));
    }
    Ok(((ratio - EPSILON).ceil() as usize).max(1))
}

fn clamp_sample(v: f64) -> f64 {
    if v.abs() < MIN_SAMPLE_MAGNITUDE {
        MIN_SAMPLE_MAGNITUDE
    } else {
        v
    }
}

fn ensure_finite(op: &str, values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(HpglError::precondition(format!(
            "{op} called with non-finite arguments {values:?}"
        )))
    }
}

impl<W: Write> HpglGraphics<W> {
    /// Writes each instruction on its own line.
    fn emit_all(&mut self, op: &str, instructions: &[Instruction]) -> Result<()> {
        let writer = self.writer_mut(op)?;
        for instruction in instructions {
            writer.emit(instruction)?;
        }
        Ok(())
    }

    /// Selects a plotter pen.
    ///
    /// HPGL: `SP<n>;`
    pub fn select_pen(&mut self, pen: u32) -> Result<()> {
        self.writer_mut("select_pen")?
            .emit(&Instruction::SelectPen(pen))
    }

    /// Draws a straight line.
    ///
    /// HPGL: `PU<start>;` `PD<end>;` `PU;`
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        self.ensure_open("line")?;
        let start = self.pipeline.try_to_device(x1, y1)?;
        let end = self.pipeline.try_to_device(x2, y2)?;
        self.emit_all(
            "line",
            &[
                Instruction::pen_up_to(start),
                Instruction::pen_down_to(end),
                Instruction::lift(),
            ],
        )
    }

    /// Draws a closed rectangle from two opposite corners.
    ///
    /// The outline is a single `PD` listing the remaining three corners and
    /// then the first one again.
    pub fn rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        self.ensure_open("rect")?;
        let p = &self.pipeline;
        let c1 = p.try_to_device(x1, y1)?;
        let c2 = p.try_to_device(x2, y1)?;
        let c3 = p.try_to_device(x2, y2)?;
        let c4 = p.try_to_device(x1, y2)?;
        self.emit_all(
            "rect",
            &[
                Instruction::pen_up_to(c1),
                Instruction::PenDown(vec![c2, c3, c4, c1]),
                Instruction::lift(),
            ],
        )
    }

    /// Draws an ellipse centered on (x, y).
    ///
    /// Near-circular ellipses use the native `CI` instruction. Anything else
    /// is approximated by a polygon sampled every chord angle, written one
    /// vertex at a time.
    pub fn ellipse(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.ensure_open("ellipse")?;
        ensure_finite("ellipse", &[x, y, w, h])?;
        let chord_angle = self.chord_angle;

        if (w - h).abs() < CIRCLE_EPSILON {
            let center = self.pipeline.try_to_device(x, y)?;
            let (scaled_w, _) = self.pipeline.to_device_extent(w, h);
            return self.emit_all(
                "ellipse",
                &[
                    Instruction::pen_up_to(center),
                    Instruction::Circle {
                        radius: scaled_w / 2.0,
                        chord_angle,
                    },
                    Instruction::lift(),
                ],
            );
        }

        let steps = step_count("ellipse", 360.0, chord_angle)?;
        let (rx, ry) = (w / 2.0, h / 2.0);
        let (pipeline, writer) = self.pipeline_and_writer("ellipse")?;
        let first = pipeline.try_to_device(x + rx, y)?;
        writer.emit(&Instruction::pen_up_to(first))?;
        for i in 1..steps {
            let t = (i as f64 * chord_angle).to_radians();
            let sx = clamp_sample(x + rx * t.cos());
            let sy = clamp_sample(y + ry * t.sin());
            writer.emit(&Instruction::pen_down_to(pipeline.try_to_device(sx, sy)?))?;
        }
        writer.emit(&Instruction::pen_down_to(first))?;
        writer.emit(&Instruction::lift())
    }

    /// Draws a circle centered on (x, y).
    pub fn circle(&mut self, x: f64, y: f64, diameter: f64) -> Result<()> {
        self.ellipse(x, y, diameter, diameter)
    }

    /// Draws an elliptical arc centered on (x, y) from `start` to `stop`
    /// radians.
    ///
    /// Circular arcs become a native `AA` instruction. The sweep is converted
    /// to degrees and its sign inverted when the vertical axis is flipped,
    /// since device angles then run the other way. Non-circular arcs are
    /// approximated by a polyline.
    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        start: f64,
        stop: f64,
        mode: ArcMode,
    ) -> Result<()> {
        self.ensure_open("arc")?;
        ensure_finite("arc", &[x, y, w, h, start, stop])?;
        if (w - h).abs() >= CIRCLE_EPSILON {
            return self.arc_polyline(x, y, w, h, start, stop, mode);
        }

        let r = w / 2.0;
        let center = self.pipeline.try_to_device(x, y)?;
        let first = self
            .pipeline
            .try_to_device(x + r * start.cos(), y + r * start.sin())?;
        let sweep = (stop - start).to_degrees();
        let sweep = if self.pipeline.flips() { -sweep } else { sweep };
        let chord_angle = self.chord_angle;

        let writer = self.writer_mut("arc")?;
        writer.emit(&Instruction::pen_up_to(first))?;
        writer.emit_line(&[
            Instruction::PenDown(Vec::new()),
            Instruction::ArcAbsolute {
                center,
                sweep,
                chord_angle,
            },
        ])?;
        for closing in arc_closure(mode, center, first) {
            writer.emit(&closing)?;
        }
        writer.emit(&Instruction::lift())
    }

    #[allow(clippy::too_many_arguments)]
    fn arc_polyline(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        start: f64,
        stop: f64,
        mode: ArcMode,
    ) -> Result<()> {
        let (rx, ry) = (w / 2.0, h / 2.0);
        let sweep = stop - start;
        let steps = step_count("arc", sweep.abs().to_degrees(), self.chord_angle)?;
        debug!(w, h, steps, "approximating non-circular arc");

        let (pipeline, writer) = self.pipeline_and_writer("arc")?;
        let center = pipeline.try_to_device(x, y)?;
        let sample = |i: usize| {
            let t = start + sweep * i as f64 / steps as f64;
            pipeline.try_to_device(x + rx * t.cos(), y + ry * t.sin())
        };
        let first = sample(0)?;
        writer.emit(&Instruction::pen_up_to(first))?;
        for i in 1..=steps {
            writer.emit(&Instruction::pen_down_to(sample(i)?))?;
        }
        for closing in arc_closure(mode, center, first) {
            writer.emit(&closing)?;
        }
        writer.emit(&Instruction::lift())
    }
}

/// Extra strokes that close an arc from its end point.
fn arc_closure(mode: ArcMode, center: Point, first: Point) -> Vec<Instruction> {
    match mode {
        ArcMode::Open => Vec::new(),
        ArcMode::Chord => vec![Instruction::pen_down_to(first)],
        ArcMode::Pie => vec![
            Instruction::pen_down_to(center),
            Instruction::pen_down_to(first),
        ],
    }
}
