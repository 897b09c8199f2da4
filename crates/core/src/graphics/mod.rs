//! HPGL drawing session.
//!
//! [`HpglGraphics`] owns the coordinate pipeline, the open shape and the
//! output sink for one session. Operators live in `ops`, one file per
//! category, as additional `impl` blocks on the session.
//!
//! Lifecycle: configure, `begin_session` (opens the sink and writes the
//! header), draw, `end_session` (writes the footer, flushes and returns the
//! sink). Drawing outside that window is a precondition violation.

pub mod ops;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::config::{SessionConfig, validate_chord_angle};
use crate::device::{ArcMode, DrawingSurface};
use crate::error::{HpglError, Result};
use crate::model::{PaperScaler, PaperSize};
use crate::pipeline::CoordinatePipeline;
use crate::shape::{EndMode, ShapeKind, ShapeState};
use crate::writer::{CommandWriter, open_file};

type SinkOpener<W> = Box<dyn FnOnce(&SessionConfig) -> Result<W>>;

enum SinkState<W: Write> {
    /// Not yet begun; holds how to obtain the sink
    Pending(SinkOpener<W>),
    Open(CommandWriter<W>),
    Closed,
}

/// A drawing session that serializes primitives as HPGL.
pub struct HpglGraphics<W: Write> {
    pub(crate) config: SessionConfig,
    sink: SinkState<W>,
    pub(crate) pipeline: CoordinatePipeline,
    pub(crate) shape: ShapeState,
    pub(crate) chord_angle: f64,
}

impl HpglGraphics<BufWriter<File>> {
    /// Create a session writing to `config.output_path`.
    ///
    /// The file is opened by [`begin_session`](Self::begin_session), so the
    /// path may still be set afterwards with `set_output_path`.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_opener(
            config,
            Box::new(|config: &SessionConfig| open_file(config.output_path.as_deref())),
        )
    }
}

impl<W: Write + 'static> HpglGraphics<W> {
    /// Create a session writing to an already open sink.
    pub fn with_sink(config: SessionConfig, sink: W) -> Self {
        Self::with_opener(config, Box::new(move |_: &SessionConfig| Ok(sink)))
    }
}

impl<W: Write> HpglGraphics<W> {
    fn with_opener(config: SessionConfig, opener: SinkOpener<W>) -> Self {
        let paper = config.paper.unwrap_or_default();
        let chord_angle = config.chord_angle;
        let pipeline = CoordinatePipeline::new(PaperScaler::unscaled(paper), config.y_axis);
        Self {
            config,
            sink: SinkState::Pending(opener),
            pipeline,
            shape: ShapeState::Idle,
            chord_angle,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &CoordinatePipeline {
        &self.pipeline
    }

    /// True between `begin_session` and `end_session`.
    pub fn is_open(&self) -> bool {
        matches!(self.sink, SinkState::Open(_))
    }

    fn ensure_configurable(&self, what: &str) -> Result<()> {
        match self.sink {
            SinkState::Pending(_) => Ok(()),
            _ => Err(HpglError::precondition(format!(
                "{what} must be set before begin_session"
            ))),
        }
    }

    /// Select the paper preset by name ("A3" or "A4").
    pub fn set_paper_size(&mut self, name: &str) -> Result<()> {
        let paper: PaperSize = name.parse()?;
        self.set_paper(paper)
    }

    pub fn set_paper(&mut self, paper: PaperSize) -> Result<()> {
        self.ensure_configurable("paper size")?;
        self.config.paper = Some(paper);
        Ok(())
    }

    pub fn set_output_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.ensure_configurable("output path")?;
        self.config.output_path = Some(path.as_ref().to_path_buf());
        Ok(())
    }

    /// Chord angle in degrees used by circles, ellipses and arcs.
    pub fn chord_angle(&self) -> f64 {
        self.chord_angle
    }

    pub fn set_chord_angle(&mut self, degrees: f64) -> Result<()> {
        validate_chord_angle(degrees)?;
        self.chord_angle = degrees;
        Ok(())
    }

    /// Validate the configuration, open the sink and write the header.
    pub fn begin_session(&mut self) -> Result<()> {
        match self.sink {
            SinkState::Pending(_) => {}
            SinkState::Open(_) => {
                return Err(HpglError::precondition("begin_session called twice"));
            }
            SinkState::Closed => {
                return Err(HpglError::precondition("session already ended"));
            }
        }

        self.config.validate()?;
        validate_chord_angle(self.chord_angle)?;
        let paper = match self.config.paper {
            Some(paper) => paper,
            None => {
                warn!("paper size not set, defaulting to A4");
                self.config.paper = Some(PaperSize::A4);
                PaperSize::A4
            }
        };
        let scaler = PaperScaler::new(paper, self.config.canvas_height)?;
        self.pipeline.set_scaler(scaler);

        let SinkState::Pending(opener) = std::mem::replace(&mut self.sink, SinkState::Closed)
        else {
            return Err(HpglError::precondition("begin_session called twice"));
        };
        let mut writer = CommandWriter::new(opener(&self.config)?);
        writer.write_header()?;
        debug!(
            %paper,
            ratio = scaler.ratio(),
            canvas_width = self.config.canvas_width,
            canvas_height = self.config.canvas_height,
            "HPGL session started"
        );
        self.sink = SinkState::Open(writer);
        Ok(())
    }

    /// Write the footer, flush and release the sink.
    pub fn end_session(&mut self) -> Result<W> {
        if self.shape.is_open() {
            warn!("end_session with an unfinished shape; discarding it");
            self.shape = ShapeState::Idle;
        }
        let writer = self.writer_mut("end_session")?;
        writer.write_footer()?;
        let sink = writer.close()?;
        self.sink = SinkState::Closed;
        debug!("HPGL session ended");
        Ok(sink)
    }

    pub(crate) fn ensure_open(&self, op: &str) -> Result<()> {
        match self.sink {
            SinkState::Open(_) => Ok(()),
            SinkState::Pending(_) => Err(not_open(op, false)),
            SinkState::Closed => Err(not_open(op, true)),
        }
    }

    pub(crate) fn writer_mut(&mut self, op: &str) -> Result<&mut CommandWriter<W>> {
        match &mut self.sink {
            SinkState::Open(writer) => Ok(writer),
            SinkState::Pending(_) => Err(not_open(op, false)),
            SinkState::Closed => Err(not_open(op, true)),
        }
    }

    /// The pipeline and the open writer, borrowed together so samples can be
    /// mapped and written one at a time.
    pub(crate) fn pipeline_and_writer(
        &mut self,
        op: &str,
    ) -> Result<(&CoordinatePipeline, &mut CommandWriter<W>)> {
        match &mut self.sink {
            SinkState::Open(writer) => Ok((&self.pipeline, writer)),
            SinkState::Pending(_) => Err(not_open(op, false)),
            SinkState::Closed => Err(not_open(op, true)),
        }
    }
}

fn not_open(op: &str, ended: bool) -> HpglError {
    if ended {
        HpglError::precondition(format!("{op} called after end_session"))
    } else {
        HpglError::precondition(format!("{op} called before begin_session"))
    }
}

impl<W: Write> DrawingSurface for HpglGraphics<W> {
    fn push_matrix(&mut self) -> Result<()> {
        HpglGraphics::push_matrix(self)
    }

    fn pop_matrix(&mut self) -> Result<()> {
        HpglGraphics::pop_matrix(self)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        HpglGraphics::translate(self, dx, dy);
    }

    fn rotate(&mut self, angle: f64) {
        HpglGraphics::rotate(self, angle);
    }

    fn reset_matrix(&mut self) {
        HpglGraphics::reset_matrix(self);
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        HpglGraphics::line(self, x1, y1, x2, y2)
    }

    fn rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        HpglGraphics::rect(self, x1, y1, x2, y2)
    }

    fn ellipse(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        HpglGraphics::ellipse(self, x, y, w, h)
    }

    fn arc(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        start: f64,
        stop: f64,
        mode: ArcMode,
    ) -> Result<()> {
        HpglGraphics::arc(self, x, y, w, h, start, stop, mode)
    }

    fn begin_shape(&mut self, kind: ShapeKind) -> Result<()> {
        HpglGraphics::begin_shape(self, kind)
    }

    fn vertex(&mut self, x: f64, y: f64) -> Result<()> {
        HpglGraphics::vertex(self, x, y)
    }

    fn curve_vertex(&mut self, x: f64, y: f64) -> Result<()> {
        HpglGraphics::curve_vertex(self, x, y)
    }

    fn bezier_vertex(
        &mut self,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        x4: f64,
        y4: f64,
    ) -> Result<()> {
        HpglGraphics::bezier_vertex(self, x2, y2, x3, y3, x4, y4)
    }

    fn end_shape(&mut self, mode: EndMode) -> Result<()> {
        HpglGraphics::end_shape(self, mode)
    }

    fn set_chord_angle(&mut self, degrees: f64) -> Result<()> {
        HpglGraphics::set_chord_angle(self, degrees)
    }

    fn select_pen(&mut self, pen: u32) -> Result<()> {
        HpglGraphics::select_pen(self, pen)
    }
}
