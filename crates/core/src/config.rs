//! Session configuration.
//!
//! Provides a serde-friendly [`SessionConfig`] and a fluent
//! [`SessionBuilder`] for assembling one.
//!
//! # Example
//! ```ignore
//! use hpglkit_core::config::SessionBuilder;
//! use hpglkit_core::model::PaperSize;
//!
//! let config = SessionBuilder::new()
//!     .paper(PaperSize::A3)
//!     .canvas(800.0, 600.0)
//!     .output_path("plot.hpgl")
//!     .chord_angle(2.5)
//!     .build();
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HpglError, Result};
use crate::model::{PaperSize, YAxis};

/// HPGL's own default chord angle, in degrees.
pub const DEFAULT_CHORD_ANGLE: f64 = 5.0;

/// Default number of polyline samples per flattened curve segment.
pub const DEFAULT_CURVE_DETAIL: u32 = 20;

/// How Bézier vertices reach the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BezierOutput {
    /// Non-standard `BZ` instruction, written immediately
    #[default]
    Native,
    /// Flattened into ordinary shape vertices
    Polyline,
}

/// Settings for one drawing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Target paper; `None` falls back to A4 with a warning
    pub paper: Option<PaperSize>,
    /// Where the HPGL file is written
    pub output_path: Option<PathBuf>,
    /// Logical canvas width
    pub canvas_width: f64,
    /// Logical canvas height
    pub canvas_height: f64,
    /// Chord angle in degrees for circles, ellipses and arcs
    pub chord_angle: f64,
    /// Direction of the canvas y axis
    pub y_axis: YAxis,
    /// Bézier emission strategy
    pub bezier: BezierOutput,
    /// Samples per flattened curve segment
    pub curve_detail: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            paper: None,
            output_path: None,
            canvas_width: 1000.0,
            canvas_height: 700.0,
            chord_angle: DEFAULT_CHORD_ANGLE,
            y_axis: YAxis::Down,
            bezier: BezierOutput::Native,
            curve_detail: DEFAULT_CURVE_DETAIL,
        }
    }
}

impl SessionConfig {
    /// Check the settings that must hold before a session can start.
    ///
    /// Paper size and output path are checked elsewhere: the former has a
    /// default, the latter only matters for file-backed sessions.
    pub fn validate(&self) -> Result<()> {
        let (w, h) = (self.canvas_width, self.canvas_height);
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(HpglError::config(format!(
                "canvas size must be positive, got {w}x{h}"
            )));
        }
        if h > w {
            return Err(HpglError::config(format!(
                "portrait canvas {w}x{h} is not supported; plots are scaled for landscape paper"
            )));
        }
        validate_chord_angle(self.chord_angle)?;
        if self.curve_detail == 0 {
            return Err(HpglError::config("curve detail must be at least 1"));
        }
        Ok(())
    }
}

pub(crate) fn validate_chord_angle(degrees: f64) -> Result<()> {
    if degrees.is_finite() && degrees > 0.0 && degrees <= 360.0 {
        Ok(())
    } else {
        Err(HpglError::config(format!(
            "chord angle must be in (0, 360] degrees, got {degrees}"
        )))
    }
}

/// A builder for [`SessionConfig`].
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    config: SessionConfig,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target paper preset.
    pub fn paper(mut self, paper: PaperSize) -> Self {
        self.config.paper = Some(paper);
        self
    }

    /// Sets the output file path.
    pub fn output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config.output_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the logical canvas size.
    pub fn canvas(mut self, width: f64, height: f64) -> Self {
        self.config.canvas_width = width;
        self.config.canvas_height = height;
        self
    }

    /// Sets the initial chord angle in degrees.
    pub fn chord_angle(mut self, degrees: f64) -> Self {
        self.config.chord_angle = degrees;
        self
    }

    pub fn y_axis(mut self, y_axis: YAxis) -> Self {
        self.config.y_axis = y_axis;
        self
    }

    pub fn bezier(mut self, bezier: BezierOutput) -> Self {
        self.config.bezier = bezier;
        self
    }

    /// Sets the samples per flattened curve segment.
    pub fn curve_detail(mut self, detail: u32) -> Self {
        self.config.curve_detail = detail;
        self
    }

    pub fn build(self) -> SessionConfig {
        self.config
    }
}
