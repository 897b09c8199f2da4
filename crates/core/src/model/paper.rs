//! Paper presets and user-to-device scaling.
//!
//! Device extents are in plotter units for a landscape sheet.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HpglError, Result};
use crate::utils::Point;

/// Supported paper presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaperSize {
    A3,
    #[default]
    A4,
}

impl PaperSize {
    /// Device width in plotter units.
    pub const fn width(self) -> f64 {
        match self {
            PaperSize::A3 => 16158.0,
            PaperSize::A4 => 11040.0,
        }
    }

    /// Device height in plotter units.
    pub const fn height(self) -> f64 {
        match self {
            PaperSize::A3 => 11040.0,
            PaperSize::A4 => 7721.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaperSize {
    type Err = HpglError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A3" => Ok(PaperSize::A3),
            "A4" => Ok(PaperSize::A4),
            other => Err(HpglError::config(format!(
                "unsupported paper size {other:?}, expected A3 or A4"
            ))),
        }
    }
}

/// Direction of the canvas's vertical axis.
///
/// HPGL puts the origin bottom-left with y growing upward. A `Down` canvas
/// (origin top-left) is flipped on the way to device space; an `Up` canvas
/// is passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YAxis {
    #[default]
    Down,
    Up,
}

/// Uniform scale from canvas units to device units.
///
/// The ratio is derived from heights alone, which keeps the aspect ratio as
/// long as the canvas is landscape like the paper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperScaler {
    paper: PaperSize,
    ratio: f64,
}

impl PaperScaler {
    /// Create a scaler mapping a canvas of `canvas_height` onto `paper`.
    pub fn new(paper: PaperSize, canvas_height: f64) -> Result<Self> {
        if !(canvas_height.is_finite() && canvas_height > 0.0) {
            return Err(HpglError::config(format!(
                "canvas height must be positive, got {canvas_height}"
            )));
        }
        Ok(Self {
            paper,
            ratio: paper.height() / canvas_height,
        })
    }

    /// A 1:1 scaler, used until the canvas size is known.
    pub const fn unscaled(paper: PaperSize) -> Self {
        Self { paper, ratio: 1.0 }
    }

    pub fn paper(&self) -> PaperSize {
        self.paper
    }

    /// Device units per canvas unit.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Device height of the selected paper.
    pub fn device_height(&self) -> f64 {
        self.paper.height()
    }

    /// Scales a point into device units. No axis flip happens here.
    pub fn to_device(&self, p: Point) -> Point {
        (self.ratio * p.0, self.ratio * p.1)
    }

    /// Scales a width/height pair, e.g. a radius or bounding extent.
    pub fn to_device_extent(&self, width: f64, height: f64) -> (f64, f64) {
        (self.ratio * width, self.ratio * height)
    }
}
