//! User space to device space mapping.
//!
//! Every primitive obtains its device coordinates through
//! [`CoordinatePipeline::to_device`]: user transform, then paper scaling,
//! then the vertical flip into HPGL's bottom-left origin.

use crate::error::{HpglError, Result};
use crate::model::{PaperScaler, TransformStack, YAxis};
use crate::utils::Point;

#[derive(Debug, Clone)]
pub struct CoordinatePipeline {
    transforms: TransformStack,
    scaler: PaperScaler,
    y_axis: YAxis,
}

impl CoordinatePipeline {
    pub fn new(scaler: PaperScaler, y_axis: YAxis) -> Self {
        Self {
            transforms: TransformStack::new(),
            scaler,
            y_axis,
        }
    }

    pub fn transforms(&self) -> &TransformStack {
        &self.transforms
    }

    pub fn transforms_mut(&mut self) -> &mut TransformStack {
        &mut self.transforms
    }

    pub fn scaler(&self) -> &PaperScaler {
        &self.scaler
    }

    /// Replaces the scaler, keeping the transform stack.
    pub fn set_scaler(&mut self, scaler: PaperScaler) {
        self.scaler = scaler;
    }

    pub fn y_axis(&self) -> YAxis {
        self.y_axis
    }

    /// Whether rotational sense is inverted between canvas and device.
    pub fn flips(&self) -> bool {
        self.y_axis == YAxis::Down
    }

    /// Maps a user-space point to device units.
    pub fn to_device(&self, x: f64, y: f64) -> Point {
        let (dx, dy) = self.scaler.to_device(self.transforms.apply((x, y)));
        match self.y_axis {
            YAxis::Down => (dx, self.scaler.device_height() - dy),
            YAxis::Up => (dx, dy),
        }
    }

    /// Like [`to_device`](Self::to_device), but fails when the result is
    /// not a finite point. HPGL has no spelling for NaN or infinity.
    pub fn try_to_device(&self, x: f64, y: f64) -> Result<Point> {
        let p = self.to_device(x, y);
        if p.0.is_finite() && p.1.is_finite() {
            Ok(p)
        } else {
            Err(HpglError::precondition(format!(
                "coordinate ({x}, {y}) has no finite device position"
            )))
        }
    }

    /// Scales a width/height pair to device units. Transforms do not apply.
    pub fn to_device_extent(&self, width: f64, height: f64) -> (f64, f64) {
        self.scaler.to_device_extent(width, height)
    }

    /// Undoes the flip and scale of [`to_device`](Self::to_device), returning
    /// the point as it was after the user transform.
    pub fn from_device(&self, p: Point) -> Point {
        let (x, y) = p;
        let y = match self.y_axis {
            YAxis::Down => self.scaler.device_height() - y,
            YAxis::Up => y,
        };
        let ratio = self.scaler.ratio();
        (x / ratio, y / ratio)
    }
}
