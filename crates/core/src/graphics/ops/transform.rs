//! Transform operators.
//!
//! Handles: push_matrix, pop_matrix, translate, rotate, reset_matrix
//!
//! These touch only the user-space transform stack and never write output,
//! so they are accepted before `begin_session` as well.

use std::io::Write;

use crate::error::Result;
use crate::graphics::HpglGraphics;
use crate::utils::Point;

impl<W: Write> HpglGraphics<W> {
    /// Saves the current transform.
    pub fn push_matrix(&mut self) -> Result<()> {
        self.pipeline.transforms_mut().push()
    }

    /// Restores the transform saved by the matching `push_matrix`.
    pub fn pop_matrix(&mut self) -> Result<()> {
        self.pipeline.transforms_mut().pop()
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.pipeline.transforms_mut().translate(dx, dy);
    }

    /// Rotates the coordinate frame by `angle` radians.
    pub fn rotate(&mut self, angle: f64) {
        self.pipeline.transforms_mut().rotate(angle);
    }

    pub fn reset_matrix(&mut self) {
        self.pipeline.transforms_mut().reset();
    }

    /// Device coordinates of a user point under the current transform.
    pub fn to_device(&self, x: f64, y: f64) -> Point {
        self.pipeline.to_device(x, y)
    }
}
