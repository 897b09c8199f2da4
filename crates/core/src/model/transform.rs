//! Affine transform stack.
//!
//! The stack is a sequence of frames. `push` opens a fresh identity frame on
//! top, `translate`/`rotate` modify the top frame, and `pop` discards it. The
//! current transform is always the product of every frame from bottom to top;
//! after a pop it is recomputed from the surviving frames rather than by
//! inverting the discarded one.

use crate::error::{HpglError, Result};
use crate::utils::{
    MATRIX_IDENTITY, Matrix, Point, apply_matrix_pt, mult_matrix, rotate_matrix, translate_matrix,
};

/// Maximum number of nested `push` calls.
pub const MATRIX_STACK_DEPTH: usize = 32;

/// Current user-space transform plus the frames saved beneath it.
#[derive(Debug, Clone)]
pub struct TransformStack {
    /// Frames saved by `push`, bottom first
    saved: Vec<Matrix>,
    /// Frame being modified by translate/rotate
    top: Matrix,
    /// Product of `saved` and `top`
    current: Matrix,
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            saved: Vec::with_capacity(MATRIX_STACK_DEPTH),
            top: MATRIX_IDENTITY,
            current: MATRIX_IDENTITY,
        }
    }

    /// Number of frames currently saved.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// The transform applied to user points.
    pub fn current(&self) -> Matrix {
        self.current
    }

    /// Translates the current frame by (dx, dy).
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.top = translate_matrix(self.top, (dx, dy));
        self.current = translate_matrix(self.current, (dx, dy));
    }

    /// Rotates the current frame by `angle` radians.
    pub fn rotate(&mut self, angle: f64) {
        self.top = rotate_matrix(self.top, angle);
        self.current = rotate_matrix(self.current, angle);
    }

    /// Saves the current frame and starts a new one on top of it.
    pub fn push(&mut self) -> Result<()> {
        if self.saved.len() == MATRIX_STACK_DEPTH {
            return Err(HpglError::StackOverflow {
                depth: MATRIX_STACK_DEPTH,
            });
        }
        self.saved.push(self.top);
        self.top = MATRIX_IDENTITY;
        Ok(())
    }

    /// Discards the top frame and restores the one saved beneath it.
    pub fn pop(&mut self) -> Result<()> {
        let restored = self.saved.pop().ok_or(HpglError::StackUnderflow)?;
        self.top = restored;
        self.current = self.compose();
        Ok(())
    }

    /// Resets the top frame to identity, keeping saved frames intact.
    pub fn reset(&mut self) {
        self.top = MATRIX_IDENTITY;
        self.current = self.compose();
    }

    /// Maps a user point through the current transform.
    pub fn apply(&self, p: Point) -> Point {
        apply_matrix_pt(self.current, p)
    }

    /// Product of all frames, bottom frame outermost.
    fn compose(&self) -> Matrix {
        self.saved
            .iter()
            .chain(std::iter::once(&self.top))
            .fold(MATRIX_IDENTITY, |acc, frame| mult_matrix(*frame, acc))
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}
