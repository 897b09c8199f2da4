//! Drawing operators, grouped by category.
//!
//! Each submodule adds an `impl` block to
//! [`HpglGraphics`](super::HpglGraphics).

mod primitive;
mod raw;
mod shape;
mod transform;

pub use primitive::{CIRCLE_EPSILON, MAX_CHORD_STEPS};
