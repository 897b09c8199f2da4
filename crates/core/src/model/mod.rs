//! Drawing model types.
//!
//! - `transform` - user-space affine transform stack
//! - `paper` - paper presets and canvas-to-device scaling

pub mod paper;
pub mod transform;

pub use paper::{PaperScaler, PaperSize, YAxis};
pub use transform::{MATRIX_STACK_DEPTH, TransformStack};
