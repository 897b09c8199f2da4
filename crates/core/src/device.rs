//! Drawing surface - the interface a host graphics front end drives.
//!
//! Hosts dispatch their primitive calls through [`DrawingSurface`] and hold
//! the implementation by reference. [`crate::graphics::HpglGraphics`] is the
//! HPGL implementation.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::shape::{EndMode, ShapeKind};

/// How an arc outline is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcMode {
    /// Only the curved part is drawn
    #[default]
    Open,
    /// A straight chord joins the end points
    Chord,
    /// Both end points are joined through the center
    Pie,
}

/// Drawing surface trait.
///
/// Coordinates are in user space; angles are in radians. Every call may fail
/// and a failure leaves the surface unusable.
pub trait DrawingSurface {
    /// Save the current transform.
    fn push_matrix(&mut self) -> Result<()>;

    /// Restore the transform saved by the matching `push_matrix`.
    fn pop_matrix(&mut self) -> Result<()>;

    fn translate(&mut self, dx: f64, dy: f64);

    fn rotate(&mut self, angle: f64);

    /// Reset the current transform frame to identity.
    fn reset_matrix(&mut self) {}

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()>;

    /// Axis-aligned rectangle given two opposite corners.
    fn rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()>;

    /// Ellipse centered on (x, y) with full width and height.
    fn ellipse(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()>;

    /// Circle centered on (x, y) with the given diameter.
    fn circle(&mut self, x: f64, y: f64, diameter: f64) -> Result<()> {
        self.ellipse(x, y, diameter, diameter)
    }

    #[allow(clippy::too_many_arguments)]
    fn arc(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        start: f64,
        stop: f64,
        mode: ArcMode,
    ) -> Result<()>;

    fn begin_shape(&mut self, kind: ShapeKind) -> Result<()>;

    fn vertex(&mut self, x: f64, y: f64) -> Result<()>;

    fn curve_vertex(&mut self, x: f64, y: f64) -> Result<()>;

    /// Cubic segment from the previous vertex through two control points to
    /// (x4, y4).
    #[allow(clippy::too_many_arguments)]
    fn bezier_vertex(
        &mut self,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        x4: f64,
        y4: f64,
    ) -> Result<()>;

    fn end_shape(&mut self, mode: EndMode) -> Result<()>;

    /// Set the chord angle in degrees used by later circles, ellipses and arcs.
    fn set_chord_angle(&mut self, degrees: f64) -> Result<()>;

    fn select_pen(&mut self, pen: u32) -> Result<()>;
}
