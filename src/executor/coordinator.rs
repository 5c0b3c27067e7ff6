// Region-to-touch-point mapping.
use crate::errors::{MowerError, MowerResult};
use crate::perception::types::{Coordinate, Location};

/// Where inside a region the touch lands; `(0.5, 0.5)` is the centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorWeights {
    pub x_rate: f64,
    pub y_rate: f64,
}

impl AnchorWeights {
    pub const CENTER: AnchorWeights = AnchorWeights::new(0.5, 0.5);

    pub const fn new(x_rate: f64, y_rate: f64) -> Self {
        Self { x_rate, y_rate }
    }
}

impl Default for AnchorWeights {
    fn default() -> Self {
        Self::CENTER
    }
}

impl Location {
    /// Picks a device coordinate inside the region.
    ///
    /// `x_rate`/`y_rate` in `[0, 1]` interpolate from the left/top edge to the
    /// right/bottom edge. A polygon blends its two left and two right corners
    /// so mildly skewed quadrilaterals still land where expected; an
    /// axis-aligned polygon reduces to plain rectangle math. Results are
    /// truncated toward zero.
    pub fn resolve(&self, x_rate: f64, y_rate: f64) -> Coordinate {
        match *self {
            Location::Coordinate(c) => c,
            Location::Scope([p0, p1]) => {
                let x = p0.x as f64 * (1.0 - x_rate) + p1.x as f64 * x_rate;
                let y = p0.y as f64 * (1.0 - y_rate) + p1.y as f64 * y_rate;
                Coordinate::new(x as i32, y as i32)
            }
            Location::Polygon([tl, bl, br, tr]) => {
                let x = (tl.x as f64 * (1.0 - x_rate)
                    + bl.x as f64 * (1.0 - x_rate)
                    + br.x as f64 * x_rate
                    + tr.x as f64 * x_rate)
                    / 2.0;
                let y = (tl.y as f64 * (1.0 - y_rate)
                    + tr.y as f64 * (1.0 - y_rate)
                    + bl.y as f64 * y_rate
                    + br.y as f64 * y_rate)
                    / 2.0;
                Coordinate::new(x as i32, y as i32)
            }
        }
    }
}

/// Resolves an optional perception result with explicit weights; see
/// [`Location::resolve`].
pub fn resolve_weighted(location: Option<&Location>, weights: AnchorWeights) -> MowerResult<Coordinate> {
    resolve(location, weights.x_rate, weights.y_rate)
}

/// Resolves an optional perception result; a missing region is a recognition
/// failure.
pub fn resolve(location: Option<&Location>, x_rate: f64, y_rate: f64) -> MowerResult<Coordinate> {
    location
        .map(|loc| loc.resolve(x_rate, y_rate))
        .ok_or_else(|| MowerError::recognize("empty location"))
}
