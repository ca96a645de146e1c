use crate::foundation::error::{FlightpathError, FlightpathResult};

pub use kurbo::{BezPath, CubicBez, Point, Vec2};

/// Pixel size of the surface the curve is laid out on.
///
/// Waypoint coordinates are percentages; the viewport turns them into absolute positions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Build a viewport, rejecting negative or non-finite sizes.
    pub fn new(width: f64, height: f64) -> FlightpathResult<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(FlightpathError::validation(format!(
                "viewport must be finite and non-negative, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Map a percentage coordinate (0..100 on both axes) to viewport pixels.
    pub fn scale(self, percent: Point) -> Point {
        Point::new(
            (percent.x / 100.0) * self.width,
            (percent.y / 100.0) * self.height,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

pub(crate) fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}
