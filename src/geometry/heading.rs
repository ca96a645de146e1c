use crate::geometry::curve::{PathCurve, fraction};

/// Tuning for sprite heading along the curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadingOpts {
    /// Arc-length distance ahead of the base point used to probe direction.
    pub look_ahead: f64,
    /// Correction added to the raw heading; the plane sprite points up-left at rest.
    pub offset_deg: f64,
    /// Per-axis distance below which base and probe count as coincident.
    pub rest_epsilon: f64,
}

impl Default for HeadingOpts {
    fn default() -> Self {
        Self {
            look_ahead: 20.0,
            offset_deg: -25.0,
            rest_epsilon: 0.1,
        }
    }
}

/// Heading in degrees at arc-length fraction `f`, including the sprite offset.
///
/// Returns `None` for an empty curve, or when the look-ahead point coincides with the base point
/// (the end of the curve, or a zero-length curve).
pub fn tangent_at_fraction(curve: &PathCurve, f: f64, opts: &HeadingOpts) -> Option<f64> {
    let total = curve.length();
    let base_len = fraction(f) * total;
    let ahead_len = (base_len + opts.look_ahead).min(total);

    let base = curve.point_at_length(base_len)?;
    let ahead = curve.point_at_length(ahead_len)?;
    let d = ahead - base;
    if d.x.abs() < opts.rest_epsilon && d.y.abs() < opts.rest_epsilon {
        return None;
    }
    Some(d.y.atan2(d.x).to_degrees() + opts.offset_deg)
}

/// Stateful heading that holds its last value where the tangent is undefined.
#[derive(Clone, Debug)]
pub struct HeadingTracker {
    opts: HeadingOpts,
    heading_deg: f64,
}

impl HeadingTracker {
    /// New tracker starting at `0` degrees.
    pub fn new(opts: HeadingOpts) -> Self {
        Self {
            opts,
            heading_deg: 0.0,
        }
    }

    /// Last computed heading.
    pub fn heading(&self) -> f64 {
        self.heading_deg
    }

    /// Recompute the heading at `f`, keeping the previous one at rest.
    pub fn update(&mut self, curve: &PathCurve, f: f64) -> f64 {
        if let Some(deg) = tangent_at_fraction(curve, f, &self.opts) {
            self.heading_deg = deg;
        }
        self.heading_deg
    }
}

impl Default for HeadingTracker {
    fn default() -> Self {
        Self::new(HeadingOpts::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/heading.rs"]
mod tests;
