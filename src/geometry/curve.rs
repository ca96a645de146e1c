use crate::foundation::core::{BezPath, CubicBez, Point, Viewport, clamp01};
use crate::foundation::error::{FlightpathError, FlightpathResult};
use crate::geometry::waypoint::Waypoint;
use kurbo::ParamCurve as _;

/// Flattening resolution for [`PathCurve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveOpts {
    /// Polyline samples per Bézier segment (`>= 1`).
    pub samples_per_segment: usize,
}

impl Default for CurveOpts {
    fn default() -> Self {
        Self {
            samples_per_segment: 64,
        }
    }
}

/// Piecewise cubic curve through a waypoint sequence, laid out on a viewport.
///
/// Each consecutive pair `(x1, y1) -> (x2, y2)` becomes one cubic with control points
/// `(x1, ym)` and `(x2, ym)`, where `ym` is the midpoint y of the pair. Arc-length queries run
/// against a fixed-resolution polyline of those cubics, so sampling needs no drawing surface.
#[derive(Clone, Debug, Default)]
pub struct PathCurve {
    segments: Vec<CubicBez>,
    points: Vec<Point>,
    cumulative: Vec<f64>, // cumulative[i] = polyline length up to points[i]
}

impl PathCurve {
    /// Lay out `waypoints` on `viewport`. An empty slice yields an empty, zero-length curve.
    #[tracing::instrument(skip(waypoints), fields(waypoints = waypoints.len()))]
    pub fn build(waypoints: &[Waypoint], viewport: Viewport, opts: &CurveOpts) -> Self {
        let Some(first) = waypoints.first() else {
            return Self::default();
        };

        let anchors: Vec<Point> = waypoints
            .iter()
            .map(|wp| viewport.scale(wp.coordinates.to_point()))
            .collect();
        let segments: Vec<CubicBez> = anchors
            .windows(2)
            .map(|w| s_curve(w[0], w[1]))
            .collect();

        let n = opts.samples_per_segment.max(1);
        let mut points = Vec::with_capacity(1 + segments.len() * n);
        let mut cumulative = Vec::with_capacity(points.capacity());
        points.push(viewport.scale(first.coordinates.to_point()));
        cumulative.push(0.0);

        let mut prev = points[0];
        let mut acc = 0.0;
        for seg in &segments {
            for i in 1..=n {
                // Segment ends are pushed verbatim so waypoints are hit exactly.
                let p = if i == n {
                    seg.p3
                } else {
                    seg.eval(i as f64 / n as f64)
                };
                acc += prev.distance(p);
                points.push(p);
                cumulative.push(acc);
                prev = p;
            }
        }

        tracing::debug!(length = acc, samples = points.len(), "built path curve");
        Self {
            segments,
            points,
            cumulative,
        }
    }

    /// `true` when built from zero waypoints.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total arc length in viewport units.
    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// The cubic segments, one per consecutive waypoint pair.
    pub fn segments(&self) -> &[CubicBez] {
        &self.segments
    }

    /// Start point (the first waypoint), if any.
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// End point (the last waypoint), if any.
    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Error with [`FlightpathError::DegenerateGeometry`] when there is nothing to draw.
    pub fn ensure_renderable(&self) -> FlightpathResult<()> {
        if self.is_empty() {
            return Err(FlightpathError::degenerate("curve has no waypoints"));
        }
        if self.length() <= 0.0 {
            return Err(FlightpathError::degenerate("curve has zero length"));
        }
        Ok(())
    }

    /// Point at absolute arc length `s` (clamped to `[0, length]`).
    pub fn point_at_length(&self, s: f64) -> Option<Point> {
        let first = *self.points.first()?;
        let last = *self.points.last()?;
        let total = self.length();
        if s.is_nan() || s <= 0.0 || total <= 0.0 {
            return Some(first);
        }
        if s >= total {
            return Some(last);
        }

        // cumulative[0] == 0 < s < total == cumulative[last], so 1 <= idx < len.
        let idx = self.cumulative.partition_point(|&c| c < s);
        let (c0, c1) = (self.cumulative[idx - 1], self.cumulative[idx]);
        let (a, b) = (self.points[idx - 1], self.points[idx]);
        let span = c1 - c0;
        if span <= 0.0 {
            return Some(b);
        }
        Some(a.lerp(b, (s - c0) / span))
    }

    /// Point at arc-length fraction `f` (clamped to `[0, 1]`).
    pub fn point_at_fraction(&self, f: f64) -> Option<Point> {
        self.point_at_length(fraction(f) * self.length())
    }

    /// Stroke dash offset that reveals the first `progress` fraction of the curve.
    pub fn dash_offset(&self, progress: f64) -> f64 {
        self.length() * (1.0 - fraction(progress))
    }

    /// The exact cubic geometry as a `kurbo` path.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some(start) = self.start() else {
            return path;
        };
        path.move_to(start);
        for seg in &self.segments {
            path.curve_to(seg.p1, seg.p2, seg.p3);
        }
        path
    }

    /// SVG `d` attribute for the curve; empty for an empty curve.
    pub fn svg_path_data(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        self.to_bez_path().to_svg()
    }
}

fn s_curve(p0: Point, p3: Point) -> CubicBez {
    let mid_y = p0.y + (p3.y - p0.y) / 2.0;
    CubicBez::new(p0, Point::new(p0.x, mid_y), Point::new(p3.x, mid_y), p3)
}

pub(crate) fn fraction(f: f64) -> f64 {
    if f.is_nan() { 0.0 } else { clamp01(f) }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/curve.rs"]
mod tests;
