use crate::foundation::core::{Point, Viewport, clamp01};
use crate::geometry::curve::{CurveOpts, PathCurve};
use crate::geometry::heading::{HeadingOpts, HeadingTracker};
use crate::geometry::waypoint::Waypoint;

/// Page scroll measurements, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    /// Current vertical scroll offset.
    pub scroll_top: f64,
    /// Visible height; one destination section per viewport height.
    pub viewport_height: f64,
    /// Full scrollable document height.
    pub document_height: f64,
}

/// Scroll position mapped onto the story.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    /// Fraction of the scrollable range, `0..=1`.
    pub progress: f64,
    /// Index of the destination section in view.
    pub active_index: usize,
}

/// How a destination marker is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerState {
    /// Not reached yet.
    Upcoming,
    /// Already passed.
    Passed,
    /// The section in view.
    Current,
}

/// Map scroll metrics onto progress and the section in view.
///
/// A section is active once its top half has scrolled into view. Nothing scrollable maps to `0`.
pub fn scroll_state(metrics: &ScrollMetrics, waypoint_count: usize) -> ScrollState {
    let scrollable = metrics.document_height - metrics.viewport_height;
    let progress = if scrollable > 0.0 {
        clamp01(metrics.scroll_top / scrollable)
    } else {
        0.0
    };

    let vh = metrics.viewport_height;
    let section = if vh > 0.0 {
        ((metrics.scroll_top + vh * 0.5) / vh).floor().max(0.0) as usize
    } else {
        0
    };
    ScrollState {
        progress,
        active_index: section.min(waypoint_count.saturating_sub(1)),
    }
}

/// Scroll offset that brings section `index` into view (marker click).
pub fn dot_scroll_target(index: usize, viewport_height: f64) -> f64 {
    index as f64 * viewport_height
}

/// Marker style for waypoint `index` given the active section.
pub fn marker_state(index: usize, active_index: usize) -> MarkerState {
    match index.cmp(&active_index) {
        std::cmp::Ordering::Less => MarkerState::Passed,
        std::cmp::Ordering::Equal => MarkerState::Current,
        std::cmp::Ordering::Greater => MarkerState::Upcoming,
    }
}

/// One frame of the scroll-driven landing animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SiteFrame {
    /// Scroll mapping for this frame.
    pub scroll: ScrollState,
    /// Plane position, `None` when the route is empty.
    pub position: Option<Point>,
    /// Plane heading in degrees.
    pub heading_deg: f64,
    /// Dash offset for the travelled-path overlay.
    pub dash_offset: f64,
}

/// Landing-page animation: scroll progress drives the plane along the route.
#[derive(Clone, Debug)]
pub struct SiteAnimator {
    waypoints: Vec<Waypoint>,
    curve_opts: CurveOpts,
    curve: PathCurve,
    heading: HeadingTracker,
}

impl SiteAnimator {
    /// Lay the route out on `viewport`.
    pub fn new(
        waypoints: Vec<Waypoint>,
        viewport: Viewport,
        curve_opts: CurveOpts,
        heading_opts: HeadingOpts,
    ) -> Self {
        let curve = PathCurve::build(&waypoints, viewport, &curve_opts);
        Self {
            waypoints,
            curve_opts,
            curve,
            heading: HeadingTracker::new(heading_opts),
        }
    }

    /// Current curve.
    pub fn curve(&self) -> &PathCurve {
        &self.curve
    }

    /// Rebuild the curve for a new viewport size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.curve = PathCurve::build(&self.waypoints, viewport, &self.curve_opts);
    }

    /// Advance to the given scroll position.
    pub fn frame(&mut self, metrics: &ScrollMetrics) -> SiteFrame {
        let scroll = scroll_state(metrics, self.waypoints.len());
        let heading_deg = self.heading.update(&self.curve, scroll.progress);
        SiteFrame {
            scroll,
            position: self.curve.point_at_fraction(scroll.progress),
            heading_deg,
            dash_offset: self.curve.dash_offset(scroll.progress),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scroll.rs"]
mod tests;
