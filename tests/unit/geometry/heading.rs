use super::*;
use crate::foundation::core::Viewport;
use crate::geometry::curve::CurveOpts;
use crate::geometry::waypoint::{Waypoint, default_route};

fn curve(from: (f64, f64), to: (f64, f64)) -> PathCurve {
    let route = vec![
        Waypoint::new("a", "A", from.0, from.1),
        Waypoint::new("b", "B", to.0, to.1),
    ];
    PathCurve::build(
        &route,
        Viewport::new(100.0, 100.0).unwrap(),
        &CurveOpts::default(),
    )
}

#[test]
fn horizontal_line_heads_along_x_with_offset() {
    let c = curve((0.0, 50.0), (100.0, 50.0));
    let deg = tangent_at_fraction(&c, 0.0, &HeadingOpts::default()).unwrap();
    assert!((deg - -25.0).abs() < 1e-9);
}

#[test]
fn downward_line_heads_along_y_with_offset() {
    let c = curve((50.0, 0.0), (50.0, 100.0));
    let deg = tangent_at_fraction(&c, 0.5, &HeadingOpts::default()).unwrap();
    assert!((deg - 65.0).abs() < 1e-9);
}

#[test]
fn end_of_curve_has_no_tangent() {
    let c = curve((0.0, 50.0), (100.0, 50.0));
    assert_eq!(tangent_at_fraction(&c, 1.0, &HeadingOpts::default()), None);
    assert_eq!(
        tangent_at_fraction(&PathCurve::default(), 0.5, &HeadingOpts::default()),
        None
    );
}

#[test]
fn look_ahead_is_clamped_near_the_end() {
    let c = curve((0.0, 50.0), (100.0, 50.0));
    // 95 units along a 100 unit line: probe is clamped to the end, still 5 units ahead.
    let deg = tangent_at_fraction(&c, 0.95, &HeadingOpts::default()).unwrap();
    assert!((deg - -25.0).abs() < 1e-9);
}

#[test]
fn tracker_keeps_heading_at_rest() {
    let c = curve((50.0, 0.0), (50.0, 100.0));
    let mut tracker = HeadingTracker::default();
    let moving = tracker.update(&c, 0.2);
    assert!((moving - 65.0).abs() < 1e-9);
    assert_eq!(tracker.update(&c, 1.0), moving);
    assert_eq!(tracker.heading(), moving);
}

#[test]
fn tracker_follows_default_route() {
    let route = default_route();
    let c = PathCurve::build(
        &route,
        Viewport::new(1280.0, 720.0).unwrap(),
        &CurveOpts::default(),
    );
    let mut tracker = HeadingTracker::default();
    // First leg runs right and down (intro 50/18 -> rishikesh 80/32).
    let deg = tracker.update(&c, 0.0);
    assert!(deg > -25.0 && deg < 65.0);
}
