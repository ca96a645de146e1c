use super::*;
use crate::geometry::waypoint::default_route;

fn vp(w: f64, h: f64) -> Viewport {
    Viewport::new(w, h).unwrap()
}

fn line(from: (f64, f64), to: (f64, f64)) -> Vec<Waypoint> {
    vec![
        Waypoint::new("a", "A", from.0, from.1),
        Waypoint::new("b", "B", to.0, to.1),
    ]
}

#[test]
fn empty_route_builds_empty_curve() {
    let curve = PathCurve::build(&[], vp(800.0, 600.0), &CurveOpts::default());
    assert!(curve.is_empty());
    assert_eq!(curve.length(), 0.0);
    assert_eq!(curve.point_at_fraction(0.5), None);
    assert_eq!(curve.svg_path_data(), "");
    assert!(matches!(
        curve.ensure_renderable(),
        Err(FlightpathError::DegenerateGeometry(_))
    ));
}

#[test]
fn single_waypoint_is_a_point() {
    let route = vec![Waypoint::new("a", "A", 25.0, 50.0)];
    let viewport = vp(400.0, 200.0);
    let curve = PathCurve::build(&route, viewport, &CurveOpts::default());
    let p = viewport.scale(Point::new(25.0, 50.0));
    assert_eq!(curve.point_at_fraction(0.0), Some(p));
    assert_eq!(curve.point_at_fraction(1.0), Some(p));
    assert!(curve.ensure_renderable().is_err());
}

#[test]
fn endpoints_are_exact_on_default_route() {
    let route = default_route();
    for viewport in [vp(800.0, 600.0), vp(1920.0, 1080.0), vp(375.0, 812.0)] {
        let curve = PathCurve::build(&route, viewport, &CurveOpts::default());
        let first = viewport.scale(route[0].coordinates.to_point());
        let last = viewport.scale(route[route.len() - 1].coordinates.to_point());
        assert_eq!(curve.point_at_fraction(0.0), Some(first));
        assert_eq!(curve.point_at_fraction(1.0), Some(last));
        assert_eq!(curve.point_at_fraction(-3.0), Some(first));
        assert_eq!(curve.point_at_fraction(7.0), Some(last));
        curve.ensure_renderable().unwrap();
    }
}

#[test]
fn control_points_share_midpoint_y() {
    let route = line((10.0, 20.0), (90.0, 60.0));
    let curve = PathCurve::build(&route, vp(100.0, 100.0), &CurveOpts::default());
    let seg = curve.segments()[0];
    assert_eq!(seg.p0, Point::new(10.0, 20.0));
    assert_eq!(seg.p1, Point::new(10.0, 40.0));
    assert_eq!(seg.p2, Point::new(90.0, 40.0));
    assert_eq!(seg.p3, Point::new(90.0, 60.0));
}

#[test]
fn straight_segment_samples_by_arc_length() {
    // Equal y on both ends degenerates the S-curve into a horizontal line.
    let route = line((0.0, 50.0), (100.0, 50.0));
    let curve = PathCurve::build(&route, vp(200.0, 100.0), &CurveOpts::default());
    assert!((curve.length() - 200.0).abs() < 1e-9);
    let mid = curve.point_at_fraction(0.5).unwrap();
    assert!((mid.y - 50.0).abs() < 1e-9);
    // The cubic is not arc-length parameterised, but point_at_fraction is.
    assert!((mid.x - 100.0).abs() < 1e-6);
    let quarter = curve.point_at_length(50.0).unwrap();
    assert!((quarter.x - 50.0).abs() < 1e-6);
}

#[test]
fn length_converges_with_resolution() {
    let route = default_route();
    let viewport = vp(1000.0, 800.0);
    let coarse = PathCurve::build(&route, viewport, &CurveOpts { samples_per_segment: 8 });
    let fine = PathCurve::build(&route, viewport, &CurveOpts { samples_per_segment: 512 });
    assert!(coarse.length() <= fine.length());
    assert!((fine.length() - coarse.length()) / fine.length() < 0.02);
}

#[test]
fn svg_path_data_starts_with_move_to() {
    let route = line((0.0, 0.0), (100.0, 100.0));
    let curve = PathCurve::build(&route, vp(100.0, 100.0), &CurveOpts::default());
    let d = curve.svg_path_data();
    assert!(d.starts_with('M'));
    assert!(d.contains('C'));
}

#[test]
fn dash_offset_tracks_progress() {
    let route = line((0.0, 50.0), (100.0, 50.0));
    let curve = PathCurve::build(&route, vp(100.0, 100.0), &CurveOpts::default());
    assert!((curve.dash_offset(0.0) - curve.length()).abs() < 1e-12);
    assert_eq!(curve.dash_offset(1.0), 0.0);
    assert!((curve.dash_offset(0.25) - curve.length() * 0.75).abs() < 1e-9);
}

#[test]
fn sampling_is_pure() {
    let curve = PathCurve::build(&default_route(), vp(800.0, 600.0), &CurveOpts::default());
    let a = curve.point_at_fraction(0.37);
    let b = curve.point_at_fraction(0.37);
    assert_eq!(a, b);
    assert_eq!(curve.point_at_fraction(f64::NAN), curve.start());
}
