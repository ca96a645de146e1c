use super::*;
use crate::animation::pose::Pose;
use crate::geometry::curve::CurveOpts;
use crate::geometry::waypoint::default_route;

#[test]
fn preview_contains_paths_markers_and_plane() {
    let route = default_route();
    let viewport = Viewport::new(800.0, 600.0).unwrap();
    let curve = PathCurve::build(&route, viewport, &CurveOpts::default());
    let pose = Pose {
        path_progress: 0.5,
        ..Pose::NEUTRAL
    };
    let opts = SpriteOpts::default();
    let sprite = SpriteTransform::from_pose(&curve, &pose, &opts).unwrap();
    let svg = render_preview_svg(&curve, &route, viewport, Some(&sprite), &opts, 0.5).unwrap();

    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<path").count(), 2);
    assert_eq!(svg.matches("<text").count(), route.len());
    assert!(svg.contains("<polygon"));
    assert!(svg.contains(&sprite.svg_transform()));
    assert!(svg.contains("Leh Ladakh"));
}

#[test]
fn marker_names_are_escaped() {
    let route = vec![
        Waypoint::new("a", "Tom & Jerry <3", 10.0, 10.0),
        Waypoint::new("b", "B", 90.0, 90.0),
    ];
    let viewport = Viewport::new(100.0, 100.0).unwrap();
    let curve = PathCurve::build(&route, viewport, &CurveOpts::default());
    let svg = render_preview_svg(&curve, &route, viewport, None, &SpriteOpts::default(), 0.0)
        .unwrap();
    assert!(svg.contains("Tom &amp; Jerry &lt;3"));
    assert!(!svg.contains("<polygon"));
}

#[test]
fn degenerate_curves_are_not_drawn() {
    let viewport = Viewport::new(100.0, 100.0).unwrap();
    let err = render_preview_svg(
        &PathCurve::default(),
        &[],
        viewport,
        None,
        &SpriteOpts::default(),
        0.0,
    )
    .unwrap_err();
    assert!(matches!(err, FlightpathError::DegenerateGeometry(_)));
}
