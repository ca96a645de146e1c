use super::*;
use crate::foundation::core::Viewport;
use crate::geometry::curve::CurveOpts;
use crate::geometry::waypoint::Waypoint;

fn flat_curve() -> PathCurve {
    let route = vec![
        Waypoint::new("a", "A", 0.0, 50.0),
        Waypoint::new("b", "B", 100.0, 50.0),
    ];
    PathCurve::build(
        &route,
        Viewport::new(200.0, 100.0).unwrap(),
        &CurveOpts::default(),
    )
}

#[test]
fn sprite_hovers_above_path_point() {
    let curve = flat_curve();
    let t = SpriteTransform::from_pose(&curve, &Pose::NEUTRAL, &SpriteOpts::default()).unwrap();
    assert_eq!((t.anchor_x, t.anchor_y), (0.0, 50.0));
    assert_eq!((t.x, t.y), (0.0, 15.0));
}

#[test]
fn flips_multiply_into_scale() {
    let curve = flat_curve();
    let pose = Pose {
        path_progress: 1.0,
        scale_x: -1.0,
        scale: 1.5,
        rotation_z: 30.0,
        ..Pose::NEUTRAL
    };
    let t = SpriteTransform::from_pose(&curve, &pose, &SpriteOpts::default()).unwrap();
    assert_eq!(t.anchor_x, 200.0);
    assert_eq!(t.scale_x, -1.5);
    assert_eq!(t.scale_y, 1.5);
    assert_eq!(
        t.css_transform(),
        "translate(200px, 15px) rotateZ(30deg) rotateX(0deg) rotateY(0deg) scale(-1.5, 1.5)"
    );
    assert_eq!(t.svg_transform(), "translate(200 15) rotate(30) scale(-1.5 1.5)");
}

#[test]
fn empty_curve_has_no_sprite() {
    assert!(
        SpriteTransform::from_pose(&PathCurve::default(), &Pose::NEUTRAL, &SpriteOpts::default())
            .is_none()
    );
}
