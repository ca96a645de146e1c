use super::*;
use crate::geometry::waypoint::default_route;

fn metrics(scroll_top: f64) -> ScrollMetrics {
    // Six sections of 800px each.
    ScrollMetrics {
        scroll_top,
        viewport_height: 800.0,
        document_height: 4800.0,
    }
}

#[test]
fn progress_spans_scrollable_range() {
    assert_eq!(scroll_state(&metrics(0.0), 6).progress, 0.0);
    assert_eq!(scroll_state(&metrics(2000.0), 6).progress, 0.5);
    assert_eq!(scroll_state(&metrics(4000.0), 6).progress, 1.0);
    assert_eq!(scroll_state(&metrics(9000.0), 6).progress, 1.0);
    assert_eq!(scroll_state(&metrics(-50.0), 6).progress, 0.0);
}

#[test]
fn active_section_switches_at_half_height() {
    assert_eq!(scroll_state(&metrics(399.0), 6).active_index, 0);
    assert_eq!(scroll_state(&metrics(400.0), 6).active_index, 1);
    assert_eq!(scroll_state(&metrics(4000.0), 6).active_index, 5);
    assert_eq!(scroll_state(&metrics(99_999.0), 6).active_index, 5);
}

#[test]
fn unscrollable_page_stays_at_start() {
    let m = ScrollMetrics {
        scroll_top: 0.0,
        viewport_height: 800.0,
        document_height: 600.0,
    };
    let s = scroll_state(&m, 6);
    assert_eq!(s.progress, 0.0);
    assert_eq!(s.active_index, 0);
    assert_eq!(scroll_state(&metrics(1200.0), 0).active_index, 0);
}

#[test]
fn marker_click_targets_section_top() {
    assert_eq!(dot_scroll_target(0, 800.0), 0.0);
    assert_eq!(dot_scroll_target(3, 800.0), 2400.0);
}

#[test]
fn markers_classify_against_active_index() {
    assert_eq!(marker_state(0, 2), MarkerState::Passed);
    assert_eq!(marker_state(2, 2), MarkerState::Current);
    assert_eq!(marker_state(4, 2), MarkerState::Upcoming);
}

#[test]
fn animator_walks_the_route() {
    let route = default_route();
    let viewport = Viewport::new(1280.0, 800.0).unwrap();
    let first = viewport.scale(route[0].coordinates.to_point());
    let last = viewport.scale(route[5].coordinates.to_point());
    let mut site = SiteAnimator::new(
        route,
        viewport,
        CurveOpts::default(),
        HeadingOpts::default(),
    );

    let start = site.frame(&metrics(0.0));
    assert_eq!(start.position, Some(first));
    assert!((start.dash_offset - site.curve().length()).abs() < 1e-9);

    let mid = site.frame(&metrics(2000.0));
    let end = site.frame(&metrics(4000.0));
    assert_eq!(end.position, Some(last));
    assert_eq!(end.dash_offset, 0.0);
    // At the very end the tangent is undefined and the heading is held.
    assert_eq!(end.heading_deg, mid.heading_deg);
    assert_eq!(end.scroll.active_index, 5);
}

#[test]
fn resize_rescales_the_curve() {
    let mut site = SiteAnimator::new(
        default_route(),
        Viewport::new(800.0, 600.0).unwrap(),
        CurveOpts::default(),
        HeadingOpts::default(),
    );
    let small = site.curve().length();
    site.resize(Viewport::new(1600.0, 1200.0).unwrap());
    assert!((site.curve().length() - 2.0 * small).abs() < 1e-6 * small);
}
