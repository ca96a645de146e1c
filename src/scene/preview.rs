use crate::foundation::core::{Viewport, clamp01};
use crate::foundation::error::{FlightpathError, FlightpathResult};
use crate::geometry::curve::PathCurve;
use crate::geometry::waypoint::{Waypoint, waypoint_progress};
use crate::scene::sprite::{SpriteOpts, SpriteTransform};
use std::fmt::Write as _;

const GOLD: &str = "#D4AF37";

/// Standalone SVG of the editor canvas: base path, travelled overlay, markers and the plane.
///
/// Markers at or before `progress` are drawn as passed. Errors with
/// [`FlightpathError::DegenerateGeometry`] when the curve has nothing to draw.
pub fn render_preview_svg(
    curve: &PathCurve,
    waypoints: &[Waypoint],
    viewport: Viewport,
    sprite: Option<&SpriteTransform>,
    sprite_opts: &SpriteOpts,
    progress: f64,
) -> FlightpathResult<String> {
    curve.ensure_renderable()?;
    let mut out = String::new();
    write_svg(
        &mut out,
        curve,
        waypoints,
        viewport,
        sprite,
        sprite_opts,
        clamp01(progress),
    )
    .map_err(|e| FlightpathError::Other(anyhow::Error::new(e).context("write preview svg")))?;
    Ok(out)
}

fn write_svg(
    out: &mut String,
    curve: &PathCurve,
    waypoints: &[Waypoint],
    viewport: Viewport,
    sprite: Option<&SpriteTransform>,
    sprite_opts: &SpriteOpts,
    progress: f64,
) -> std::fmt::Result {
    let (w, h) = (viewport.width, viewport.height);
    let d = curve.svg_path_data();
    let len = curve.length();

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    writeln!(out, r##"  <rect width="100%" height="100%" fill="#0b0f19"/>"##)?;
    writeln!(
        out,
        r#"  <path d="{d}" fill="none" stroke="rgba(212,175,55,0.3)" stroke-width="4"/>"#
    )?;
    writeln!(
        out,
        r#"  <path d="{d}" fill="none" stroke="{GOLD}" stroke-width="4" stroke-linecap="round" stroke-dasharray="{len}" stroke-dashoffset="{}"/>"#,
        curve.dash_offset(progress)
    )?;

    for (i, wp) in waypoints.iter().enumerate() {
        let p = viewport.scale(wp.coordinates.to_point());
        let passed = progress >= waypoint_progress(i, waypoints.len());
        let fill = if passed { GOLD } else { "rgba(255,255,255,0.3)" };
        writeln!(
            out,
            r#"  <circle cx="{}" cy="{}" r="6" fill="{fill}"/>"#,
            p.x, p.y
        )?;
        writeln!(
            out,
            r#"  <text x="{}" y="{}" text-anchor="middle" font-size="12" fill="{GOLD}">{}</text>"#,
            p.x,
            p.y - 15.0,
            escape_xml(&wp.name)
        )?;
    }

    if let Some(s) = sprite {
        let half = sprite_opts.size / 2.0;
        writeln!(out, r#"  <g transform="{}">"#, s.svg_transform())?;
        // Arrow pointing up-left, matching the plane artwork's rest orientation.
        writeln!(
            out,
            r#"    <polygon points="{},{} {},{} {},{}" fill="white" stroke="{GOLD}"/>"#,
            -half,
            -half,
            half * 0.4,
            -half * 0.1,
            -half * 0.1,
            half * 0.4
        )?;
        writeln!(out, "  </g>")?;
        writeln!(
            out,
            r#"  <circle cx="{}" cy="{}" r="3" fill="red" opacity="0.5"/>"#,
            s.anchor_x, s.anchor_y
        )?;
    }

    writeln!(out, "</svg>")
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/preview.rs"]
mod tests;
