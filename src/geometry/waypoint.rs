use crate::foundation::core::Point;
use crate::foundation::error::{FlightpathError, FlightpathResult};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Percentage coordinates of a waypoint (0..100 of viewport width / height).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinates {
    /// Horizontal position, percent of viewport width.
    pub x: f64,
    /// Vertical position, percent of viewport height.
    pub y: f64,
}

impl Coordinates {
    /// Coordinates as a point in percentage space.
    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Traveller quote shown next to a stop.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Testimonial {
    /// Quote text.
    pub text: String,
    /// Attribution.
    pub author: String,
}

/// A named stop the path visits, in traversal order.
///
/// Only `coordinates` participates in geometry; the rest is display metadata.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    /// Unique id within a route.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Region label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Short highlight tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
    /// Position as viewport percentages.
    pub coordinates: Coordinates,
    /// Optional quote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonial: Option<Testimonial>,
}

impl Waypoint {
    /// Minimal waypoint with geometry and a name only.
    pub fn new(id: impl Into<String>, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            region: None,
            description: None,
            highlights: Vec::new(),
            coordinates: Coordinates { x, y },
            testimonial: None,
        }
    }

    fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_owned());
        self
    }

    fn with_highlights(mut self, highlights: &[&str]) -> Self {
        self.highlights = highlights.iter().map(|h| (*h).to_owned()).collect();
        self
    }

    fn with_testimonial(mut self, text: &str, author: &str) -> Self {
        self.testimonial = Some(Testimonial {
            text: text.to_owned(),
            author: author.to_owned(),
        });
        self
    }
}

/// The built-in six-stop route used by the landing page and the editor preview.
pub fn default_route() -> Vec<Waypoint> {
    vec![
        Waypoint::new("intro", "Start Your Journey", 50.0, 18.0).with_region("NIHAR Holidays"),
        Waypoint::new("rishikesh", "Rishikesh", 80.0, 32.0)
            .with_region("Uttarakhand, India")
            .with_highlights(&["Ganga Aarti", "River Rafting", "Yoga Ashrams"])
            .with_testimonial(
                "The evening Aarti at Parmarth Niketan changed my life.",
                "Sarah J.",
            ),
        Waypoint::new("munnar", "Munnar", 20.0, 46.0)
            .with_region("Kerala, India")
            .with_highlights(&["Tea Gardens", "Eravikulam Park", "Tree Houses"])
            .with_testimonial(
                "Waking up above the clouds in a treehouse was magical.",
                "Rahul & Priya",
            ),
        Waypoint::new("jaipur", "Jaipur", 75.0, 60.0)
            .with_region("Rajasthan, India")
            .with_highlights(&["Amber Fort", "Hawa Mahal", "City Palace"])
            .with_testimonial(
                "Felt like royalty. The guided heritage walk was the highlight.",
                "Amit V.",
            ),
        Waypoint::new("ladakh", "Leh Ladakh", 30.0, 75.0)
            .with_region("Himalayas, India")
            .with_highlights(&["Pangong Lake", "Nubra Valley", "Magnetic Hill"]),
        Waypoint::new("varanasi", "Varanasi", 60.0, 92.0).with_region("Uttar Pradesh, India"),
    ]
}

/// Check id uniqueness and coordinate ranges of a route.
pub fn validate_waypoints(waypoints: &[Waypoint]) -> FlightpathResult<()> {
    let mut ids = HashSet::<&str>::new();
    for (i, wp) in waypoints.iter().enumerate() {
        if !ids.insert(wp.id.as_str()) {
            return Err(FlightpathError::validation(format!(
                "$[{i}].id: duplicate waypoint id '{}'",
                wp.id
            )));
        }
        for (axis, v) in [("x", wp.coordinates.x), ("y", wp.coordinates.y)] {
            if !v.is_finite() || !(0.0..=100.0).contains(&v) {
                return Err(FlightpathError::validation(format!(
                    "$[{i}].coordinates.{axis}: must be within 0..=100, got {v}"
                )));
            }
        }
    }
    Ok(())
}

/// Load and validate a route from a JSON array on disk.
pub fn load_waypoints(path: impl AsRef<Path>) -> FlightpathResult<Vec<Waypoint>> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| {
        FlightpathError::validation(format!("open waypoints JSON '{}': {e}", path.display()))
    })?;
    let waypoints: Vec<Waypoint> = serde_json::from_reader(BufReader::new(f))
        .map_err(|e| FlightpathError::validation(format!("parse waypoints JSON: {e}")))?;
    validate_waypoints(&waypoints)?;
    Ok(waypoints)
}

/// The `pathProgress` value a marker represents: `index / (count - 1)`.
///
/// A single-stop route maps its only marker to `0`.
pub fn waypoint_progress(index: usize, count: usize) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    index.min(count - 1) as f64 / (count - 1) as f64
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/waypoint.rs"]
mod tests;
