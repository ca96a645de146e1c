//! Flightpath animates a plane sprite along a curved multi-stop route.
//!
//! The crate has two faces:
//!
//! - A keyframe editor model ([`EditorSession`]) with timeline playback, interpolation and a
//!   JSON [`AnimationDocument`] codec.
//! - A scroll-driven route animator ([`SiteAnimator`]) that maps page scroll onto the curve,
//!   the progress dash and the sprite heading.
//!
//! Both share the same geometry: waypoints in percent coordinates are scaled into a
//! [`Viewport`] and joined by cubic segments into a [`PathCurve`] that can be sampled by arc
//! length.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod document;
pub(crate) mod geometry;
pub(crate) mod scene;
pub(crate) mod session;

pub use crate::foundation::core::{BezPath, CubicBez, Point, Vec2, Viewport};
pub use crate::foundation::error::{FlightpathError, FlightpathResult};
pub use crate::foundation::ids::KeyframeId;

pub use crate::animation::interp::{PoseSample, pose_at};
pub use crate::animation::keyframe::Keyframe;
pub use crate::animation::playback::{
    Playback, PlaybackDriver, PlaybackOpts, PlaybackSpeed, TIME_MAX, TickControl, Ticker,
};
pub use crate::animation::pose::{Lerp, Pose, PoseUpdate};
pub use crate::animation::store::KeyframeStore;
pub use crate::document::codec::{
    AnimationDocument, DEFAULT_DURATION_SECS, DEFAULT_FPS, DOCUMENT_VERSION, deserialize,
    serialize,
};
pub use crate::geometry::curve::{CurveOpts, PathCurve};
pub use crate::geometry::heading::{HeadingOpts, HeadingTracker, tangent_at_fraction};
pub use crate::geometry::waypoint::{
    Coordinates, Testimonial, Waypoint, default_route, load_waypoints, validate_waypoints,
    waypoint_progress,
};
pub use crate::scene::preview::render_preview_svg;
pub use crate::scene::scroll::{
    MarkerState, ScrollMetrics, ScrollState, SiteAnimator, SiteFrame, dot_scroll_target,
    marker_state, scroll_state,
};
pub use crate::scene::sprite::{SpriteOpts, SpriteTransform};
pub use crate::session::editor::{CURRENT_KEYFRAME_TOLERANCE, EditorOpts, EditorSession};
