use crate::animation::interp::PoseSample;
use crate::animation::keyframe::Keyframe;
use crate::animation::playback::{Playback, PlaybackOpts, PlaybackSpeed};
use crate::animation::pose::PoseUpdate;
use crate::animation::store::KeyframeStore;
use crate::document::codec::{self, AnimationDocument, DEFAULT_DURATION_SECS, DEFAULT_FPS};
use crate::foundation::core::Viewport;
use crate::foundation::error::{FlightpathError, FlightpathResult};
use crate::foundation::ids::KeyframeId;
use crate::geometry::curve::{CurveOpts, PathCurve};
use crate::geometry::waypoint::{Waypoint, default_route, waypoint_progress};
use crate::scene::sprite::{SpriteOpts, SpriteTransform};

/// Distance (in time percent) within which a keyframe counts as "current".
pub const CURRENT_KEYFRAME_TOLERANCE: f64 = 0.1;

/// Initial settings for an [`EditorSession`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorOpts {
    /// Export duration in seconds.
    pub duration_secs: f64,
    /// Export frame rate.
    pub fps: f64,
    /// Initial playback speed.
    pub speed: PlaybackSpeed,
    /// Canvas size.
    pub viewport: Viewport,
    /// Curve flattening resolution.
    pub curve: CurveOpts,
    /// Plane placement.
    pub sprite: SpriteOpts,
    /// Tick cadence.
    pub playback: PlaybackOpts,
}

impl Default for EditorOpts {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            fps: DEFAULT_FPS,
            speed: PlaybackSpeed::default(),
            viewport: Viewport::default(),
            curve: CurveOpts::default(),
            sprite: SpriteOpts::default(),
            playback: PlaybackOpts::default(),
        }
    }
}

/// In-memory state of the keyframe editor.
///
/// The interactive surface: guarded actions (deleting the last keyframe, editing without a
/// selection) are ignored with a warning where the UI would have disabled them, and reported as
/// errors where a caller asked explicitly.
#[derive(Clone, Debug)]
pub struct EditorSession {
    store: KeyframeStore,
    selected: Option<KeyframeId>,
    playback: Playback,
    duration_secs: f64,
    fps: f64,
    waypoints: Vec<Waypoint>,
    curve: PathCurve,
    opts: EditorOpts,
}

impl EditorSession {
    /// Session on the built-in route.
    pub fn new(opts: EditorOpts) -> Self {
        Self::with_waypoints(default_route(), opts)
    }

    /// Session on a custom route.
    pub fn with_waypoints(waypoints: Vec<Waypoint>, opts: EditorOpts) -> Self {
        let store = KeyframeStore::new();
        let selected = store.first().map(|k| k.id.clone());
        let curve = PathCurve::build(&waypoints, opts.viewport, &opts.curve);
        Self {
            store,
            selected,
            playback: Playback::new(opts.speed, &opts.playback),
            duration_secs: opts.duration_secs,
            fps: opts.fps,
            waypoints,
            curve,
            opts,
        }
    }

    /// The keyframe store.
    pub fn store(&self) -> &KeyframeStore {
        &self.store
    }

    /// Selected keyframe id.
    pub fn selected(&self) -> Option<&KeyframeId> {
        self.selected.as_ref()
    }

    /// Playback state (current time lives here).
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Current time, percent of duration.
    pub fn time(&self) -> f64 {
        self.playback.time()
    }

    /// Export duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Export frame rate.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Canvas curve.
    pub fn curve(&self) -> &PathCurve {
        &self.curve
    }

    /// Route shown on the canvas.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Interpolated pose at the current time.
    pub fn current_frame(&self) -> PoseSample {
        self.store.pose_at(self.time())
    }

    /// Plane placement for the current frame; `None` on an empty route.
    pub fn current_sprite(&self) -> Option<SpriteTransform> {
        SpriteTransform::from_pose(&self.curve, &self.current_frame().pose, &self.opts.sprite)
    }

    /// Resize the canvas and rebuild the curve.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.opts.viewport = viewport;
        self.curve = PathCurve::build(&self.waypoints, viewport, &self.opts.curve);
    }

    /// Add a keyframe at the current time and select it.
    pub fn add_keyframe(&mut self) -> FlightpathResult<KeyframeId> {
        let id = self.store.insert_at(self.time())?;
        self.selected = Some(id.clone());
        Ok(id)
    }

    /// Delete the selected keyframe; selection moves to its predecessor.
    ///
    /// With one keyframe left (or nothing selected) this is a no-op and returns `None`.
    pub fn delete_selected(&mut self) -> Option<Keyframe> {
        let id = self.selected.clone()?;
        let idx = self.store.index_of(&id)?;
        match self.store.delete_by_id(&id) {
            Ok(removed) => {
                let next = idx.saturating_sub(1);
                self.selected = self.store.keyframes().get(next).map(|k| k.id.clone());
                Some(removed)
            }
            Err(FlightpathError::CannotDeleteLastKeyframe) => {
                tracing::warn!(%id, "ignoring delete of the last keyframe");
                None
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "delete failed");
                None
            }
        }
    }

    /// Delete a specific keyframe, surfacing the store guard as an error.
    pub fn delete_keyframe(&mut self, id: &KeyframeId) -> FlightpathResult<Keyframe> {
        let idx = self.store.index_of(id);
        let removed = self.store.delete_by_id(id)?;
        if self.selected.as_ref() == Some(id) {
            let next = idx.unwrap_or(0).saturating_sub(1);
            self.selected = self.store.keyframes().get(next).map(|k| k.id.clone());
        }
        Ok(removed)
    }

    /// Select a keyframe and seek to its time.
    pub fn select(&mut self, id: &KeyframeId) -> FlightpathResult<()> {
        let time = self
            .store
            .select_by_id(id)
            .map(|k| k.time)
            .ok_or_else(|| FlightpathError::unknown_keyframe(id.as_str()))?;
        self.selected = Some(id.clone());
        self.playback.seek(time);
        Ok(())
    }

    /// Select the keyframe nearest to the current time.
    pub fn select_nearest(&mut self) -> Option<KeyframeId> {
        let id = self.store.select_nearest(self.time())?.id.clone();
        self.selected = Some(id.clone());
        Some(id)
    }

    /// Edit the selected keyframe. A `pathProgress` edit seeks to the keyframe's time.
    pub fn update_selected(&mut self, update: &PoseUpdate) -> FlightpathResult<()> {
        let Some(id) = self.selected.clone() else {
            tracing::warn!("no keyframe selected; add a keyframe first");
            return Err(FlightpathError::validation("no keyframe selected"));
        };
        self.store.update(&id, update)?;
        if update.path_progress.is_some()
            && let Some(k) = self.store.select_by_id(&id)
        {
            self.playback.seek(k.time);
        }
        Ok(())
    }

    /// Scrub the timeline (clamped to `0..=100`).
    pub fn seek(&mut self, time: f64) {
        self.playback.seek(time);
    }

    /// Wheel step on the timeline: one percent per notch.
    pub fn nudge(&mut self, notches: f64) {
        if notches.is_nan() || notches == 0.0 {
            return;
        }
        self.playback.nudge(notches.signum());
    }

    /// Jump to time `0`.
    pub fn rewind(&mut self) {
        self.playback.rewind();
    }

    /// Jump to time `100`.
    pub fn jump_to_end(&mut self) {
        self.playback.jump_to_end();
    }

    /// Click on a route marker: seek so the current time maps to that marker's progress.
    pub fn seek_to_waypoint(&mut self, index: usize) {
        self.seek(waypoint_progress(index, self.waypoints.len()) * 100.0);
    }

    /// Global play/pause command. Returns `true` if now playing.
    pub fn toggle_playback(&mut self) -> bool {
        self.playback.toggle()
    }

    /// One playback tick.
    pub fn tick(&mut self) -> bool {
        self.playback.tick()
    }

    /// Change playback speed.
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.playback.set_speed(speed);
    }

    /// Change export duration (seconds, `> 0`).
    pub fn set_duration(&mut self, secs: f64) -> FlightpathResult<()> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(FlightpathError::validation(format!(
                "duration must be > 0 seconds, got {secs}"
            )));
        }
        self.duration_secs = secs;
        Ok(())
    }

    /// Change export frame rate (`> 0`).
    pub fn set_fps(&mut self, fps: f64) -> FlightpathResult<()> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(FlightpathError::validation(format!(
                "fps must be > 0, got {fps}"
            )));
        }
        self.fps = fps;
        Ok(())
    }

    /// `true` when `key` sits at the current time.
    pub fn is_current(&self, key: &Keyframe) -> bool {
        (key.time - self.time()).abs() < CURRENT_KEYFRAME_TOLERANCE
    }

    /// Snapshot the session as a document.
    pub fn document(&self) -> AnimationDocument {
        AnimationDocument::from_store(&self.store, self.duration_secs, self.fps)
    }

    /// Export the session as pretty JSON.
    pub fn export_json(&self) -> FlightpathResult<String> {
        codec::serialize(&self.store, self.duration_secs, self.fps)
    }

    /// Replace keyframes and metadata from JSON. On error nothing changes.
    pub fn import_json(&mut self, text: &str) -> FlightpathResult<()> {
        let doc = codec::deserialize(text)?;
        self.load_document(&doc)
    }

    /// Replace keyframes and metadata from a decoded document. On error nothing changes.
    pub fn load_document(&mut self, doc: &AnimationDocument) -> FlightpathResult<()> {
        let mut store = self.store.clone();
        store.replace_all(doc.keyframes.clone())?;
        self.store = store;
        self.duration_secs = doc.duration;
        self.fps = doc.fps;
        self.selected = self.store.first().map(|k| k.id.clone());
        tracing::debug!(keyframes = self.store.len(), "imported animation document");
        Ok(())
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorOpts::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
