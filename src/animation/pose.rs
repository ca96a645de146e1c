/// Interpolation contract for pose value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t` (normally in `[0, 1]`).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// Fully resolved sprite pose.
///
/// `scale_x` / `scale_y` are flip flags authored as exactly `-1` or `1`, but they interpolate
/// like every other field, so mid-transition values are fractional.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    /// Arc-length fraction along the path, `0..=1`.
    pub path_progress: f64,
    /// Roll in degrees.
    pub rotation_z: f64,
    /// Pitch in degrees.
    #[serde(default)]
    pub rotation_x: f64,
    /// Yaw in degrees.
    #[serde(default)]
    pub rotation_y: f64,
    /// Horizontal flip flag.
    #[serde(default = "unit")]
    pub scale_x: f64,
    /// Vertical flip flag.
    #[serde(default = "unit")]
    pub scale_y: f64,
    /// Overall scale multiplier.
    #[serde(default = "unit")]
    pub scale: f64,
}

fn unit() -> f64 {
    1.0
}

impl Pose {
    /// Start of path, no rotation, unflipped, unit scale.
    pub const NEUTRAL: Self = Self {
        path_progress: 0.0,
        rotation_z: 0.0,
        rotation_x: 0.0,
        rotation_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        scale: 1.0,
    };
}

impl Pose {
    pub(crate) fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("pathProgress", self.path_progress),
            ("rotationZ", self.rotation_z),
            ("rotationX", self.rotation_x),
            ("rotationY", self.rotation_y),
            ("scaleX", self.scale_x),
            ("scaleY", self.scale_y),
            ("scale", self.scale),
        ]
        .into_iter()
        .find_map(|(name, v)| (!v.is_finite()).then_some(name))
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl Lerp for Pose {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            path_progress: f64::lerp(&a.path_progress, &b.path_progress, t),
            rotation_z: f64::lerp(&a.rotation_z, &b.rotation_z, t),
            rotation_x: f64::lerp(&a.rotation_x, &b.rotation_x, t),
            rotation_y: f64::lerp(&a.rotation_y, &b.rotation_y, t),
            scale_x: f64::lerp(&a.scale_x, &b.scale_x, t),
            scale_y: f64::lerp(&a.scale_y, &b.scale_y, t),
            scale: f64::lerp(&a.scale, &b.scale, t),
        }
    }
}

/// Partial edit of a keyframe; `None` fields are left alone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PoseUpdate {
    /// New time position (`0..=100`).
    pub time: Option<f64>,
    /// New path progress.
    pub path_progress: Option<f64>,
    /// New roll.
    pub rotation_z: Option<f64>,
    /// New pitch.
    pub rotation_x: Option<f64>,
    /// New yaw.
    pub rotation_y: Option<f64>,
    /// New horizontal flip flag.
    pub scale_x: Option<f64>,
    /// New vertical flip flag.
    pub scale_y: Option<f64>,
    /// New scale multiplier.
    pub scale: Option<f64>,
}

impl PoseUpdate {
    /// Document name of the first given field that is NaN or infinite.
    pub(crate) fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("time", self.time),
            ("pathProgress", self.path_progress),
            ("rotationZ", self.rotation_z),
            ("rotationX", self.rotation_x),
            ("rotationY", self.rotation_y),
            ("scaleX", self.scale_x),
            ("scaleY", self.scale_y),
            ("scale", self.scale),
        ]
        .into_iter()
        .find_map(|(name, v)| v.is_some_and(|v| !v.is_finite()).then_some(name))
    }

    /// Apply the pose fields of this update (not `time`).
    pub fn apply(&self, pose: &mut Pose) {
        let fields = [
            (self.path_progress, &mut pose.path_progress),
            (self.rotation_z, &mut pose.rotation_z),
            (self.rotation_x, &mut pose.rotation_x),
            (self.rotation_y, &mut pose.rotation_y),
            (self.scale_x, &mut pose.scale_x),
            (self.scale_y, &mut pose.scale_y),
            (self.scale, &mut pose.scale),
        ];
        for (value, slot) in fields {
            if let Some(v) = value {
                *slot = v;
            }
        }
    }
}
