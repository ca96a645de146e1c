use crate::animation::pose::Pose;
use crate::foundation::ids::KeyframeId;

/// An authored pose anchored at a time position.
///
/// `time` is a percentage (`0..=100`) of the animation duration. Serialises flat, in the field
/// order of the animation document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Session-unique id; blank ids are replaced on import.
    #[serde(default)]
    pub id: KeyframeId,
    /// Time position, percent of duration.
    pub time: f64,
    /// Pose at `time`.
    #[serde(flatten)]
    pub pose: Pose,
}

impl Keyframe {
    /// Build a keyframe.
    pub fn new(id: impl Into<KeyframeId>, time: f64, pose: Pose) -> Self {
        Self {
            id: id.into(),
            time,
            pose,
        }
    }

    /// Neutral keyframe at `time`.
    pub fn neutral(id: impl Into<KeyframeId>, time: f64) -> Self {
        Self::new(id, time, Pose::NEUTRAL)
    }

    /// Document name of the first NaN or infinite number, if any.
    pub(crate) fn non_finite_field(&self) -> Option<&'static str> {
        if !self.time.is_finite() {
            return Some("time");
        }
        self.pose.non_finite_field()
    }
}

pub(crate) fn sort_by_time(keys: &mut [Keyframe]) {
    keys.sort_by(|a, b| a.time.total_cmp(&b.time));
}
