use crate::animation::keyframe::{Keyframe, sort_by_time};
use crate::animation::pose::{Lerp, Pose};
use std::borrow::Cow;

/// A resolved pose together with the time it was sampled at.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PoseSample {
    /// Query time, percent of duration.
    pub time: f64,
    /// Interpolated pose.
    #[serde(flatten)]
    pub pose: Pose,
}

/// Resolve the pose at `time` by linear interpolation between bracketing keyframes.
///
/// No extrapolation: times before the first or after the last keyframe clamp to that keyframe.
/// An empty slice yields [`Pose::NEUTRAL`]. Unsorted input is sorted on a copy; the slice is never
/// mutated.
pub fn pose_at(keys: &[Keyframe], time: f64) -> PoseSample {
    let sample = |pose: Pose| PoseSample { time, pose };

    let sorted: Cow<'_, [Keyframe]> = if keys.is_sorted_by(|a, b| a.time <= b.time) {
        Cow::Borrowed(keys)
    } else {
        let mut owned = keys.to_vec();
        sort_by_time(&mut owned);
        Cow::Owned(owned)
    };

    let (first, last) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return sample(Pose::NEUTRAL),
    };
    if sorted.len() == 1 || time <= first.time || time.is_nan() {
        return sample(first.pose);
    }
    if time >= last.time {
        return sample(last.pose);
    }

    let Some(pair) = sorted
        .windows(2)
        .find(|w| w[0].time <= time && time <= w[1].time)
    else {
        return sample(first.pose);
    };
    let (k1, k2) = (&pair[0], &pair[1]);
    let span = k2.time - k1.time;
    if span == 0.0 {
        return sample(k1.pose);
    }
    let alpha = (time - k1.time) / span;
    sample(Pose::lerp(&k1.pose, &k2.pose, alpha))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
