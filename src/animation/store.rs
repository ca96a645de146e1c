use crate::animation::interp::{PoseSample, pose_at};
use crate::animation::keyframe::{Keyframe, sort_by_time};
use crate::animation::pose::PoseUpdate;
use crate::foundation::error::{FlightpathError, FlightpathResult};
use crate::foundation::ids::{IdAllocator, KeyframeId};
use std::collections::HashSet;

/// Time-sorted, never-empty set of authored keyframes.
///
/// Every mutation leaves the keys sorted by `time` (stable, so equal times keep insertion order).
#[derive(Clone, Debug)]
pub struct KeyframeStore {
    keys: Vec<Keyframe>,
    ids: IdAllocator,
}

impl KeyframeStore {
    /// Store holding a single neutral keyframe at time `0`.
    pub fn new() -> Self {
        let mut ids = IdAllocator::default();
        let id = ids.fresh(&HashSet::new());
        Self {
            keys: vec![Keyframe::neutral(id, 0.0)],
            ids,
        }
    }

    /// Build a store from existing keyframes (see [`KeyframeStore::replace_all`]).
    pub fn from_keyframes(keys: Vec<Keyframe>) -> FlightpathResult<Self> {
        let mut store = Self::new();
        store.replace_all(keys)?;
        Ok(store)
    }

    /// Keyframes in time order.
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Number of keyframes (always `>= 1`).
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Never `true` for a constructed store.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Earliest keyframe.
    pub fn first(&self) -> Option<&Keyframe> {
        self.keys.first()
    }

    /// Look a keyframe up by id.
    pub fn select_by_id(&self, id: &KeyframeId) -> Option<&Keyframe> {
        self.keys.iter().find(|k| &k.id == id)
    }

    /// Keyframe closest in time to `time`; the earliest wins ties.
    pub fn select_nearest(&self, time: f64) -> Option<&Keyframe> {
        self.keys
            .iter()
            .min_by(|a, b| (a.time - time).abs().total_cmp(&(b.time - time).abs()))
    }

    /// Position of `id` in time order.
    pub fn index_of(&self, id: &KeyframeId) -> Option<usize> {
        self.keys.iter().position(|k| &k.id == id)
    }

    /// Interpolated pose at `time`.
    pub fn pose_at(&self, time: f64) -> PoseSample {
        pose_at(&self.keys, time)
    }

    /// Insert a keyframe at `time`, seeded from the interpolated pose there.
    ///
    /// A NaN or infinite `time` is rejected and nothing is inserted.
    pub fn insert_at(&mut self, time: f64) -> FlightpathResult<KeyframeId> {
        if !time.is_finite() {
            return Err(FlightpathError::validation(format!(
                "keyframe time must be finite, got {time}"
            )));
        }
        let pose = self.pose_at(time).pose;
        let taken = self.taken_ids();
        let id = self.ids.fresh(&taken);
        self.keys.push(Keyframe::new(id.clone(), time, pose));
        sort_by_time(&mut self.keys);
        tracing::debug!(%id, time, "inserted keyframe");
        Ok(id)
    }

    /// Remove a keyframe. The last remaining keyframe cannot be removed.
    pub fn delete_by_id(&mut self, id: &KeyframeId) -> FlightpathResult<Keyframe> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| FlightpathError::unknown_keyframe(id.as_str()))?;
        if self.keys.len() <= 1 {
            return Err(FlightpathError::CannotDeleteLastKeyframe);
        }
        let removed = self.keys.remove(idx);
        tracing::debug!(%id, "deleted keyframe");
        Ok(removed)
    }

    /// Apply a partial edit; a time change re-sorts the store.
    ///
    /// An edit carrying a NaN or infinite value is rejected whole.
    pub fn update(&mut self, id: &KeyframeId, update: &PoseUpdate) -> FlightpathResult<()> {
        if let Some(field) = update.non_finite_field() {
            return Err(FlightpathError::validation(format!(
                "{field}: must be a finite number"
            )));
        }
        let key = self
            .keys
            .iter_mut()
            .find(|k| &k.id == id)
            .ok_or_else(|| FlightpathError::unknown_keyframe(id.as_str()))?;
        update.apply(&mut key.pose);
        if let Some(time) = update.time {
            key.time = time;
            sort_by_time(&mut self.keys);
        }
        Ok(())
    }

    /// `true` if no keyframe other than `exclude` sits exactly at `time`.
    pub fn is_time_unique(&self, time: f64, exclude: Option<&KeyframeId>) -> bool {
        !self
            .keys
            .iter()
            .any(|k| k.time == time && Some(&k.id) != exclude)
    }

    /// Replace every keyframe at once. Blank or repeated ids get fresh ones.
    ///
    /// An empty list, or one holding a NaN or infinite number, is rejected and leaves the store
    /// unchanged.
    pub fn replace_all(&mut self, keys: Vec<Keyframe>) -> FlightpathResult<()> {
        if keys.is_empty() {
            return Err(FlightpathError::validation(
                "keyframe list must contain at least one keyframe",
            ));
        }
        for (i, key) in keys.iter().enumerate() {
            if let Some(field) = key.non_finite_field() {
                return Err(FlightpathError::validation(format!(
                    "$[{i}].{field}: must be a finite number"
                )));
            }
        }

        let mut taken: HashSet<KeyframeId> = keys
            .iter()
            .filter(|k| !k.id.is_blank())
            .map(|k| k.id.clone())
            .collect();
        let mut seen = HashSet::<KeyframeId>::new();
        let mut keys = keys;
        for key in &mut keys {
            if key.id.is_blank() || !seen.insert(key.id.clone()) {
                let id = self.ids.fresh(&taken);
                taken.insert(id.clone());
                seen.insert(id.clone());
                key.id = id;
            }
        }
        sort_by_time(&mut keys);
        self.keys = keys;
        tracing::debug!(count = self.keys.len(), "replaced keyframes");
        Ok(())
    }

    fn taken_ids(&self) -> HashSet<KeyframeId> {
        self.keys.iter().map(|k| k.id.clone()).collect()
    }
}

impl Default for KeyframeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/store.rs"]
mod tests;
