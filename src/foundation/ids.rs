use std::collections::HashSet;
use std::fmt;

/// Stable identifier of a keyframe within an editor session.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct KeyframeId(pub String);

impl KeyframeId {
    /// Borrow the id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for KeyframeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyframeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for KeyframeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Monotonic `kf-<n>` allocator.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Next id not contained in `taken`.
    pub(crate) fn fresh(&mut self, taken: &HashSet<KeyframeId>) -> KeyframeId {
        loop {
            let id = KeyframeId(format!("kf-{}", self.next));
            self.next = self.next.saturating_add(1);
            if !taken.contains(&id) {
                return id;
            }
        }
    }
}
