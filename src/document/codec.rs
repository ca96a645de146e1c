use crate::animation::keyframe::{Keyframe, sort_by_time};
use crate::animation::store::KeyframeStore;
use crate::foundation::error::{FlightpathError, FlightpathResult};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Version tag written into every exported document.
pub const DOCUMENT_VERSION: &str = "1.0";

/// Default export duration in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 10.0;

/// Default export frame rate.
pub const DEFAULT_FPS: f64 = 60.0;

/// Keyframe field names that must be numeric on import.
const REQUIRED_NUMERIC: [&str; 3] = ["time", "pathProgress", "rotationZ"];

/// Keyframe field names that must be numeric when present.
const OPTIONAL_NUMERIC: [&str; 5] = ["rotationX", "rotationY", "scaleX", "scaleY", "scale"];

/// Serialized snapshot of an animation: metadata plus time-sorted keyframes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationDocument {
    /// Document format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Total duration in seconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Playback frame rate (30, 60 or 120 by convention).
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Keyframes sorted by time.
    pub keyframes: Vec<Keyframe>,
}

fn default_version() -> String {
    DOCUMENT_VERSION.to_owned()
}

fn default_duration() -> f64 {
    DEFAULT_DURATION_SECS
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

impl AnimationDocument {
    /// Snapshot a store with the given metadata.
    pub fn from_store(store: &KeyframeStore, duration: f64, fps: f64) -> Self {
        let mut keyframes = store.keyframes().to_vec();
        sort_by_time(&mut keyframes);
        Self {
            version: DOCUMENT_VERSION.to_owned(),
            duration,
            fps,
            keyframes,
        }
    }

    /// Build a fresh store from this document's keyframes.
    pub fn to_store(&self) -> FlightpathResult<KeyframeStore> {
        KeyframeStore::from_keyframes(self.keyframes.clone())
    }

    /// Pretty JSON (two-space indent, stable field order).
    ///
    /// JSON has no NaN or infinity, so a document holding one is rejected rather than written
    /// with `null` in its place.
    pub fn to_json(&self) -> FlightpathResult<String> {
        self.ensure_finite()?;
        serde_json::to_string_pretty(self)
            .map_err(|e| FlightpathError::Other(anyhow::Error::new(e).context("encode document")))
    }

    fn ensure_finite(&self) -> FlightpathResult<()> {
        for (field, v) in [("duration", self.duration), ("fps", self.fps)] {
            if !v.is_finite() {
                return Err(FlightpathError::validation(format!(
                    "$.{field}: must be a finite number, got {v}"
                )));
            }
        }
        for (i, key) in self.keyframes.iter().enumerate() {
            if let Some(field) = key.non_finite_field() {
                return Err(FlightpathError::validation(format!(
                    "$.keyframes[{i}].{field}: must be a finite number"
                )));
            }
        }
        Ok(())
    }

    /// Parse and shape-check a document from JSON text.
    pub fn from_json(text: &str) -> FlightpathResult<Self> {
        deserialize(text)
    }

    /// Parse and shape-check a document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FlightpathResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FlightpathError::Other(
                anyhow::Error::new(e).context(format!("open document '{}'", path.display())),
            )
        })?;
        let value: Value = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| FlightpathError::malformed(format!("parse JSON: {e}")))?;
        from_value(value)
    }
}

/// Serialize `store` as an animation document.
#[tracing::instrument(skip(store), fields(keyframes = store.len()))]
pub fn serialize(store: &KeyframeStore, duration: f64, fps: f64) -> FlightpathResult<String> {
    AnimationDocument::from_store(store, duration, fps).to_json()
}

/// Parse an animation document, checking keyframe shape but not value ranges.
///
/// Unparseable text is [`FlightpathError::MalformedDocument`]; a missing or non-array
/// `keyframes`, or an entry without numeric `time` / `pathProgress` / `rotationZ`, is
/// [`FlightpathError::InvalidKeyframeSchema`]. Out-of-range numbers pass through unchanged.
#[tracing::instrument(skip(text), fields(bytes = text.len()))]
pub fn deserialize(text: &str) -> FlightpathResult<AnimationDocument> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| FlightpathError::malformed(format!("parse JSON: {e}")))?;
    from_value(value)
}

/// Shape-check `value`, then decode it.
///
/// Keyframe shape problems are [`FlightpathError::InvalidKeyframeSchema`]. A `version`,
/// `duration` or `fps` of the wrong JSON type fails the typed decode and is reported as
/// [`FlightpathError::MalformedDocument`]; absent metadata takes its default.
fn from_value(value: Value) -> FlightpathResult<AnimationDocument> {
    check_shape(&value)?;
    let doc: AnimationDocument = serde_json::from_value(value)
        .map_err(|e| FlightpathError::malformed(format!("document fields: {e}")))?;
    tracing::debug!(
        version = %doc.version,
        keyframes = doc.keyframes.len(),
        "decoded animation document"
    );
    Ok(doc)
}

fn check_shape(value: &Value) -> FlightpathResult<()> {
    // A non-object root has no `keyframes` member.
    let Some(root) = value.as_object() else {
        return Err(FlightpathError::schema("$.keyframes: missing"));
    };
    let Some(keyframes) = root.get("keyframes") else {
        return Err(FlightpathError::schema("$.keyframes: missing"));
    };
    let Some(entries) = keyframes.as_array() else {
        return Err(FlightpathError::schema("$.keyframes: must be an array"));
    };

    for (i, entry) in entries.iter().enumerate() {
        let Some(obj) = entry.as_object() else {
            return Err(FlightpathError::schema(format!(
                "$.keyframes[{i}]: must be an object"
            )));
        };
        for field in REQUIRED_NUMERIC {
            if !obj.get(field).is_some_and(Value::is_number) {
                return Err(FlightpathError::schema(format!(
                    "$.keyframes[{i}].{field}: must be a number"
                )));
            }
        }
        for field in OPTIONAL_NUMERIC {
            if obj.get(field).is_some_and(|v| !v.is_number()) {
                return Err(FlightpathError::schema(format!(
                    "$.keyframes[{i}].{field}: must be a number when present"
                )));
            }
        }
        if obj.get("id").is_some_and(|v| !v.is_string()) {
            return Err(FlightpathError::schema(format!(
                "$.keyframes[{i}].id: must be a string when present"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/document/codec.rs"]
mod tests;
