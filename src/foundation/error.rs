/// Convenience result type used across flightpath.
pub type FlightpathResult<T> = Result<T, FlightpathError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is locally recoverable: an import failure leaves the session untouched, and a
/// degenerate curve only means there is nothing to draw.
#[derive(thiserror::Error, Debug)]
pub enum FlightpathError {
    /// Imported text is not parseable as an animation document.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// Imported document parsed, but its `keyframes` entries have the wrong shape.
    #[error("invalid keyframe schema: {0}")]
    InvalidKeyframeSchema(String),

    /// The keyframe store never drops below one entry.
    #[error("cannot delete the last keyframe")]
    CannotDeleteLastKeyframe,

    /// A keyframe id that the store does not hold.
    #[error("unknown keyframe: {0}")]
    UnknownKeyframe(String),

    /// Zero waypoints or a zero-length curve; callers render nothing.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Invalid user-provided configuration or editor input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlightpathError {
    /// Build a [`FlightpathError::MalformedDocument`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }

    /// Build a [`FlightpathError::InvalidKeyframeSchema`] value.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::InvalidKeyframeSchema(msg.into())
    }

    /// Build a [`FlightpathError::UnknownKeyframe`] value.
    pub fn unknown_keyframe(id: impl Into<String>) -> Self {
        Self::UnknownKeyframe(id.into())
    }

    /// Build a [`FlightpathError::DegenerateGeometry`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateGeometry(msg.into())
    }

    /// Build a [`FlightpathError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
