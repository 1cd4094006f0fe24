/// Convenience result type used across floatpos.
pub type FloatposResult<T> = Result<T, FloatposError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum FloatposError {
    /// A measurement backend failed or does not provide a queried capability.
    #[error("platform error: {0}")]
    Platform(String),

    /// A middleware or a user callback it invoked failed.
    #[error("middleware error: {0}")]
    Middleware(String),

    /// Invalid user-provided options or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FloatposError {
    /// Build a [`FloatposError::Platform`] value.
    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform(msg.into())
    }

    /// Build a [`FloatposError::Middleware`] value.
    pub fn middleware(msg: impl Into<String>) -> Self {
        Self::Middleware(msg.into())
    }

    /// Build a [`FloatposError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FloatposError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for FloatposError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
