use thiserror::Error;

/// Failure kinds reported by a location provider.
///
/// `Unsupported` is fatal for the current attempt; the other two are
/// recoverable by retrying once the user or platform state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("geolocation is not supported on this platform")]
    Unsupported,

    #[error("location permission was denied")]
    PermissionDenied,

    #[error("current position is unavailable")]
    PositionUnavailable,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("location error: {0}")]
    Location(#[from] LocationError),

    #[error("outside the campus radius")]
    OutOfRange,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("attendance service error: {0}")]
    Submit(String),

    #[error("auth error: {0}")]
    Auth(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
