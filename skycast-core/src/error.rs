use reqwest::StatusCode;
use thiserror::Error;

/// Failure modes of one upstream weather fetch.
///
/// A 404 is kept apart from every other non-2xx status so the detail surface
/// can tailor its message; network and payload problems collapse into a
/// generic fallback at the boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("city not found upstream")]
    NotFound,

    #[error("weather service returned status {0}")]
    Status(StatusCode),

    #[error("weather request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed weather payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl FetchError {
    /// Short user-facing message, converted at the flow boundary nearest the
    /// cause. Nothing here propagates further.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::NotFound => "City not found. Please check the spelling.".to_string(),
            FetchError::Status(status) => format!("Error: {status}"),
            FetchError::Network(_) | FetchError::Payload(_) => {
                "Could not fetch weather data. Please try again later.".to_string()
            }
        }
    }
}

/// Failure modes of acquiring a device position.
///
/// The three named arms each carry their own user-facing message; anything
/// else falls back to a generic one.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location information unavailable")]
    PositionUnavailable,

    #[error("location request timed out")]
    Timeout,

    #[error("location error: {0}")]
    Other(String),
}

impl LocationError {
    pub fn user_message(&self) -> String {
        match self {
            LocationError::PermissionDenied => {
                "Location access denied. Please check your permission settings.".to_string()
            }
            LocationError::PositionUnavailable => {
                "Location information is unavailable.".to_string()
            }
            LocationError::Timeout => "The request to get your location timed out.".to_string(),
            LocationError::Other(_) => "Unable to retrieve your location.".to_string(),
        }
    }
}

/// Failure modes of the lookup (home) flow.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("empty city query")]
    EmptyQuery,

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error("reverse geocode failed: {0}")]
    ReverseGeocode(#[source] FetchError),
}

impl LookupError {
    pub fn user_message(&self) -> String {
        match self {
            LookupError::EmptyQuery => "Please enter a city name.".to_string(),
            LookupError::Location(err) => err.user_message(),
            LookupError::ReverseGeocode(_) => {
                "Could not determine city from your location.".to_string()
            }
        }
    }
}
