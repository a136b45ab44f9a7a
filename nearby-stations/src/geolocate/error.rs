//! Geolocation error types.

/// Errors that can occur when asking for the current position.
#[derive(Debug, thiserror::Error)]
pub enum GeolocateError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No API key configured
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Authentication failed
    #[error("unauthorized: check GOOGLE_MAPS_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeolocateError::Api {
            status: 404,
            message: "notFound".into(),
        };
        assert_eq!(err.to_string(), "API error 404: notFound");

        let err = GeolocateError::NotConfigured("GOOGLE_MAPS_API_KEY is not set".into());
        assert_eq!(err.to_string(), "not configured: GOOGLE_MAPS_API_KEY is not set");
    }
}
