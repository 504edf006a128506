//! Reason phrases and coarse classification for HTTP status codes.

use axum::http::StatusCode;

/// Returns the canonical reason phrase for a status code, or an empty
/// string for codes outside the registry.
pub fn status_text(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
        .to_string()
}

/// Status code family, used when presenting a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Redirect,
    ClientError,
    ServerError,
    /// Status 0 (a failed send) or anything below 200.
    Other,
}

impl StatusClass {
    pub fn of(status: u16) -> Self {
        match status {
            200..=299 => StatusClass::Success,
            300..=399 => StatusClass::Redirect,
            400..=499 => StatusClass::ClientError,
            500.. => StatusClass::ServerError,
            _ => StatusClass::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(200), "OK");
        assert_eq!(status_text(404), "Not Found");
        assert_eq!(status_text(503), "Service Unavailable");
        assert_eq!(status_text(599), "");
        assert_eq!(status_text(0), "");
    }

    #[test]
    fn test_status_class() {
        assert_eq!(StatusClass::of(204), StatusClass::Success);
        assert_eq!(StatusClass::of(302), StatusClass::Redirect);
        assert_eq!(StatusClass::of(404), StatusClass::ClientError);
        assert_eq!(StatusClass::of(502), StatusClass::ServerError);
        assert_eq!(StatusClass::of(0), StatusClass::Other);
        assert_eq!(StatusClass::of(101), StatusClass::Other);
    }
}
