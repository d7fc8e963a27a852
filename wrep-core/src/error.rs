use thiserror::Error;

/// Flat error taxonomy shared by every provider and the fetcher.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP request failed: {message}")]
    Transport { message: String },

    #[error("unexpected HTTP status: {status} {message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("unauthorized: invalid or missing API key")]
    Unauthorized,

    #[error("bad request: city not provided or invalid")]
    BadRequest,

    #[error("forbidden: API access denied or quota exceeded")]
    Forbidden,

    #[error("failed to decode JSON response: {message}")]
    DecodeFailure { message: String },

    #[error("no current condition data in response")]
    EmptyUpstreamData,

    #[error("invalid configuration: {message}")]
    ConfigInvalid { message: String },
}

/// Discriminant of [`WeatherError`], handy for matching without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    UpstreamStatus,
    Unauthorized,
    BadRequest,
    Forbidden,
    DecodeFailure,
    EmptyUpstreamData,
    ConfigInvalid,
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::Transport { .. } => ErrorKind::Transport,
            WeatherError::UpstreamStatus { .. } => ErrorKind::UpstreamStatus,
            WeatherError::Unauthorized => ErrorKind::Unauthorized,
            WeatherError::BadRequest => ErrorKind::BadRequest,
            WeatherError::Forbidden => ErrorKind::Forbidden,
            WeatherError::DecodeFailure { .. } => ErrorKind::DecodeFailure,
            WeatherError::EmptyUpstreamData => ErrorKind::EmptyUpstreamData,
            WeatherError::ConfigInvalid { .. } => ErrorKind::ConfigInvalid,
        }
    }

    /// Whether the CLI should abort on this error. Configuration problems are only warnings.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, WeatherError::ConfigInvalid { .. })
    }

    pub(crate) fn transport(err: impl std::fmt::Display) -> Self {
        WeatherError::Transport { message: err.to_string() }
    }

    pub(crate) fn decode(err: impl std::fmt::Display) -> Self {
        WeatherError::DecodeFailure { message: err.to_string() }
    }

    /// Build an `UpstreamStatus` error from a raw status code and (truncated) response body.
    pub(crate) fn upstream_status(status: u16, body: &str) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("");

        let body = truncate_body(body);
        let message = match (reason.is_empty(), body.trim().is_empty()) {
            (false, false) => format!("{reason}: {body}"),
            (false, true) => reason.to_string(),
            (true, false) => body,
            (true, true) => String::new(),
        };

        WeatherError::UpstreamStatus { status, message }
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_config_errors_are_non_fatal() {
        assert!(!WeatherError::ConfigInvalid { message: "x".into() }.is_fatal());
        assert!(WeatherError::EmptyUpstreamData.is_fatal());
        assert!(WeatherError::Unauthorized.is_fatal());
        assert!(WeatherError::transport("timed out").is_fatal());
    }

    #[test]
    fn upstream_status_carries_reason_and_body() {
        let err = WeatherError::upstream_status(503, "try later");
        assert_eq!(err.kind(), ErrorKind::UpstreamStatus);
        assert_eq!(err.to_string(), "unexpected HTTP status: 503 Service Unavailable: try later");
    }

    #[test]
    fn truncate_body_limits_long_payloads() {
        let long = "é".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
