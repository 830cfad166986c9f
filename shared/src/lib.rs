// shared/src/lib.rs

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Transport(String),
    #[error("unexpected search response: {0}")]
    Decode(String),
    #[error("failed to persist cache: {0}")]
    Persistence(String),
    #[error("cache file is corrupt: {0}")]
    CorruptCache(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Whether the caller, not the service, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidRequest(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_is_passed_through() {
        let err = Error::Upstream("quota exceeded".to_string());
        assert_eq!(err.to_string(), "quota exceeded");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_invalid_request_is_client_error() {
        assert!(Error::InvalidRequest("Missing track or artist".into()).is_client_error());
        assert!(!Error::Persistence("disk full".into()).is_client_error());
    }

    #[test]
    fn test_config_error_is_not_a_transport_error() {
        let err = Error::Config("Failed to build HTTP client: no TLS backend".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: Failed to build HTTP client: no TLS backend"
        );
        assert!(!matches!(err, Error::Transport(_)));
        assert!(!err.is_client_error());
    }
}
