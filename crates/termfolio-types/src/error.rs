//! Error types for termfolio.

use std::io;

/// Errors produced by the termfolio crates.
#[derive(Debug, thiserror::Error)]
pub enum TermfolioError {
    #[error("duplicate command name or alias: {0}")]
    DuplicateName(String),

    #[error("invalid command name: {0}")]
    InvalidName(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("resource error: {0}")]
    Resource(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TermfolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_display() {
        let e = TermfolioError::DuplicateName("help".into());
        assert_eq!(format!("{e}"), "duplicate command name or alias: help");
    }

    #[test]
    fn invalid_name_display() {
        let e = TermfolioError::InvalidName("Help".into());
        assert_eq!(format!("{e}"), "invalid command name: Help");
    }

    #[test]
    fn network_error_display() {
        let e = TermfolioError::Network("connection refused".into());
        assert_eq!(format!("{e}"), "network error: connection refused");
    }

    #[test]
    fn resource_error_display() {
        let e = TermfolioError::Resource("no browser".into());
        assert_eq!(format!("{e}"), "resource error: no browser");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: TermfolioError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: TermfolioError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: TermfolioError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(TermfolioError::Network("oops".into()));
        assert!(r.is_err());
    }
}
