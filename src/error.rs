// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Errors surfaced by data loading, configuration, and gallery updates.
///
/// All of these are non-fatal: callers log them and fall back to an empty
/// catalog, the default configuration, or the previously rendered state.
#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    /// The embedded product document could not be parsed.
    Data(String),
    Config(String),
    /// A variant id was requested that is not present in the loaded catalog.
    VariantNotFound(i64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Data(e) => write!(f, "Data Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::VariantNotFound(id) => write!(f, "Variant {} not found in catalog", id),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Data(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn from_json_error_produces_data_variant() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_error.into();
        assert!(matches!(err, Error::Data(_)));
    }

    #[test]
    fn variant_not_found_includes_id() {
        let err = Error::VariantNotFound(42);
        assert_eq!(format!("{}", err), "Variant 42 not found in catalog");
    }
}
