//! @ai:module:intent Define error types for the swagdoc annotation compiler
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for directive parsing and the scanning driver
#[derive(Error, Debug)]
pub enum Error {
    #[error("Can not parse {directive} comment \"{text}\", skipped.")]
    MalformedDirective { directive: &'static str, text: String },

    #[error("Response status code must be an integer in \"{text}\", skipped.")]
    InvalidStatusCode { text: String },

    #[error("Can not find ref type: \"{0}\".")]
    UnresolvedType(String),

    /// Header and form parameters have no grammar yet; callers must abort.
    #[error("Parameter location `{location}` is not supported yet: \"{text}\"")]
    UnsupportedParamLocation { location: String, text: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Invalid type definitions in {path}: {source}")]
    TypesFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

impl Error {
    /// @ai:intent Whether the error must stop the whole run instead of skipping one line
    /// @ai:effects pure
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::UnsupportedParamLocation { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unsupported_location_is_fatal() {
        let fatal = Error::UnsupportedParamLocation {
            location: "Header".to_string(),
            text: "token Header string true \"auth\"".to_string(),
        };
        assert!(fatal.is_fatal());
        assert!(!Error::UnresolvedType("model.User".to_string()).is_fatal());
        assert!(!Error::MalformedDirective {
            directive: "router",
            text: "/users".to_string()
        }
        .is_fatal());
    }

    #[test]
    fn test_malformed_message_names_text() {
        let err = Error::MalformedDirective {
            directive: "param",
            text: "id path".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Can not parse param comment \"id path\", skipped."
        );
    }
}
