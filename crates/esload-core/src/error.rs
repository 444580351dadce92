use std::path::PathBuf;
use thiserror::Error;

use crate::media_type::MediaType;

/// Result alias used throughout esload.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Core error type for esload operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unhandled media type: {media_type}")]
    UnhandledMediaType { media_type: MediaType },

    #[error("Malformed module content: {source}")]
    MalformedContent {
        #[source]
        source: serde_json::Error,
    },

    #[error("Module content is not valid UTF-8: {source}")]
    InvalidUtf8 {
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}", invalid_config_message(.path, .key.as_deref()))]
    InvalidConfigShape { path: PathBuf, key: Option<String> },

    #[error("Unsupported namespace \"{namespace}\" for path {path}: {source}")]
    UnsupportedNamespace {
        namespace: String,
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unsupported scheme \"{scheme}\" in {specifier}")]
    UnsupportedScheme { scheme: String, specifier: String },

    #[error("File URL cannot be converted to a path: {url}")]
    InvalidFileUrl { url: String },

    #[error("Path cannot be converted to a file URL: {path}")]
    InvalidFilePath { path: PathBuf },

    #[error("Invalid npm specifier: {specifier}")]
    InvalidNpmSpecifier { specifier: String },

    #[error("Invalid jsr specifier: {specifier}")]
    InvalidJsrSpecifier { specifier: String },
}

fn invalid_config_message(path: &std::path::Path, key: Option<&str>) -> String {
    match key {
        Some(key) => format!("Deno config at {} has invalid \"{key}\" key", path.display()),
        None => format!("Deno config at {} must be an object", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message_names_key() {
        let err = Error::InvalidConfigShape {
            path: PathBuf::from("/tmp/deno.json"),
            key: Some("imports".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Deno config at /tmp/deno.json has invalid \"imports\" key"
        );
    }

    #[test]
    fn test_invalid_config_message_root() {
        let err = Error::InvalidConfigShape {
            path: PathBuf::from("/tmp/deno.json"),
            key: None,
        };
        assert_eq!(err.to_string(), "Deno config at /tmp/deno.json must be an object");
    }
}
