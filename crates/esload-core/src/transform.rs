//! Raw module bytes to bundler-ready contents.
//!
//! The bundler only understands source languages, so non-executable assets are
//! rewritten into ES modules here. JSON is the only such asset today.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::media_type::MediaType;

const PROTO_KEY: &str = "\"__proto__\":";
const COMPUTED_PROTO_KEY: &str = "[\"__proto__\"]:";

/// Module contents handed to the bundler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ModuleContents {
    /// Generated source text.
    Text(String),
    /// Raw bytes passed through unchanged.
    Bytes(Vec<u8>),
}

impl ModuleContents {
    /// View the contents as bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }

    /// Consume the contents, returning the underlying bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }

    /// View the contents as text, if they are valid UTF-8.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
        }
    }
}

/// Turn raw module bytes into contents the bundler can load.
///
/// JSON becomes `export default <json>;`. Every other media type is passed
/// through untouched.
///
/// Numbers are re-serialized by `serde_json`: a float such as `1.0` keeps its
/// fractional part, and a literal outside the `f64` range (`1e400`) fails
/// with [`Error::MalformedContent`] instead of becoming `null`.
pub fn transform_raw_into_content(raw: Vec<u8>, media_type: MediaType) -> Result<ModuleContents> {
    match media_type {
        MediaType::Json => json_module(&raw).map(ModuleContents::Text),
        _ => Ok(ModuleContents::Bytes(raw)),
    }
}

fn json_module(raw: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(raw).map_err(|source| Error::InvalidUtf8 { source })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|source| Error::MalformedContent { source })?;
    let pretty =
        serde_json::to_string_pretty(&value).map_err(|source| Error::MalformedContent { source })?;

    Ok(format!("export default {};", guard_proto_keys(&pretty)))
}

/// Rewrite `"__proto__":` object keys into computed keys.
///
/// A literal `__proto__` key in an object literal sets the prototype instead
/// of defining a property. Pretty-printed JSON puts every key at the start of
/// a line, so only line-leading occurrences are keys.
fn guard_proto_keys(pretty: &str) -> String {
    let mut out = String::with_capacity(pretty.len());
    for (i, line) in pretty.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let body = line.trim_start_matches(' ');
        match body.strip_prefix(PROTO_KEY) {
            Some(rest) => {
                out.push_str(&line[..line.len() - body.len()]);
                out.push_str(COMPUTED_PROTO_KEY);
                out.push_str(rest);
            }
            None => out.push_str(line),
        }
    }
    out
}
