//! Deno config file reading and shape validation.
//!
//! Only the keys the resolver consumes are checked, and only their top-level
//! type. Everything else in the file is ignored.
//!
//! ```json
//! {
//!   // comments and trailing commas are allowed
//!   "imports": { "preact": "npm:preact@10" },
//!   "scopes": {},
//!   "lock": "deno.lock",
//!   "importMap": "./import_map.json",
//! }
//! ```

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The subset of a Deno config file used for resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DenoConfig {
    /// Bare specifier mappings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imports: Option<Map<String, Value>>,
    /// Scoped specifier mappings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Map<String, Value>>,
    /// Lockfile path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock: Option<String>,
    /// Import map path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_map: Option<String>,
}

/// Read, parse and validate a JSONC config file.
pub async fn read_deno_config(path: &Path) -> Result<DenoConfig> {
    let source = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

    let value = parse_jsonc(&source).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    let config = validate_deno_config(&value, path)?;
    tracing::debug!(
        path = %path.display(),
        imports = config.imports.as_ref().map_or(0, Map::len),
        scopes = config.scopes.as_ref().map_or(0, Map::len),
        "read deno config"
    );
    Ok(config)
}

/// Check the shape of an already-parsed config.
///
/// `source` is only used in error messages.
pub fn validate_deno_config(value: &Value, source: &Path) -> Result<DenoConfig> {
    let invalid = |key: Option<&str>| Error::InvalidConfigShape {
        path: source.to_path_buf(),
        key: key.map(str::to_string),
    };

    let obj = value.as_object().ok_or_else(|| invalid(None))?;

    let object_key = |key: &str| -> Result<Option<Map<String, Value>>> {
        match obj.get(key) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map.clone())),
            Some(_) => Err(invalid(Some(key))),
        }
    };
    let string_key = |key: &str| -> Result<Option<String>> {
        match obj.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(invalid(Some(key))),
        }
    };

    Ok(DenoConfig {
        imports: object_key("imports")?,
        scopes: object_key("scopes")?,
        lock: string_key("lock")?,
        import_map: string_key("importMap")?,
    })
}

/// Parse JSON with comments and trailing commas.
pub fn parse_jsonc(source: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(&strip_jsonc(source))
}

/// Remove `//` and `/* */` comments and trailing commas, keeping line structure
/// so parse errors still point at the right line.
fn strip_jsonc(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let len = chars.len();
    let mut result = String::with_capacity(source.len());
    let mut i = 0;
    let mut in_string = false;

    while i < len {
        let c = chars[i];
        if in_string {
            result.push(c);
            if c == '\\' && i + 1 < len {
                result.push(chars[i + 1]);
                i += 1;
            } else if c == '"' {
                in_string = false;
            }
            i += 1;
        } else if c == '/' && i + 1 < len && chars[i + 1] == '/' {
            while i < len && chars[i] != '\n' {
                i += 1;
            }
        } else if c == '/' && i + 1 < len && chars[i + 1] == '*' {
            i += 2;
            while i + 1 < len && !(chars[i] == '*' && chars[i + 1] == '/') {
                if chars[i] == '\n' {
                    result.push('\n');
                }
                i += 1;
            }
            i += 2;
        } else {
            if c == '"' {
                in_string = true;
            }
            result.push(c);
            i += 1;
        }
    }

    remove_trailing_commas(&result)
}

fn remove_trailing_commas(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut result = String::with_capacity(source.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            result.push(c);
            if c == '\\' && i + 1 < chars.len() {
                result.push(chars[i + 1]);
                i += 1;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if !matches!(next, Some('}' | ']')) {
                result.push(c);
            }
        } else {
            if c == '"' {
                in_string = true;
            }
            result.push(c);
        }
        i += 1;
    }

    result
}

/// Default config file names, in lookup order.
pub const CONFIG_FILES: &[&str] = &["deno.json", "deno.jsonc"];

/// Find a config file in the given directory.
#[must_use]
pub fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn validate(value: Value) -> Result<DenoConfig> {
        validate_deno_config(&value, Path::new("/project/deno.json"))
    }

    #[test]
    fn test_valid_config() {
        let config = validate(json!({ "imports": {}, "lock": "abc" })).unwrap();
        assert_eq!(config.imports, Some(Map::new()));
        assert_eq!(config.lock.as_deref(), Some("abc"));
        assert_eq!(config.scopes, None);
        assert_eq!(config.import_map, None);
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(validate(json!({})).unwrap(), DenoConfig::default());
    }

    #[test]
    fn test_unrelated_keys_ignored() {
        let config = validate(json!({ "tasks": [], "compilerOptions": 1 })).unwrap();
        assert_eq!(config, DenoConfig::default());
    }

    #[test]
    fn test_invalid_imports() {
        let err = validate(json!({ "imports": [] })).unwrap_err();
        assert!(matches!(
            &err,
            Error::InvalidConfigShape { key: Some(key), .. } if key == "imports"
        ));
        let message = err.to_string();
        assert!(message.contains("\"imports\""), "{message}");
        assert!(message.contains("/project/deno.json"), "{message}");
    }

    #[test]
    fn test_invalid_keys() {
        for (value, key) in [
            (json!({ "imports": null }), "imports"),
            (json!({ "scopes": "x" }), "scopes"),
            (json!({ "lock": {} }), "lock"),
            (json!({ "importMap": 1 }), "importMap"),
        ] {
            let err = validate(value).unwrap_err();
            assert!(err.to_string().contains(&format!("\"{key}\"")), "{err}");
        }
    }

    #[test]
    fn test_non_object_config() {
        for value in [json!([]), json!(null), json!("deno.json"), json!(1)] {
            let err = validate(value).unwrap_err();
            assert!(matches!(err, Error::InvalidConfigShape { key: None, .. }));
        }
    }

    #[test]
    fn test_strip_jsonc_comments() {
        let input = "{\n  // line\n  \"a\": \"http://x\", /* block\n comment */ \"b\": 1\n}";
        let value = parse_jsonc(input).unwrap();
        assert_eq!(value, json!({ "a": "http://x", "b": 1 }));
        assert_eq!(strip_jsonc(input).lines().count(), input.lines().count());
    }

    #[test]
    fn test_strip_jsonc_trailing_commas() {
        let value = parse_jsonc(r#"{ "a": [1, 2,], "b": { "c": ",}", }, }"#).unwrap();
        assert_eq!(value, json!({ "a": [1, 2], "b": { "c": ",}" } }));
    }

    #[test]
    fn test_strip_jsonc_escaped_quote() {
        let value = parse_jsonc(r#"{ "a": "say \"//hi\"" }"#).unwrap();
        assert_eq!(value, json!({ "a": "say \"//hi\"" }));
    }

    #[tokio::test]
    async fn test_read_deno_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deno.jsonc");
        fs::write(
            &path,
            "{\n  // deps\n  \"imports\": { \"preact\": \"npm:preact@10\" },\n  \"importMap\": \"./map.json\",\n}\n",
        )
        .unwrap();

        let config = read_deno_config(&path).await.unwrap();
        assert_eq!(config.imports.unwrap()["preact"], "npm:preact@10");
        assert_eq!(config.import_map.as_deref(), Some("./map.json"));
    }

    #[tokio::test]
    async fn test_read_missing_config() {
        let temp = TempDir::new().unwrap();
        let err = read_deno_config(&temp.path().join("deno.json")).await.unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }

    #[tokio::test]
    async fn test_read_malformed_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deno.json");
        fs::write(&path, "{ \"imports\": ").unwrap();
        let err = read_deno_config(&path).await.unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[tokio::test]
    async fn test_read_invalid_shape_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deno.json");
        fs::write(&path, r#"{ "scopes": [] }"#).unwrap();
        let err = read_deno_config(&path).await.unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfigShape { key: Some(ref key), .. } if key == "scopes"
        ));
    }

    #[test]
    fn test_find_config_file() {
        let temp = TempDir::new().unwrap();
        assert_eq!(find_config_file(temp.path()), None);
        fs::write(temp.path().join("deno.jsonc"), "{}").unwrap();
        assert_eq!(find_config_file(temp.path()), Some(temp.path().join("deno.jsonc")));
        fs::write(temp.path().join("deno.json"), "{}").unwrap();
        assert_eq!(find_config_file(temp.path()), Some(temp.path().join("deno.json")));
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let config = DenoConfig {
            import_map: Some("map.json".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({ "importMap": "map.json" })
        );
    }
}
