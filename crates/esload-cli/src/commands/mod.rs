pub mod config;
pub mod load;
pub mod media_type;
pub mod resolution;
pub mod version;

use esload_core::path_to_file_url;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::Path;
use url::Url;

use crate::config::Config;

/// Interpret a command-line specifier as a URL.
///
/// Anything that does not parse as an absolute URL with a scheme of two or
/// more characters is a path, resolved against the working directory. The
/// length check keeps Windows drive letters (`C:\...`) out of the URL branch.
pub fn parse_specifier(config: &Config, specifier: &str) -> Result<Url> {
    if let Ok(url) = Url::parse(specifier) {
        if url.scheme().len() > 1 {
            return Ok(url);
        }
    }
    path_to_file_url(&config.absolute(Path::new(specifier))).into_diagnostic()
}

/// Print a value as a single pretty JSON object on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_specifier_url() {
        let config = Config::new(PathBuf::from("/work"));
        let url = parse_specifier(&config, "https://deno.land/x/mod.ts").unwrap();
        assert_eq!(url.scheme(), "https");
        let url = parse_specifier(&config, "npm:preact@10").unwrap();
        assert_eq!(url.scheme(), "npm");
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_specifier_relative_path() {
        let config = Config::new(PathBuf::from("/work"));
        let url = parse_specifier(&config, "src/main.ts").unwrap();
        assert_eq!(url.as_str(), "file:///work/src/main.ts");
    }
}
