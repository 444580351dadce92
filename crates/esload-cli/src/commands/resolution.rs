use esload_core::{
    is_node_modules_resolution, resolution_to_url, url_to_resolution, EsbuildResolution,
    EsbuildResolutionParts,
};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::config::Config;

/// Encoded resolution for JSON output.
#[derive(Serialize)]
struct ResolutionOutput {
    #[serde(flatten)]
    parts: EsbuildResolutionParts,
    in_node_modules: bool,
}

/// Decoded URL for JSON output.
#[derive(Serialize)]
struct UrlOutput {
    url: String,
}

/// Run the resolution command: URL -> (namespace, path).
pub fn encode(config: &Config, specifier: &str, json: bool) -> Result<()> {
    let url = super::parse_specifier(config, specifier)?;
    let resolution = url_to_resolution(&url).into_diagnostic()?;

    if json {
        let parts = resolution.to_parts();
        let in_node_modules = is_node_modules_resolution(&parts.namespace, &parts.path);
        return super::print_json(&ResolutionOutput {
            parts,
            in_node_modules,
        });
    }
    println!("{}\t{}", resolution.namespace(), resolution.path());
    Ok(())
}

/// Run the url command: (namespace, path) -> URL.
pub fn decode(namespace: &str, path: &str, json: bool) -> Result<()> {
    let resolution = EsbuildResolution::new(namespace, path);
    let url = resolution_to_url(&resolution).into_diagnostic()?;

    if json {
        return super::print_json(&UrlOutput {
            url: url.to_string(),
        });
    }
    println!("{url}");
    Ok(())
}
