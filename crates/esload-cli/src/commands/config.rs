use esload_core::config::find_config_file;
use esload_core::{read_deno_config, DenoConfig};
use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;
use serde_json::Map;
use std::path::Path;

use crate::config::Config;

/// Validated config for JSON output.
#[derive(Serialize)]
struct ConfigOutput {
    path: String,
    config: DenoConfig,
}

/// Run the config command.
pub fn run(config: &Config, path: Option<&Path>, json: bool) -> Result<()> {
    let path = match path {
        Some(p) => config.absolute(p),
        None => find_config_file(&config.cwd).ok_or_else(|| {
            miette!("No deno.json or deno.jsonc found in {}", config.cwd.display())
        })?,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .into_diagnostic()?;
    let deno_config = runtime
        .block_on(read_deno_config(&path))
        .into_diagnostic()?;

    if json {
        return super::print_json(&ConfigOutput {
            path: path.display().to_string(),
            config: deno_config,
        });
    }

    println!("{}: ok", path.display());
    println!("  imports:   {}", deno_config.imports.as_ref().map_or(0, Map::len));
    println!("  scopes:    {}", deno_config.scopes.as_ref().map_or(0, Map::len));
    println!("  lock:      {}", deno_config.lock.as_deref().unwrap_or("-"));
    println!("  importMap: {}", deno_config.import_map.as_deref().unwrap_or("-"));
    Ok(())
}
