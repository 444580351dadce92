use esload_core::{FileLoader, Loader, LoaderKind, LoaderResolution};
use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;
use std::io::Write;

use crate::config::Config;

/// Loaded module for JSON output.
#[derive(Serialize)]
struct LoadReport {
    resolution: LoaderResolution,
    loader: LoaderKind,
    /// Contents as text; omitted when they are not UTF-8.
    #[serde(skip_serializing_if = "Option::is_none")]
    contents: Option<String>,
    bytes: usize,
}

/// Run the load command.
///
/// Human output writes the module contents to stdout verbatim.
pub fn run(config: &Config, specifier: &str, json: bool) -> Result<()> {
    let url = super::parse_specifier(config, specifier)?;
    let loader = FileLoader::new();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .into_diagnostic()?;

    let resolution = runtime.block_on(loader.resolve(&url)).into_diagnostic()?;
    let specifier = match &resolution {
        LoaderResolution::Esm { specifier } => specifier,
        other => return Err(miette!("Cannot load {url}: unsupported resolution {other:?}")),
    };
    let output = runtime.block_on(loader.load_esm(specifier)).into_diagnostic()?;

    if json {
        return super::print_json(&LoadReport {
            resolution,
            loader: output.loader,
            contents: output.contents.as_text().map(str::to_string),
            bytes: output.contents.as_bytes().len(),
        });
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.contents.as_bytes()).into_diagnostic()?;
    stdout.flush().into_diagnostic()
}
