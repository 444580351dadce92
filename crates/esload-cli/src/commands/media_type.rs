use esload_core::{
    classify_by_content_type, is_in_node_modules, media_type_to_loader, parse_jsr_specifier,
    parse_npm_specifier, JsrSpecifier, LoaderKind, MediaType, NpmSpecifier,
};
use miette::Result;
use serde::Serialize;

use crate::config::Config;

/// Media type report for JSON output.
#[derive(Serialize)]
struct MediaTypeOutput {
    specifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    media_type: MediaType,
    /// `None` when the bundler has no native loader for this kind.
    loader: Option<LoaderKind>,
    in_node_modules: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    npm: Option<NpmSpecifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    jsr: Option<JsrSpecifier>,
}

/// Run the media-type command.
pub fn run(config: &Config, specifier: &str, content_type: Option<&str>, json: bool) -> Result<()> {
    let url = super::parse_specifier(config, specifier)?;
    let media_type = classify_by_content_type(&url, content_type);
    let loader = media_type_to_loader(media_type).ok();

    if json {
        return super::print_json(&MediaTypeOutput {
            specifier: url.to_string(),
            content_type: content_type.map(str::to_string),
            media_type,
            loader,
            in_node_modules: is_in_node_modules(&url),
            npm: parse_npm_specifier(&url).ok(),
            jsr: parse_jsr_specifier(&url).ok(),
        });
    }

    let loader = loader.map_or("-", |l| l.as_str());
    println!("{media_type}\t{loader}");
    Ok(())
}
