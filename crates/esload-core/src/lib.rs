#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod loader;
pub mod media_type;
pub mod resolution;
pub mod specifier;
pub mod transform;

pub use config::{read_deno_config, validate_deno_config, DenoConfig};
pub use error::{Error, Result};
pub use loader::{
    media_type_to_loader, prepare_module, FileLoader, LoadOutput, Loader, LoaderKind,
    LoaderResolution,
};
pub use media_type::{
    classify_by_content_type, classify_by_extension, classify_by_extension_with_family,
    LanguageFamily, MediaType,
};
pub use resolution::{
    path_to_file_url, resolution_to_url, url_to_resolution, EsbuildResolution,
    EsbuildResolutionParts,
};
pub use specifier::{
    is_in_node_modules, is_node_modules_resolution, parse_jsr_specifier, parse_npm_specifier,
    JsrSpecifier, NpmSpecifier,
};
pub use transform::{transform_raw_into_content, ModuleContents};
