//! Loader contract between a resolution engine and the bundler.
//!
//! A [`Loader`] resolves specifiers and produces ES module sources. Concrete
//! engines own all fetching and caching; this module supplies the loader kind
//! mapping and [`prepare_module`], which turns fetched bytes into what the
//! bundler loads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::error::{Error, Result};
use crate::media_type::{classify_by_extension, MediaType};
use crate::transform::{transform_raw_into_content, ModuleContents};

/// The bundler's native source loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderKind {
    Js,
    Jsx,
    Ts,
    Tsx,
}

impl LoaderKind {
    /// Get the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Jsx => "jsx",
            Self::Ts => "ts",
            Self::Tsx => "tsx",
        }
    }
}

impl std::fmt::Display for LoaderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a media type to the bundler loader that parses it.
///
/// JSON maps to `js` because [`transform_raw_into_content`] rewrites it into
/// an ES module first. Kinds without a native loader (CommonJS, declarations,
/// Wasm, build info, source maps, unknown) are an error: callers must filter
/// them out before asking.
pub fn media_type_to_loader(media_type: MediaType) -> Result<LoaderKind> {
    match media_type {
        MediaType::JavaScript | MediaType::Mjs | MediaType::Json => Ok(LoaderKind::Js),
        MediaType::Jsx => Ok(LoaderKind::Jsx),
        MediaType::TypeScript | MediaType::Mts => Ok(LoaderKind::Ts),
        MediaType::Tsx => Ok(LoaderKind::Tsx),
        MediaType::Cjs
        | MediaType::Cts
        | MediaType::Dts
        | MediaType::Dmts
        | MediaType::Dcts
        | MediaType::Wasm
        | MediaType::TsBuildInfo
        | MediaType::SourceMap
        | MediaType::Unknown => Err(Error::UnhandledMediaType { media_type }),
    }
}

/// How a specifier resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
#[non_exhaustive]
pub enum LoaderResolution {
    /// An ES module loadable through [`Loader::load_esm`].
    Esm { specifier: Url },
}

/// A module ready for the bundler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadOutput {
    pub contents: ModuleContents,
    pub loader: LoaderKind,
}

/// Capability surface implemented by a resolution engine.
///
/// Implementors hold whatever caches or network clients they need; callers
/// only see these two operations. The trait is object safe, so an engine can
/// be shared as `Arc<dyn Loader>` across a multi-threaded runtime.
#[async_trait]
pub trait Loader: Send + Sync {
    /// Resolve a specifier to a loadable module identity.
    async fn resolve(&self, specifier: &Url) -> Result<LoaderResolution>;

    /// Load the final ES module source for a resolved specifier.
    async fn load_esm(&self, specifier: &Url) -> Result<LoadOutput>;
}

/// Turn fetched bytes into a [`LoadOutput`].
///
/// Fails with [`Error::UnhandledMediaType`] before touching the bytes when the
/// bundler has no loader for `media_type`.
pub fn prepare_module(raw: Vec<u8>, media_type: MediaType) -> Result<LoadOutput> {
    let loader = media_type_to_loader(media_type)?;
    let contents = transform_raw_into_content(raw, media_type)?;
    Ok(LoadOutput { contents, loader })
}

/// Stateless loader for local `file:` modules.
///
/// Reads straight from disk and classifies by extension. No caching.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl FileLoader {
    /// Create a new file loader.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn require_file(specifier: &Url) -> Result<()> {
        if specifier.scheme() == "file" {
            Ok(())
        } else {
            Err(Error::UnsupportedScheme {
                scheme: specifier.scheme().to_string(),
                specifier: specifier.to_string(),
            })
        }
    }
}

#[async_trait]
impl Loader for FileLoader {
    async fn resolve(&self, specifier: &Url) -> Result<LoaderResolution> {
        Self::require_file(specifier)?;
        Ok(LoaderResolution::Esm {
            specifier: specifier.clone(),
        })
    }

    async fn load_esm(&self, specifier: &Url) -> Result<LoadOutput> {
        Self::require_file(specifier)?;
        let path = specifier.to_file_path().map_err(|()| Error::InvalidFileUrl {
            url: specifier.to_string(),
        })?;

        let media_type = classify_by_extension(specifier);
        tracing::debug!(path = %path.display(), %media_type, "loading local module");

        let raw = read_module(&path).await?;
        prepare_module(raw, media_type)
    }
}

async fn read_module(path: &Path) -> Result<Vec<u8>> {
    Ok(tokio::fs::read(path).await?)
}
