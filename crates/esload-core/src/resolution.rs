//! Codec between resource URLs and bundler resolutions.
//!
//! The bundler identifies modules by a flat `(namespace, path)` pair and uses
//! it as a cache key, so the mapping must round-trip exactly:
//!
//! - `file:///a/b.ts` <-> `("file", "/a/b.ts")`
//! - `https://deno.land/x/mod.ts` <-> `("https", "//deno.land/x/mod.ts")`
//! - `npm:preact@10/hooks` <-> `("npm", "preact@10/hooks")`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{Error, Result};

/// Namespace used by the bundler for local files.
pub const FILE_NAMESPACE: &str = "file";

/// A module identity as the bundler sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EsbuildResolution {
    /// A native filesystem path in the `file` namespace.
    Local(PathBuf),
    /// Any other scheme. `path` is the URL text after `<namespace>:`.
    Remote { namespace: String, path: String },
}

impl EsbuildResolution {
    /// Build a resolution from the bundler's flat pair.
    ///
    /// The `file` namespace always produces [`EsbuildResolution::Local`].
    #[must_use]
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let path = path.into();
        if namespace == FILE_NAMESPACE {
            Self::Local(PathBuf::from(path))
        } else {
            Self::Remote { namespace, path }
        }
    }

    /// The bundler namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        match self {
            Self::Local(_) => FILE_NAMESPACE,
            Self::Remote { namespace, .. } => namespace,
        }
    }

    /// The bundler path, lossily converted for non-UTF-8 local paths.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Local(path) => path.to_string_lossy().into_owned(),
            Self::Remote { path, .. } => path.clone(),
        }
    }

    /// The flat shape exchanged with the bundler.
    #[must_use]
    pub fn to_parts(&self) -> EsbuildResolutionParts {
        EsbuildResolutionParts {
            namespace: self.namespace().to_string(),
            path: self.path(),
        }
    }
}

impl From<EsbuildResolutionParts> for EsbuildResolution {
    fn from(parts: EsbuildResolutionParts) -> Self {
        Self::new(parts.namespace, parts.path)
    }
}

impl std::fmt::Display for EsbuildResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{FILE_NAMESPACE}:{}", path.display()),
            Self::Remote { namespace, path } => write!(f, "{namespace}:{path}"),
        }
    }
}

/// Flat `{ namespace, path }` record used at the bundler plugin boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EsbuildResolutionParts {
    pub namespace: String,
    pub path: String,
}

/// Encode a URL as a bundler resolution.
pub fn url_to_resolution(url: &Url) -> Result<EsbuildResolution> {
    if url.scheme() == FILE_NAMESPACE {
        let path = url.to_file_path().map_err(|()| Error::InvalidFileUrl {
            url: url.to_string(),
        })?;
        return Ok(EsbuildResolution::Local(path));
    }

    let namespace = url.scheme().to_string();
    let path = url.as_str()[namespace.len() + 1..].to_string();
    Ok(EsbuildResolution::Remote { namespace, path })
}

/// Decode a bundler resolution back into a URL.
pub fn resolution_to_url(resolution: &EsbuildResolution) -> Result<Url> {
    match resolution {
        EsbuildResolution::Local(path) => path_to_file_url(path),
        EsbuildResolution::Remote { namespace, path } => Url::parse(&format!("{namespace}:{path}"))
            .map_err(|source| Error::UnsupportedNamespace {
                namespace: namespace.clone(),
                path: path.clone(),
                source,
            }),
    }
}

/// Convert an absolute native path into a `file:` URL.
///
/// Trailing separators and empty segments are kept, so the result converts
/// back to the exact same path.
pub fn path_to_file_url(path: &Path) -> Result<Url> {
    let mut url = Url::from_file_path(path).map_err(|()| Error::InvalidFilePath {
        path: path.to_path_buf(),
    })?;
    restore_separators(&mut url, path);
    Ok(url)
}

/// `Url::from_file_path` rebuilds the URL from `Path::components`, which
/// drops empty segments and a trailing separator. Put them back.
#[cfg(unix)]
fn restore_separators(url: &mut Url, path: &Path) {
    use std::os::unix::ffi::OsStrExt;

    let raw = path.as_os_str().as_bytes();
    if !raw.ends_with(b"/") && !raw.windows(2).any(|pair| pair == b"//") {
        return;
    }

    let encoded: Vec<String> = url
        .path_segments()
        .map(|segments| segments.map(str::to_string).collect())
        .unwrap_or_default();
    let mut encoded = encoded.into_iter();

    let mut rebuilt = String::with_capacity(raw.len());
    for segment in raw.split(|&b| b == b'/').skip(1) {
        rebuilt.push('/');
        match segment {
            b"" => {}
            // Dropped by `components` too, and normalized away by `set_path`.
            b"." => rebuilt.push('.'),
            _ => rebuilt.push_str(&encoded.next().unwrap_or_default()),
        }
    }
    url.set_path(&rebuilt);
}

#[cfg(not(unix))]
fn restore_separators(url: &mut Url, path: &Path) {
    let raw = path.as_os_str().to_string_lossy();
    if (raw.ends_with('\\') || raw.ends_with('/')) && !url.path().ends_with('/') {
        let directory = format!("{}/", url.path());
        url.set_path(&directory);
    }
}
