//! Media type inference for module specifiers.
//!
//! A module's media type is derived from two signals: the transport
//! content-type (when the module came over HTTP) and the path suffix of its
//! URL. The content-type decides the language family, while the suffix still
//! decides the module-system variant (`.mjs`, `.cts`, `.d.ts`, ...), because
//! servers commonly send one content-type for all of them.

use serde::{Deserialize, Serialize};
use url::Url;

/// The content kind of a module resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    JavaScript,
    Mjs,
    Cjs,
    #[serde(rename = "JSX")]
    Jsx,
    TypeScript,
    Mts,
    Cts,
    #[serde(rename = "TSX")]
    Tsx,
    Dts,
    Dmts,
    Dcts,
    Json,
    Wasm,
    TsBuildInfo,
    SourceMap,
    Unknown,
}

impl MediaType {
    /// Every media type, in declaration order.
    pub const ALL: [MediaType; 16] = [
        Self::JavaScript,
        Self::Mjs,
        Self::Cjs,
        Self::Jsx,
        Self::TypeScript,
        Self::Mts,
        Self::Cts,
        Self::Tsx,
        Self::Dts,
        Self::Dmts,
        Self::Dcts,
        Self::Json,
        Self::Wasm,
        Self::TsBuildInfo,
        Self::SourceMap,
        Self::Unknown,
    ];

    /// Get the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::Mjs => "Mjs",
            Self::Cjs => "Cjs",
            Self::Jsx => "JSX",
            Self::TypeScript => "TypeScript",
            Self::Mts => "Mts",
            Self::Cts => "Cts",
            Self::Tsx => "TSX",
            Self::Dts => "Dts",
            Self::Dmts => "Dmts",
            Self::Dcts => "Dcts",
            Self::Json => "Json",
            Self::Wasm => "Wasm",
            Self::TsBuildInfo => "TsBuildInfo",
            Self::SourceMap => "SourceMap",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether this is a type declaration file (`.d.ts` and siblings).
    #[must_use]
    pub fn is_declaration(&self) -> bool {
        matches!(self, Self::Dts | Self::Dmts | Self::Dcts)
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Language family pinned by a content-type header.
///
/// Used as the fallback kind when the path suffix alone is ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageFamily {
    JavaScript,
    TypeScript,
}

impl LanguageFamily {
    /// The media type this family falls back to.
    #[must_use]
    pub fn default_media_type(self) -> MediaType {
        match self {
            Self::JavaScript => MediaType::JavaScript,
            Self::TypeScript => MediaType::TypeScript,
        }
    }
}

const TYPESCRIPT_CONTENT_TYPES: &[&str] = &[
    "application/typescript",
    "text/typescript",
    "video/vnd.dlna.mpeg-tts",
    "video/mp2t",
    "application/x-typescript",
];

const JAVASCRIPT_CONTENT_TYPES: &[&str] = &[
    "application/javascript",
    "text/javascript",
    "application/ecmascript",
    "text/ecmascript",
    "application/x-javascript",
    "application/node",
];

/// Classify a specifier using its transport content-type, if any.
///
/// Parameters after `;` are ignored and the type is matched case-insensitively.
/// With no content-type, or a generic one (`text/plain`,
/// `application/octet-stream`), the path suffix decides.
#[must_use]
pub fn classify_by_content_type(specifier: &Url, content_type: Option<&str>) -> MediaType {
    let Some(content_type) = content_type else {
        return classify_by_extension(specifier);
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let media_type = match essence.as_str() {
        ct if TYPESCRIPT_CONTENT_TYPES.contains(&ct) => {
            classify_by_extension_with_family(specifier, LanguageFamily::TypeScript)
        }
        ct if JAVASCRIPT_CONTENT_TYPES.contains(&ct) => {
            classify_by_extension_with_family(specifier, LanguageFamily::JavaScript)
        }
        "text/jsx" => MediaType::Jsx,
        "text/tsx" => MediaType::Tsx,
        "application/json" | "text/json" => MediaType::Json,
        "application/wasm" => MediaType::Wasm,
        "text/plain" | "application/octet-stream" => classify_by_extension(specifier),
        _ => MediaType::Unknown,
    };

    tracing::trace!(%specifier, content_type = %essence, %media_type, "classified by content-type");
    media_type
}

/// Classify a specifier from its path suffix alone.
#[must_use]
pub fn classify_by_extension(specifier: &Url) -> MediaType {
    let path = specifier.path();

    match extension(path) {
        Some("ts") if path.ends_with(".d.ts") => MediaType::Dts,
        Some("ts") => MediaType::TypeScript,
        Some("mts") if path.ends_with(".d.mts") => MediaType::Dmts,
        Some("mts") => MediaType::Mts,
        Some("cts") if path.ends_with(".d.cts") => MediaType::Dcts,
        Some("cts") => MediaType::Cts,
        Some("tsx") => MediaType::Tsx,
        Some("js") => MediaType::JavaScript,
        Some("jsx") => MediaType::Jsx,
        Some("mjs") => MediaType::Mjs,
        Some("cjs") => MediaType::Cjs,
        Some("json") => MediaType::Json,
        Some("wasm") => MediaType::Wasm,
        Some("tsbuildinfo") => MediaType::TsBuildInfo,
        Some("map") => MediaType::SourceMap,
        Some(_) => MediaType::Unknown,
        None if path.ends_with("/.tsbuildinfo") => MediaType::TsBuildInfo,
        None => MediaType::Unknown,
    }
}

/// Classify a specifier from its path suffix, falling back to `family`.
///
/// `.jsx`, `.mjs`, `.cjs` and `.tsx` are fixed. `.ts`, `.mts` and `.cts`
/// follow the family, except declaration suffixes, which always win. Under the
/// JavaScript family `.mts` becomes [`MediaType::Mjs`] and `.cts` becomes
/// [`MediaType::Cjs`].
#[must_use]
pub fn classify_by_extension_with_family(specifier: &Url, family: LanguageFamily) -> MediaType {
    let path = specifier.path();

    match extension(path) {
        Some("jsx") => MediaType::Jsx,
        Some("mjs") => MediaType::Mjs,
        Some("cjs") => MediaType::Cjs,
        Some("tsx") => MediaType::Tsx,
        Some("ts") if path.ends_with(".d.ts") => MediaType::Dts,
        Some("mts") if path.ends_with(".d.mts") => MediaType::Dmts,
        Some("mts") => match family {
            LanguageFamily::JavaScript => MediaType::Mjs,
            LanguageFamily::TypeScript => MediaType::Mts,
        },
        Some("cts") if path.ends_with(".d.cts") => MediaType::Dcts,
        Some("cts") => match family {
            LanguageFamily::JavaScript => MediaType::Cjs,
            LanguageFamily::TypeScript => MediaType::Cts,
        },
        _ => family.default_media_type(),
    }
}

/// Extension of the last path segment, without the dot.
///
/// Dotfiles such as `.tsbuildinfo` have no extension.
fn extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&name[idx + 1..]),
    }
}
