//! Package specifier parsing for `npm:` and `jsr:` URLs.

use deno_semver::jsr::JsrPackageReqReference;
use deno_semver::npm::NpmPackageReqReference;
use deno_semver::package::PackageReq;
use serde::Serialize;
use std::path::{Component, Path};
use url::Url;

use crate::error::{Error, Result};
use crate::resolution::FILE_NAMESPACE;

/// A parsed `npm:` specifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NpmSpecifier {
    /// Package name, including the scope.
    pub name: String,
    /// Version requirement, if one was given.
    pub version: Option<String>,
    /// Subpath inside the package, including its leading `/`.
    pub path: Option<String>,
}

/// A parsed `jsr:` specifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsrSpecifier {
    /// Scoped package name (`@scope/name`).
    pub name: String,
    /// Version requirement, if one was given.
    pub version: Option<String>,
    /// Subpath inside the package, including its leading `/`.
    pub path: Option<String>,
}

/// Split a parsed package requirement into `(name, version, path)`.
///
/// A wildcard requirement is what `deno_semver` records when no version was
/// written, so it maps back to `None`.
fn package_parts(
    req: &PackageReq,
    sub_path: Option<&str>,
) -> (String, Option<String>, Option<String>) {
    let version = req.version_req.version_text();
    (
        req.name.to_string(),
        (version != "*").then(|| version.to_string()),
        sub_path.map(|path| format!("/{path}")),
    )
}

/// A scope without a package name (`@scope`) is not a package.
fn is_bare_scope(name: &str) -> bool {
    name.starts_with('@') && !name.contains('/')
}

/// Parse an `npm:` URL such as `npm:@scope/pkg@^1.2/sub/path`.
pub fn parse_npm_specifier(specifier: &Url) -> Result<NpmSpecifier> {
    let invalid = || Error::InvalidNpmSpecifier {
        specifier: specifier.to_string(),
    };
    if specifier.scheme() != "npm" {
        return Err(invalid());
    }

    let reference = NpmPackageReqReference::from_specifier(specifier).map_err(|err| {
        tracing::debug!(%specifier, %err, "rejected npm specifier");
        invalid()
    })?;
    let (name, version, path) = package_parts(reference.req(), reference.sub_path());
    if name.is_empty() || is_bare_scope(&name) {
        return Err(invalid());
    }
    Ok(NpmSpecifier {
        name,
        version,
        path,
    })
}

/// Parse a `jsr:` URL such as `jsr:@std/path@1/posix`.
///
/// JSR packages are always scoped.
pub fn parse_jsr_specifier(specifier: &Url) -> Result<JsrSpecifier> {
    let invalid = || Error::InvalidJsrSpecifier {
        specifier: specifier.to_string(),
    };
    if specifier.scheme() != "jsr" {
        return Err(invalid());
    }

    let reference = JsrPackageReqReference::from_specifier(specifier).map_err(|err| {
        tracing::debug!(%specifier, %err, "rejected jsr specifier");
        invalid()
    })?;
    let (name, version, path) = package_parts(reference.req(), reference.sub_path());
    if !name.starts_with('@') || is_bare_scope(&name) {
        return Err(invalid());
    }
    Ok(JsrSpecifier {
        name,
        version,
        path,
    })
}

/// Whether a `file:` URL points inside a `node_modules` directory.
#[must_use]
pub fn is_in_node_modules(url: &Url) -> bool {
    url.scheme() == FILE_NAMESPACE
        && url
            .path_segments()
            .is_some_and(|mut segments| segments.any(|s| s == "node_modules"))
}

/// Whether a bundler `(namespace, path)` pair points inside `node_modules`.
///
/// An empty namespace is treated as `file`, which is what the bundler reports
/// for entry points.
#[must_use]
pub fn is_node_modules_resolution(namespace: &str, path: &str) -> bool {
    (namespace.is_empty() || namespace == FILE_NAMESPACE)
        && Path::new(path)
            .components()
            .any(|c| matches!(c, Component::Normal(name) if name == "node_modules"))
}
