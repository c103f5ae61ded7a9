//! Resolving request targets to files beneath the web root.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use tokio::fs;

use crate::parser::encode_request;
use crate::server::error::{ConfigError, Error};

/// Map a file path to the MIME type announced in `Content-Type`.
///
/// Only the extension is looked at, case-insensitively. Anything not in the
/// table, including a missing extension, is `application/octet-stream`.
pub fn content_type(path: impl AsRef<Path>) -> &'static str {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("html") => "text/html",
        Some("txt") => "text/plain",
        Some("jpg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// A file read into memory, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedFile {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// The web root files are served from.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    /// Open the web root. It must exist and be a directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = root.as_ref();
        let invalid = |source| ConfigError::InvalidRoot {
            path: path.to_path_buf(),
            source,
        };

        let root = path.canonicalize().map_err(invalid)?;
        if !root.is_dir() {
            return Err(invalid(io::Error::other("not a directory")));
        }
        Ok(Self { root })
    }

    /// The canonical web root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a request target to a regular file beneath the root.
    ///
    /// The target's raw bytes are appended to the root verbatim, without
    /// decoding or normalization, and the result canonicalized. Targets that do not
    /// exist, escape the root, or name something other than a regular file
    /// are all reported as [`Error::NotFound`].
    pub async fn resolve(&self, target: &str) -> Result<PathBuf, Error> {
        let mut candidate = OsString::from(self.root.as_os_str());
        candidate.push(target_path(target));

        let not_found = || Error::NotFound(target.to_string());

        let resolved = fs::canonicalize(&candidate).await.map_err(|_| not_found())?;
        if !resolved.starts_with(&self.root) {
            warn!(
                target: "WARN",
                "Rejected {target}: resolves to {} outside the web root",
                resolved.display()
            );
            return Err(not_found());
        }

        match fs::metadata(&resolved).await {
            Ok(meta) if meta.is_file() => Ok(resolved),
            _ => Err(not_found()),
        }
    }

    /// Resolve `target` and read the whole file into memory.
    ///
    /// The content type follows the extension of the requested name, not of
    /// whatever a symlink points at.
    pub async fn read(&self, target: &str) -> Result<ServedFile, Error> {
        let path = self.resolve(target).await?;
        let bytes = fs::read(&path).await?;

        Ok(ServedFile {
            content_type: content_type(target),
            bytes,
        })
    }
}

/// The request target as a file system name, byte for byte as the client sent it.
#[cfg(unix)]
fn target_path(target: &str) -> OsString {
    use std::os::unix::ffi::OsStrExt;

    OsStr::from_bytes(&encode_request(target)).to_os_string()
}

/// Without raw byte paths, a target that is not valid UTF-8 cannot name a file.
#[cfg(not(unix))]
fn target_path(target: &str) -> OsString {
    match String::from_utf8(encode_request(target)) {
        Ok(name) => OsString::from(name),
        Err(_) => OsStr::new(target).to_os_string(),
    }
}
