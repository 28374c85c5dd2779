//! On-disk layout and write protocol of the resource cache.
//!
//! Every entry lives at `<root>/mada-data/<namespace>/<checksum>/<filename>`
//! next to an empty `<filename>.valid` marker. The marker is only created
//! after the target is fully written, so its presence is the sole validity
//! check. A target without marker is treated as a leftover from an
//! interrupted write and replaced by renaming the new content over it.
//!
//! A process killed between creating its temporary file and renaming it
//! leaves a `.tmp*` file in the checksum directory. Such files are never
//! read and never cleaned up.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::ResourceError;

/// Name of the data directory below the cache root.
pub const DATA_DIR: &str = "mada-data";

/// Suffix appended to the target file name to form the marker file name.
pub const MARKER_SUFFIX: &str = ".valid";

/// Location of one cached resource and its validity marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    target: PathBuf,
    marker: PathBuf,
}

impl CacheEntry {
    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn marker(&self) -> &Path {
        &self.marker
    }

    pub fn into_target(self) -> PathBuf {
        self.target
    }
}

/// Checksum-keyed file store rooted in a shared directory.
#[derive(Debug, Clone)]
pub struct CacheStore {
    data_dir: PathBuf,
}

impl CacheStore {
    /// Create a store below `root`. Nothing is created on disk until the
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: root.into().join(DATA_DIR),
        }
    }

    /// The `mada-data` directory holding all entries.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Derives the target and marker paths for a key.
    ///
    /// The result only depends on the arguments. `namespace` may span several
    /// `/`-separated directories; every segment as well as `checksum` and
    /// `filename` must be a plain name so no entry can escape the data
    /// directory.
    pub fn resolve_path(
        &self,
        namespace: &str,
        checksum: &str,
        filename: &str,
    ) -> Result<CacheEntry, ResourceError> {
        let mut dir = self.data_dir.clone();
        for segment in namespace.split('/').filter(|s| !s.is_empty()) {
            dir.push(safe_segment(segment)?);
        }
        dir.push(safe_segment(checksum)?);

        let filename = safe_segment(filename)?;
        Ok(CacheEntry {
            target: dir.join(filename),
            marker: dir.join(format!("{filename}{MARKER_SUFFIX}")),
        })
    }

    /// Whether the entry has been completely written.
    pub fn is_valid(&self, entry: &CacheEntry) -> bool {
        entry.marker.exists()
    }

    /// Writes `content` to the entry and marks it valid.
    ///
    /// The content goes to a temporary file in the target directory that is
    /// renamed onto the target, replacing any leftover in one step, so
    /// readers never observe a partial or missing file. The marker is created
    /// last.
    pub fn store(&self, entry: &CacheEntry, content: &[u8]) -> Result<PathBuf, ResourceError> {
        let dir = entry
            .target
            .parent()
            .ok_or_else(|| invalid_input(&entry.target, "cache entry has no parent directory"))?;

        fs::create_dir_all(dir).map_err(|e| ResourceError::cache_write(&entry.target, e))?;

        if entry.target.exists() {
            warn!("Replacing existing cache file {}", entry.target.display());
        }

        let mut temp = NamedTempFile::new_in(dir)
            .map_err(|e| ResourceError::cache_write(&entry.target, e))?;
        temp.write_all(content)
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| ResourceError::cache_write(&entry.target, e))?;
        temp.persist(&entry.target)
            .map_err(|e| ResourceError::cache_write(&entry.target, e.error))?;

        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&entry.marker)
            .map_err(|e| ResourceError::cache_write(&entry.marker, e))?;

        debug!("Stored {} bytes at {}", content.len(), entry.target.display());
        Ok(entry.target.clone())
    }
}

/// Splits an identifier into namespace directory and file name.
///
/// The namespace is everything before the last `/` with leading separators
/// stripped; it is empty for identifiers without a directory part.
pub fn split_identifier(identifier: &str) -> (&str, &str) {
    let trimmed = identifier.trim_start_matches('/');
    match trimmed.rfind('/') {
        Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
        None => ("", trimmed),
    }
}

/// Turns a URL into a single file name by replacing every character outside
/// `[a-zA-Z0-9.-]` with `_`.
pub fn sanitize_url(url: &str) -> String {
    url.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn safe_segment(segment: &str) -> Result<&str, ResourceError> {
    let mut components = Path::new(segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(c)), None) if c == segment => Ok(segment),
        _ => Err(invalid_input(
            segment,
            "cache path segment must be a plain file name",
        )),
    }
}

fn invalid_input(path: impl AsRef<Path>, msg: &str) -> ResourceError {
    ResourceError::cache_write(path, io::Error::new(io::ErrorKind::InvalidInput, msg))
}
