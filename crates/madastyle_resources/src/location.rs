//! Caller-supplied configuration locations.

use std::fmt;
use std::path::PathBuf;

use reqwest::Url;

use crate::ResourceError;

/// A configuration location: a local file or a remote URL.
///
/// The kind is decided once when parsing; everything downstream matches on
/// the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    /// Local filesystem path, used as is.
    LocalPath(PathBuf),
    /// `http://` or `https://` URL, cached by the URL text.
    RemoteUrl(Url),
}

impl ConfigLocation {
    /// Classifies a location string.
    ///
    /// Only strings starting with `http://` or `https://` are URLs; anything
    /// else is a local path.
    pub fn parse(location: &str) -> Result<Self, ResourceError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            let url = Url::parse(location).map_err(|source| ResourceError::InvalidLocation {
                location: location.to_string(),
                source,
            })?;
            Ok(Self::RemoteUrl(url))
        } else {
            Ok(Self::LocalPath(PathBuf::from(location)))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteUrl(_))
    }
}

impl fmt::Display for ConfigLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalPath(path) => write!(f, "{}", path.display()),
            Self::RemoteUrl(url) => write!(f, "{url}"),
        }
    }
}
