//! Lookup table from logical resource path to expected checksum.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use thiserror::Error;

use crate::ResourceError;

/// Checksum table generated by `build.rs` from the bundled `config/` tree.
const BUNDLED_CHECKSUMS: &str =
    include_str!(concat!(env!("OUT_DIR"), "/datafile-checksums.properties"));

static BUNDLED_INDEX: OnceLock<ChecksumIndex> = OnceLock::new();

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("Malformed checksum entry at line {line}: '{content}'")]
    Malformed { line: usize, content: String },
}

/// Read-only mapping from logical path to hex checksum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumIndex {
    entries: BTreeMap<String, String>,
}

impl ChecksumIndex {
    /// The index of resources bundled with this build.
    ///
    /// # Panics
    ///
    /// Panics if the generated table cannot be parsed. That can only happen
    /// with a broken build, and no bundled resource is usable in that state.
    pub fn bundled() -> &'static ChecksumIndex {
        BUNDLED_INDEX.get_or_init(|| {
            Self::from_properties(BUNDLED_CHECKSUMS)
                .expect("bundled datafile-checksums.properties is malformed")
        })
    }

    /// Parses a properties table of `path=checksum` lines.
    ///
    /// `:` is accepted as separator as well, `#` and `!` start comments.
    pub fn from_properties(text: &str) -> Result<Self, IndexError> {
        let mut entries = BTreeMap::new();

        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let malformed = || IndexError::Malformed {
                line: i + 1,
                content: raw.to_string(),
            };

            let split = line.find(['=', ':']).ok_or_else(malformed)?;
            let key = line[..split].trim();
            let value = line[split + 1..].trim();
            if key.is_empty() {
                return Err(malformed());
            }

            entries.insert(key.to_string(), value.to_string());
        }

        Ok(Self { entries })
    }

    /// Returns the checksum recorded for `identifier`.
    pub fn lookup(&self, identifier: &str) -> Result<&str, ResourceError> {
        self.entries
            .get(identifier)
            .map(String::as_str)
            .ok_or_else(|| ResourceError::MissingChecksum {
                identifier: identifier.to_string(),
                index: self.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by logical path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for ChecksumIndex {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ChecksumIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundled::BundledResources;
    use crate::hash::ChecksumAlgorithm;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_properties_with_comments_and_separators() {
        let index = ChecksumIndex::from_properties(
            "# generated\n\
             ! legacy comment\n\
             \n\
             checkstyle/checkstyle-mada.xml=abc123\n\
             spotless/eclipse-formatter-mada.xml : def456\n",
        )
        .unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("checkstyle/checkstyle-mada.xml").unwrap(), "abc123");
        assert_eq!(index.lookup("spotless/eclipse-formatter-mada.xml").unwrap(), "def456");
    }

    #[test]
    fn rejects_line_without_separator() {
        let err = ChecksumIndex::from_properties("a=1\njust-a-key\n").unwrap_err();
        assert_eq!(
            err,
            IndexError::Malformed {
                line: 2,
                content: "just-a-key".to_string()
            }
        );
    }

    #[test]
    fn missing_entry_reports_identifier_and_full_index() {
        let index = ChecksumIndex::from_properties("checkstyle/checkstyle-mada.xml=abc123").unwrap();

        match index.lookup("checkstyle/unknown.xml") {
            Err(ResourceError::MissingChecksum { identifier, index }) => {
                assert_eq!(identifier, "checkstyle/unknown.xml");
                assert_eq!(index, "{checkstyle/checkstyle-mada.xml=abc123}");
            }
            other => panic!("Expected MissingChecksum, got {other:?}"),
        }
    }

    #[test]
    fn bundled_index_matches_bundled_content() {
        let index = ChecksumIndex::bundled();
        let resources = BundledResources::compiled();

        assert!(!index.is_empty());
        assert_eq!(index.len(), resources.len());
        for (path, checksum) in index.iter() {
            let bytes = resources.get(path).expect("indexed resource is bundled");
            assert_eq!(ChecksumAlgorithm::Sha256.compute(bytes), checksum);
        }
    }

    #[test]
    fn bundled_index_contains_checkstyle_config() {
        assert!(
            ChecksumIndex::bundled()
                .lookup("checkstyle/checkstyle-mada.xml")
                .is_ok()
        );
    }
}
