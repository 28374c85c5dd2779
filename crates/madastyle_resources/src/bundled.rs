//! Configuration resources compiled into the binary.

use std::collections::BTreeMap;

use crate::ResourceError;

include!(concat!(env!("OUT_DIR"), "/bundled_resources.rs"));

/// Read-only table of bundled resources keyed by logical path.
#[derive(Debug, Clone, Default)]
pub struct BundledResources {
    resources: BTreeMap<String, &'static [u8]>,
}

impl BundledResources {
    /// Resources bundled from the crate's `config/` directory at build time.
    pub fn compiled() -> Self {
        Self {
            resources: BUNDLED_RESOURCES
                .iter()
                .map(|(path, bytes)| (path.to_string(), *bytes))
                .collect(),
        }
    }

    /// Builds a table from explicit entries (for testing and embedding).
    pub fn from_static(entries: &[(&str, &'static [u8])]) -> Self {
        Self {
            resources: entries
                .iter()
                .map(|(path, bytes)| (path.to_string(), *bytes))
                .collect(),
        }
    }

    pub fn get(&self, logical_path: &str) -> Option<&'static [u8]> {
        self.resources.get(logical_path).copied()
    }

    /// Reads a bundled resource.
    pub fn read(&self, logical_path: &str) -> Result<Vec<u8>, ResourceError> {
        self.get(logical_path)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| ResourceError::ResourceNotFound(logical_path.to_string()))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_table_has_all_config_files() {
        let resources = BundledResources::compiled();
        for path in [
            "checkstyle/checkstyle-mada.xml",
            "checkstyle/suppressions-mada.xml",
            "spotless/eclipse-formatter-mada.xml",
        ] {
            assert!(resources.get(path).is_some(), "missing {path}");
        }
    }

    #[test]
    fn compiled_content_matches_source_file() {
        let on_disk = std::fs::read(
            std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("config/checkstyle/checkstyle-mada.xml"),
        )
        .unwrap();

        let bundled = BundledResources::compiled()
            .read("checkstyle/checkstyle-mada.xml")
            .unwrap();
        assert_eq!(bundled, on_disk);
    }

    #[test]
    fn read_missing_resource_fails() {
        let resources = BundledResources::from_static(&[("a/b.xml", b"<b/>".as_slice())]);

        match resources.read("a/c.xml") {
            Err(ResourceError::ResourceNotFound(path)) => assert_eq!(path, "a/c.xml"),
            other => panic!("Expected ResourceNotFound, got {other:?}"),
        }
    }
}
