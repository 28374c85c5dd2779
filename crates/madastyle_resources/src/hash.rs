//! Hex digests used as cache keys.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256, Sha512};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Unknown checksum algorithm: {0} (expected sha256 or sha512)")]
pub struct UnknownAlgorithm(String);

/// Digest algorithm producing a lowercase hex checksum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    /// SHA-256, used for the bundled index and URL keys.
    #[default]
    Sha256,
    /// SHA-512, used for published artifact checksums.
    Sha512,
}

impl ChecksumAlgorithm {
    /// Compute the hex digest of bytes
    pub fn compute(self, bytes: &[u8]) -> String {
        match self {
            Self::Sha256 => hex::encode(Sha256::digest(bytes)),
            Self::Sha512 => hex::encode(Sha512::digest(bytes)),
        }
    }

    /// Length of the hex digest in characters.
    pub fn hex_len(self) -> usize {
        match self {
            Self::Sha256 => 64,
            Self::Sha512 => 128,
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => write!(f, "sha256"),
            Self::Sha512 => write!(f, "sha512"),
        }
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Cache key for a remote location.
///
/// The key is the SHA-256 of the URL text, not of the content served at that
/// URL. A file that changes on the server keeps its key and is not fetched
/// again until the URL itself changes.
pub fn url_checksum(url: &str) -> String {
    ChecksumAlgorithm::Sha256.compute(url.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_sha256() {
        // calculated with `echo -n "hello world" | shasum -a 256`
        assert_eq!(
            ChecksumAlgorithm::Sha256.compute(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_compute_sha512() {
        // calculated with `echo -n "hello world" | shasum -a 512`
        assert_eq!(
            ChecksumAlgorithm::Sha512.compute(b"hello world"),
            "309ecc489c12d6eb4cc40f50c902f2b4d0ed77ee511a7c7a9bcd3ca86d4cd86f\
             989dd35bc5ff499670da34255b45b0cfd830e81f605dcf7dc5542e93ae9cd76f"
        );
    }

    #[test]
    fn test_url_checksum_hashes_url_text() {
        let url = "https://example.org/a/b.xml";
        assert_eq!(url_checksum(url), ChecksumAlgorithm::Sha256.compute(url.as_bytes()));
        assert_ne!(url_checksum(url), url_checksum("https://example.org/a/c.xml"));
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("sha256".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Sha256);
        assert_eq!("SHA-512".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Sha512);
        assert!("md5".parse::<ChecksumAlgorithm>().is_err());
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_compute_returns_lowercase_hex(bytes in any::<Vec<u8>>()) {
            for algorithm in [ChecksumAlgorithm::Sha256, ChecksumAlgorithm::Sha512] {
                let hash = algorithm.compute(&bytes);

                prop_assert_eq!(hash.len(), algorithm.hex_len());
                prop_assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
                prop_assert!(hash.chars().all(|c| !c.is_ascii_uppercase()));
            }
        }
    }
}
