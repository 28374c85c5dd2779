//! Checksums command implementation

use madastyle_resources::ChecksumIndex;
use miette::Result;

pub fn run_checksums() -> Result<()> {
    for (identifier, checksum) in ChecksumIndex::bundled().iter() {
        println!("{identifier}={checksum}");
    }
    Ok(())
}
