use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=config");

    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let config_dir = manifest_dir.join("config");

    let mut resources: Vec<(String, PathBuf, String)> = Vec::new();
    for entry in WalkDir::new(&config_dir).sort_by_file_name() {
        let entry = entry.expect("failed to walk bundled config directory");
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(&config_dir)
            .expect("walked entry outside config directory");
        let logical_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");

        let bytes = fs::read(entry.path()).expect("failed to read bundled config file");
        let checksum = hex::encode(Sha256::digest(&bytes));

        println!("cargo:rerun-if-changed={}", entry.path().display());
        resources.push((logical_path, entry.path().to_path_buf(), checksum));
    }

    let mut table = String::from("pub(crate) static BUNDLED_RESOURCES: &[(&str, &[u8])] = &[\n");
    let mut checksums = String::from("# Generated at build time: <logical path>=<sha256>\n");
    for (logical_path, path, checksum) in &resources {
        let absolute = path.to_string_lossy();
        writeln!(
            table,
            "    ({logical_path:?}, include_bytes!({absolute:?}) as &[u8]),"
        )
        .unwrap();
        writeln!(checksums, "{logical_path}={checksum}").unwrap();
    }
    table.push_str("];\n");

    fs::write(out_dir.join("bundled_resources.rs"), table)
        .expect("failed to write bundled resource table");
    fs::write(out_dir.join("datafile-checksums.properties"), checksums)
        .expect("failed to write checksum table");
}
