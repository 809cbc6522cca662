//! Test utilities for building source trees and inspecting archives.
//!
//! These helpers are shared by unit tests, integration tests and benchmarks.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Creates files (and their parent directories) under `root`.
///
/// Each entry is a tuple of (`/`-separated relative path, content).
///
/// # Examples
///
/// ```
/// use distpack_core::test_utils::write_tree;
///
/// let temp = tempfile::TempDir::new().unwrap();
/// write_tree(temp.path(), &[("Release64/app.exe", "exe"), ("README.txt", "hi")]);
/// assert!(temp.path().join("Release64/app.exe").exists());
/// ```
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    fs::create_dir_all(root).unwrap();
    for (name, content) in files {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// Lists the entry names of a ZIP archive in archive order.
#[must_use]
pub fn read_entry_names(archive: &Path) -> Vec<String> {
    let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
    (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect()
}

/// Reads the decompressed bytes of one entry of a ZIP archive.
#[must_use]
pub fn read_entry(archive: &Path, name: &str) -> Vec<u8> {
    let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
    let mut entry = zip.by_name(name).unwrap();
    let mut data = Vec::new();
    entry.read_to_end(&mut data).unwrap();
    data
}
