//! Property-based tests for packaging rules and archive fidelity.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use distpack_core::PackageMode;
use distpack_core::filters;
use distpack_core::package_full;
use distpack_core::package_sdk;
use distpack_core::test_utils::read_entry;
use distpack_core::test_utils::read_entry_names;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Applies a per-character case pattern to an ASCII word.
fn with_casing(word: &str, upper: &[bool]) -> String {
    word.chars()
        .zip(upper.iter().chain(std::iter::repeat(&false)))
        .map(|(c, &up)| if up { c.to_ascii_uppercase() } else { c })
        .collect()
}

fn excluded_extension() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![".pdb", ".iobj", ".ipdb", ".exp", ".lib"])
}

proptest! {
    /// `Release32`/`Release64` in any casing become `32bit`/`64bit`.
    #[test]
    fn prop_release_dirs_renamed_in_any_casing(
        arch in prop::sample::select(vec!["32", "64"]),
        upper in prop::collection::vec(any::<bool>(), 7),
        rest in prop::collection::vec("[a-zA-Z0-9_]{1,12}", 1..4),
        ext in "\\.(exe|dll|txt)",
    ) {
        let leading = format!("{}{arch}", with_casing("release", &upper));
        let tail = format!("{}{ext}", rest.join("/"));
        let name = format!("{leading}/{tail}");

        let profile = PackageMode::Full.profile();
        prop_assert!(profile.includes(&name));
        prop_assert_eq!(profile.rename(&name), format!("{arch}bit/{tail}"));
    }

    /// Renaming never touches a `Release` directory below the top level.
    #[test]
    fn prop_nested_release_dirs_kept(
        parent in "[a-z]{1,8}",
        arch in prop::sample::select(vec!["Release32", "Release64"]),
    ) {
        let name = format!("{parent}/{arch}/app.exe");
        prop_assert_eq!(PackageMode::Full.profile().rename(&name), name.as_str());
    }

    /// Excluded extensions are rejected by the full profile in any casing.
    #[test]
    fn prop_full_rejects_excluded_extensions(
        dirs in prop::collection::vec("[a-zA-Z0-9_]{1,10}", 0..4),
        stem in "[a-zA-Z0-9_]{1,12}",
        ext in excluded_extension(),
        upper in prop::collection::vec(any::<bool>(), 5),
    ) {
        let mut segments = dirs;
        segments.push(format!("{stem}{}", with_casing(ext, &upper)));
        let name = segments.join("/");

        prop_assert!(!PackageMode::Full.profile().includes(&name));
    }

    /// Anything below a `bin/Debug` directory pair is rejected by the full
    /// and symbols profiles.
    #[test]
    fn prop_debug_build_dirs_rejected(
        before in prop::collection::vec("[a-z]{1,8}", 0..3),
        after in prop::collection::vec("[a-z]{1,8}", 0..3),
        upper in prop::collection::vec(any::<bool>(), 5),
    ) {
        let mut segments = before;
        segments.push(with_casing("bin", &upper));
        segments.push(with_casing("debug", &upper[2..]));
        segments.extend(after);
        segments.push("file.pdb".to_string());
        let name = segments.join("/");

        prop_assert!(!PackageMode::Full.profile().includes(&name));
        prop_assert!(!PackageMode::Symbols.profile().includes(&name));
    }

    /// The symbols profile only ever keeps `.pdb` files.
    #[test]
    fn prop_symbols_only_keeps_pdb(name in "([a-zA-Z0-9]{1,8}/){0,3}[a-zA-Z0-9]{1,8}\\.[a-zA-Z]{1,4}") {
        if PackageMode::Symbols.profile().includes(&name) {
            prop_assert!(filters::has_extension(&name, ".pdb"));
        }
    }

    /// The SDK profile keeps every name unchanged.
    #[test]
    fn prop_sdk_is_passthrough(name in "([a-zA-Z0-9._-]{1,10}/){0,4}[a-zA-Z0-9._-]{1,10}") {
        let profile = PackageMode::Sdk.profile();
        prop_assert!(profile.includes(&name));
        prop_assert_eq!(profile.rename(&name), name.as_str());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Every packaged file decompresses to its original bytes.
    #[test]
    fn prop_archive_roundtrip(
        contents in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..4096), 0..8),
    ) {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("sdk");
        fs::create_dir_all(src.join("nested")).unwrap();
        for (i, data) in contents.iter().enumerate() {
            fs::write(src.join("nested").join(format!("file_{i:02}.bin")), data).unwrap();
        }
        let dest = temp.path().join("sdk.zip");

        let report = package_sdk(&src, &dest).unwrap();

        prop_assert_eq!(report.files_added(), contents.len());
        prop_assert_eq!(read_entry_names(&dest).len(), contents.len());
        for (i, data) in contents.iter().enumerate() {
            let entry = read_entry(&dest, &format!("nested/file_{i:02}.bin"));
            prop_assert_eq!(&entry, data);
        }
    }

    /// No entry of a full archive carries an excluded extension.
    #[test]
    fn prop_full_archive_has_no_excluded_files(
        files in prop::collection::btree_set(
            "(Release32|Release64|plugins)/[a-z]{1,6}\\.(exe|dll|pdb|lib|exp|iobj|ipdb)",
            0..12,
        ),
    ) {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("bin");
        fs::create_dir_all(&src).unwrap();
        for name in &files {
            let path = src.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, name.as_bytes()).unwrap();
        }
        let dest = temp.path().join("bin.zip");

        package_full(&src, &dest).unwrap();

        for entry in read_entry_names(&dest) {
            prop_assert!(
                !filters::has_any_extension(&entry, &[".pdb", ".lib", ".exp", ".iobj", ".ipdb"]),
                "excluded file packaged: {}",
                entry
            );
            prop_assert!(!entry.starts_with("Release"), "unrenamed entry: {}", entry);
        }
    }
}
