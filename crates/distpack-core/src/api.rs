//! High-level public API for packaging build output.

use std::path::Path;

use crate::PackageMode;
use crate::PackagingConfig;
use crate::PackagingReport;
use crate::ProgressCallback;
use crate::Result;
use crate::archive::write_archive;
use crate::report::NoopProgress;
use crate::walker::SourceWalker;

/// Packages the complete build output for distribution.
///
/// Debug build directories and symbol, intermediate and import-library files
/// are left out; the `Release32` and `Release64` directories are published as
/// `32bit` and `64bit`.
///
/// # Errors
///
/// See [`package`].
///
/// # Examples
///
/// ```no_run
/// use distpack_core::package_full;
///
/// let report = package_full("build/output", "dist/release.zip")?;
/// println!("Packaged {} files", report.files_added());
/// # Ok::<(), distpack_core::PackagingError>(())
/// ```
pub fn package_full<P: AsRef<Path>, Q: AsRef<Path>>(
    source_dir: P,
    destination: Q,
) -> Result<PackagingReport> {
    package(PackageMode::Full, source_dir, destination)
}

/// Packages an SDK directory as-is.
///
/// # Errors
///
/// See [`package`].
pub fn package_sdk<P: AsRef<Path>, Q: AsRef<Path>>(
    source_dir: P,
    destination: Q,
) -> Result<PackagingReport> {
    package(PackageMode::Sdk, source_dir, destination)
}

/// Packages the program database files of a build.
///
/// Only `.pdb` files are kept, excluding those under debug build, `obj` and
/// `tests` directories.
///
/// # Errors
///
/// See [`package`].
pub fn package_symbols<P: AsRef<Path>, Q: AsRef<Path>>(
    source_dir: P,
    destination: Q,
) -> Result<PackagingReport> {
    package(PackageMode::Symbols, source_dir, destination)
}

/// Packages `source_dir` into a ZIP archive at `destination` using the rules
/// of `mode` and the default configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The source directory does not exist or cannot be read
/// - Two files map to the same entry name
/// - A source file cannot be read
/// - The destination cannot be removed, written or replaced
pub fn package<P: AsRef<Path>, Q: AsRef<Path>>(
    mode: PackageMode,
    source_dir: P,
    destination: Q,
) -> Result<PackagingReport> {
    package_with_config(
        mode,
        source_dir,
        destination,
        &PackagingConfig::default(),
        &mut NoopProgress,
    )
}

/// Packages `source_dir` with an explicit configuration and progress observer.
///
/// # Errors
///
/// Returns an error under the same conditions as [`package`], or if the
/// configuration is invalid.
///
/// # Examples
///
/// ```no_run
/// use distpack_core::NoopProgress;
/// use distpack_core::PackageMode;
/// use distpack_core::PackagingConfig;
/// use distpack_core::package_with_config;
///
/// let config = PackagingConfig::default().with_compression_level(6);
/// let report = package_with_config(
///     PackageMode::Symbols,
///     "build/output",
///     "dist/symbols.zip",
///     &config,
///     &mut NoopProgress,
/// )?;
/// # Ok::<(), distpack_core::PackagingError>(())
/// ```
pub fn package_with_config<P: AsRef<Path>, Q: AsRef<Path>>(
    mode: PackageMode,
    source_dir: P,
    destination: Q,
    config: &PackagingConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<PackagingReport> {
    let source_dir = source_dir.as_ref();
    let destination = destination.as_ref();

    config.validate()?;

    log::debug!(
        "packaging {} into {} ({mode} mode)",
        source_dir.display(),
        destination.display()
    );

    let tree = SourceWalker::new(source_dir)
        .skip_path(destination)
        .collect()?;

    write_archive(&tree, mode, destination, config, progress)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::PackagingError;
    use crate::test_utils::read_entry_names;
    use crate::test_utils::write_tree;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_package_full_scenario() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("out");
        write_tree(
            &src,
            &[
                ("Release64/app.exe", "exe"),
                ("Release64/app.pdb", "pdb"),
                ("bin/Debug/tmp.obj", "obj"),
            ],
        );
        let dest = temp.path().join("full.zip");

        let report = package_full(&src, &dest).unwrap();

        assert_eq!(read_entry_names(&dest), ["64bit/app.exe"]);
        assert_eq!(report.files_skipped, 2);
        assert_eq!(report.mode, PackageMode::Full);
    }

    #[test]
    fn test_package_missing_source() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out.zip");

        let err = package_sdk(temp.path().join("missing"), &dest).unwrap_err();

        assert!(err.is_not_found());
        assert!(!dest.exists());
    }

    #[test]
    fn test_package_with_invalid_config() {
        let temp = TempDir::new().unwrap();
        let config = PackagingConfig {
            compression_level: 42,
            ..Default::default()
        };

        let result = package_with_config(
            PackageMode::Sdk,
            temp.path(),
            temp.path().join("out.zip"),
            &config,
            &mut NoopProgress,
        );
        assert!(matches!(
            result,
            Err(PackagingError::InvalidCompressionLevel { level: 42 })
        ));
    }

    #[test]
    fn test_package_destination_inside_source() {
        let temp = TempDir::new().unwrap();
        write_tree(temp.path(), &[("include/a.h", "a")]);
        let dest = temp.path().join("sdk.zip");
        fs::write(&dest, "stale").unwrap();

        package_sdk(temp.path(), &dest).unwrap();

        assert_eq!(read_entry_names(&dest), ["include/a.h"]);
    }
}
