//! Builder for packaging runs with fluent API.

use std::path::Path;
use std::path::PathBuf;

use crate::PackageMode;
use crate::PackagingConfig;
use crate::PackagingError;
use crate::PackagingReport;
use crate::ProgressCallback;
use crate::Result;
use crate::report::NoopProgress;

/// Builder for packaging runs.
///
/// # Examples
///
/// ```no_run
/// use distpack_core::PackageMode;
/// use distpack_core::Packager;
///
/// let report = Packager::new(PackageMode::Full)
///     .source("build/output")
///     .output("dist/release.zip")
///     .compression_level(9)
///     .create()?;
///
/// println!("Packaged {} files", report.files_added());
/// # Ok::<(), distpack_core::PackagingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Packager {
    mode: PackageMode,
    source: Option<PathBuf>,
    output: Option<PathBuf>,
    config: PackagingConfig,
}

impl Packager {
    /// Creates a builder for the given mode with default settings.
    #[must_use]
    pub fn new(mode: PackageMode) -> Self {
        Self {
            mode,
            source: None,
            output: None,
            config: PackagingConfig::default(),
        }
    }

    /// Sets the directory to package.
    #[must_use]
    pub fn source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the archive path.
    #[must_use]
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the full configuration.
    #[must_use]
    pub fn config(mut self, config: PackagingConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the compression level (1-9).
    ///
    /// Out-of-range values are reported by `create()`.
    #[must_use]
    pub fn compression_level(mut self, level: u8) -> Self {
        self.config.compression_level = level;
        self
    }

    /// Sets whether entry names start with the source directory name.
    #[must_use]
    pub fn include_base_name(mut self, include: bool) -> Self {
        self.config.include_base_name = include;
        self
    }

    /// Sets whether unix permissions are stored.
    #[must_use]
    pub fn preserve_permissions(mut self, preserve: bool) -> Self {
        self.config.preserve_permissions = preserve;
        self
    }

    /// Creates the archive.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Source or output path not set
    /// - Invalid configuration (e.g., invalid compression level)
    /// - Any error of [`crate::package`]
    pub fn create(self) -> Result<PackagingReport> {
        self.create_with_progress(&mut NoopProgress)
    }

    /// Creates the archive, reporting progress to `progress`.
    ///
    /// # Errors
    ///
    /// Same as [`Packager::create`].
    pub fn create_with_progress(
        self,
        progress: &mut dyn ProgressCallback,
    ) -> Result<PackagingReport> {
        let source = self
            .source
            .ok_or_else(|| PackagingError::InvalidConfiguration {
                reason: "source directory not set".to_string(),
            })?;

        let output = self
            .output
            .ok_or_else(|| PackagingError::InvalidConfiguration {
                reason: "output path not set".to_string(),
            })?;

        crate::api::package_with_config(self.mode, source, output, &self.config, progress)
    }
}
