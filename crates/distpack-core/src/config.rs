//! Configuration for packaging operations.

use crate::PackagingError;
use crate::Result;

/// Highest deflate level accepted by the ZIP writer.
pub const MAX_COMPRESSION_LEVEL: u8 = 9;

/// Configuration for packaging operations.
///
/// The per-mode filter and rename rules are fixed; this only controls how
/// entries are written.
///
/// # Examples
///
/// ```
/// use distpack_core::PackagingConfig;
///
/// // Maximum compression, entries relative to the source root
/// let config = PackagingConfig::default();
/// assert_eq!(config.compression_level, 9);
///
/// // Faster packaging with the root directory name kept in entry names
/// let custom = PackagingConfig::default()
///     .with_compression_level(1)
///     .with_include_base_name(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagingConfig {
    /// Deflate compression level (1-9).
    ///
    /// Default: `9` (best compression).
    pub compression_level: u8,

    /// Prefix every entry name with the source directory's own name.
    ///
    /// Default: `false` (entries are relative to the source directory).
    pub include_base_name: bool,

    /// Store unix permission bits of each file in the archive.
    ///
    /// Has no effect on non-unix hosts.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            compression_level: MAX_COMPRESSION_LEVEL,
            include_base_name: false,
            preserve_permissions: true,
        }
    }
}

impl PackagingConfig {
    /// Creates a new `PackagingConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    ///
    /// # Panics
    ///
    /// Panics if the compression level is not in the range 1-9.
    /// Use `validate()` for non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!(
            (1..=MAX_COMPRESSION_LEVEL).contains(&level),
            "compression level must be 1-9"
        );
        self.compression_level = level;
        self
    }

    /// Sets whether entry names start with the source directory name.
    #[must_use]
    pub fn with_include_base_name(mut self, include: bool) -> Self {
        self.include_base_name = include;
        self
    }

    /// Sets whether to preserve permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is not in range 1-9.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_COMPRESSION_LEVEL).contains(&self.compression_level) {
            return Err(PackagingError::InvalidCompressionLevel {
                level: self.compression_level,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_packaging_config_default() {
        let config = PackagingConfig::default();
        assert_eq!(config.compression_level, 9);
        assert!(!config.include_base_name);
        assert!(config.preserve_permissions);
        assert_eq!(config, PackagingConfig::new());
    }

    #[test]
    fn test_packaging_config_builder() {
        let config = PackagingConfig::default()
            .with_compression_level(3)
            .with_include_base_name(true)
            .with_preserve_permissions(false);

        assert_eq!(config.compression_level, 3);
        assert!(config.include_base_name);
        assert!(!config.preserve_permissions);
    }

    #[test]
    fn test_packaging_config_validate_valid() {
        assert!(PackagingConfig::default().validate().is_ok());
        assert!(
            PackagingConfig::default()
                .with_compression_level(1)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_packaging_config_validate_invalid() {
        for level in [0, 10, 255] {
            let config = PackagingConfig {
                compression_level: level,
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(matches!(
                err,
                PackagingError::InvalidCompressionLevel { level: l } if l == level
            ));
        }
    }

    #[test]
    #[should_panic(expected = "compression level must be 1-9")]
    fn test_packaging_config_builder_invalid_compression() {
        let _config = PackagingConfig::default().with_compression_level(0);
    }
}
