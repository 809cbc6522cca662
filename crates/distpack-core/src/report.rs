//! Packaging operation reporting.

use crate::PackageMode;
use std::time::Duration;

/// Report of a packaging operation.
///
/// # Examples
///
/// ```
/// use distpack_core::PackageMode;
/// use distpack_core::PackagingReport;
///
/// let mut report = PackagingReport::new(PackageMode::Full);
/// report.bytes_read = 1000;
/// report.archive_size = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagingReport {
    /// Mode the archive was produced with.
    pub mode: PackageMode,

    /// Entry names written to the archive, in archive order.
    pub entries: Vec<String>,

    /// Number of source files left out by the mode's filter.
    pub files_skipped: usize,

    /// Total uncompressed bytes read from source files.
    pub bytes_read: u64,

    /// Size of the finished archive in bytes.
    pub archive_size: u64,

    /// Wall-clock duration of the operation.
    pub duration: Duration,
}

impl PackagingReport {
    /// Creates an empty report for the given mode.
    #[must_use]
    pub fn new(mode: PackageMode) -> Self {
        Self {
            mode,
            entries: Vec::new(),
            files_skipped: 0,
            bytes_read: 0,
            archive_size: 0,
            duration: Duration::ZERO,
        }
    }

    /// Number of files added to the archive.
    #[must_use]
    pub fn files_added(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the archive holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the compression ratio (uncompressed / archive size).
    ///
    /// Returns 0.0 if either side is zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compression_ratio(&self) -> f64 {
        if self.archive_size == 0 || self.bytes_read == 0 {
            return 0.0;
        }
        self.bytes_read as f64 / self.archive_size as f64
    }
}

/// Observer for packaging progress.
///
/// Implementations can drive progress bars or logging in the caller.
pub trait ProgressCallback {
    /// Called before an entry is written.
    ///
    /// # Arguments
    ///
    /// * `name` - Entry name inside the archive
    /// * `total` - Number of entries that will be written
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, name: &str, total: usize, current: usize);

    /// Called for each chunk of source bytes copied into the archive.
    fn on_bytes_read(&mut self, bytes: u64);

    /// Called after an entry has been fully written.
    fn on_entry_complete(&mut self, name: &str);

    /// Called once the archive is finished and published.
    fn on_complete(&mut self);
}

/// `ProgressCallback` that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _name: &str, _total: usize, _current: usize) {}

    fn on_bytes_read(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _name: &str) {}

    fn on_complete(&mut self) {}
}
