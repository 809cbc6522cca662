//! ZIP archive writing.
//!
//! Entries are written into a temporary file next to the destination which is
//! renamed over the destination only after the archive has been finished and
//! synced. A failure at any point leaves no partial archive behind.

use crate::PackageMode;
use crate::PackagingConfig;
use crate::PackagingError;
use crate::PackagingReport;
use crate::ProgressCallback;
use crate::Result;
use crate::profile::PackagingProfile;
use crate::walker::SourceFile;
use crate::walker::SourceTree;
use std::collections::HashMap;
use std::fs;
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Size of the buffer used to stream file contents into the archive.
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Files at or above this size need ZIP64 extensions.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// A source file selected for the archive, with its final entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry<'a> {
    /// File the entry is read from.
    pub source: &'a SourceFile,

    /// Name of the entry inside the archive.
    pub name: String,
}

/// Applies a profile to a source tree and returns the entries to write.
///
/// Filtering and renaming operate on names relative to the source root; the
/// base-name prefix, when enabled, is added afterwards.
///
/// Returns the planned entries and the number of files filtered out.
///
/// # Errors
///
/// Returns an error if:
/// - The base name is requested but is not valid UTF-8
/// - Two files end up with the same entry name
///
/// # Examples
///
/// ```no_run
/// use distpack_core::PackageMode;
/// use distpack_core::PackagingConfig;
/// use distpack_core::archive::plan_entries;
/// use distpack_core::walker::SourceWalker;
///
/// let tree = SourceWalker::new("build/output").collect()?;
/// let (entries, skipped) =
///     plan_entries(&tree, PackageMode::Full.profile(), &PackagingConfig::default())?;
/// println!("{} entries, {} skipped", entries.len(), skipped);
/// # Ok::<(), distpack_core::PackagingError>(())
/// ```
pub fn plan_entries<'a>(
    tree: &'a SourceTree,
    profile: &PackagingProfile,
    config: &PackagingConfig,
) -> Result<(Vec<PlannedEntry<'a>>, usize)> {
    let prefix = if config.include_base_name {
        base_name_prefix(tree)?
    } else {
        None
    };

    let mut entries = Vec::with_capacity(tree.len());
    let mut claimed: HashMap<String, &SourceFile> = HashMap::new();
    let mut skipped = 0;

    for source in tree {
        if !profile.includes(&source.relative_name) {
            log::debug!("excluded {}", source.relative_name);
            skipped += 1;
            continue;
        }

        let renamed = profile.rename(&source.relative_name);
        if renamed != source.relative_name.as_str() {
            log::debug!("renamed {} to {renamed}", source.relative_name);
        }

        let name = match prefix {
            Some(prefix) => format!("{prefix}/{renamed}"),
            None => renamed.into_owned(),
        };

        if let Some(first) = claimed.get(&name) {
            return Err(PackagingError::DuplicateEntry {
                name,
                first: first.path.clone(),
                second: source.path.clone(),
            });
        }
        claimed.insert(name.clone(), source);

        entries.push(PlannedEntry { source, name });
    }

    Ok((entries, skipped))
}

fn base_name_prefix(tree: &SourceTree) -> Result<Option<&str>> {
    match tree.root().file_name() {
        Some(name) => name
            .to_str()
            .map(Some)
            .ok_or_else(|| PackagingError::NonUtf8Path {
                path: tree.root().to_path_buf(),
            }),
        None => Ok(None),
    }
}

/// Writes a source tree into a ZIP archive at `destination` using the rules
/// of `mode`.
///
/// A file already present at `destination` is removed first. The new archive
/// is assembled in a temporary file in the same directory and atomically
/// moved into place once complete.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - Entry planning fails (see [`plan_entries`])
/// - A source file cannot be read
/// - The archive cannot be written or moved into place
pub fn write_archive(
    tree: &SourceTree,
    mode: PackageMode,
    destination: &Path,
    config: &PackagingConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<PackagingReport> {
    config.validate()?;

    let start = Instant::now();
    let mut report = PackagingReport::new(mode);

    let (entries, skipped) = plan_entries(tree, mode.profile(), config)?;
    report.files_skipped = skipped;

    remove_existing(destination)?;

    let temp = tempfile::Builder::new()
        .prefix(".distpack-")
        .suffix(".zip.tmp")
        .tempfile_in(parent_dir(destination))?;

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(i64::from(config.compression_level)));

    let mut zip = ZipWriter::new(BufWriter::new(temp));
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let total = entries.len();

    for (idx, entry) in entries.into_iter().enumerate() {
        progress.on_entry_start(&entry.name, total, idx + 1);
        let bytes = add_file(
            &mut zip,
            entry.source,
            &entry.name,
            config,
            options,
            &mut buffer,
            progress,
        )?;
        progress.on_entry_complete(&entry.name);

        report.bytes_read += bytes;
        report.entries.push(entry.name);
    }

    let temp = zip
        .finish()?
        .into_inner()
        .map_err(io::IntoInnerError::into_error)?;
    report.archive_size = publish(temp, destination)?;
    report.duration = start.elapsed();

    progress.on_complete();

    log::info!(
        "packaged {} ({} mode): {} entries, {} skipped, {} bytes",
        destination.display(),
        mode,
        report.files_added(),
        report.files_skipped,
        report.archive_size
    );

    Ok(report)
}

/// Adds one file to the archive and returns the number of bytes copied.
fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    source: &SourceFile,
    name: &str,
    config: &PackagingConfig,
    options: SimpleFileOptions,
    buffer: &mut [u8],
    progress: &mut dyn ProgressCallback,
) -> Result<u64> {
    let mut file = File::open(&source.path)?;
    let metadata = file.metadata()?;

    let options = options.large_file(metadata.len() >= ZIP64_THRESHOLD);
    let file_options = if config.preserve_permissions {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            options.unix_permissions(metadata.permissions().mode())
        }
        #[cfg(not(unix))]
        {
            options
        }
    } else {
        options
    };

    zip.start_file(name, file_options)?;

    let mut bytes_read = 0u64;
    loop {
        let n = file.read(buffer)?;
        if n == 0 {
            break;
        }
        zip.write_all(&buffer[..n])?;
        bytes_read += n as u64;
        progress.on_bytes_read(n as u64);
    }

    Ok(bytes_read)
}

/// Deletes a previous archive at `destination`, if there is one.
fn remove_existing(destination: &Path) -> Result<()> {
    match fs::remove_file(destination) {
        Ok(()) => {
            log::warn!("replacing existing archive {}", destination.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Syncs the finished temporary archive and renames it to `destination`.
///
/// Returns the size of the published archive.
fn publish(mut temp: NamedTempFile, destination: &Path) -> Result<u64> {
    temp.flush()?;
    temp.as_file().sync_all()?;
    let size = temp.as_file().metadata()?.len();
    temp.persist(destination)
        .map_err(|e| PackagingError::Io(e.error))?;
    Ok(size)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
