//! Source tree enumeration.
//!
//! Walks a build output directory and yields every regular file below it
//! together with its entry name: the path relative to the root, with
//! segments joined by `/` regardless of the host separator.

use crate::PackagingError;
use crate::Result;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// A regular file discovered under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute filesystem path of the file.
    pub path: PathBuf,

    /// Path relative to the source root, `/`-separated.
    pub relative_name: String,

    /// File size in bytes at enumeration time.
    pub size: u64,
}

/// Walks a source directory and collects its files.
///
/// Directories are descended into but never reported. Symbolic links are not
/// followed into directories; a link that resolves to a regular file is
/// reported like the file itself. Entries are visited in file-name order so
/// the resulting archive does not depend on filesystem enumeration order.
///
/// # Examples
///
/// ```no_run
/// use distpack_core::walker::SourceWalker;
/// use std::path::Path;
///
/// let tree = SourceWalker::new(Path::new("build/output")).collect()?;
/// for file in tree.files() {
///     println!("{}", file.relative_name);
/// }
/// # Ok::<(), distpack_core::PackagingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SourceWalker {
    root: PathBuf,
    skip: Option<PathBuf>,
}

impl SourceWalker {
    /// Creates a walker for the given root directory.
    #[must_use]
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            skip: None,
        }
    }

    /// Never reports the file at `path`, even if it lies under the root.
    ///
    /// Used to keep the archive being written out of its own contents.
    #[must_use]
    pub fn skip_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.skip = canonical_file_path(path.as_ref());
        self
    }

    /// Walks the tree and collects every file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The root does not exist or cannot be read
    /// - A directory below the root cannot be read
    /// - A file name is not valid UTF-8
    pub fn collect(&self) -> Result<SourceTree> {
        let root = fs::canonicalize(&self.root).map_err(|source| PackagingError::Walk {
            path: self.root.clone(),
            source,
        })?;

        let files = walk_files(&root, self.skip.as_deref()).collect::<Result<Vec<_>>>()?;
        log::debug!("found {} files under {}", files.len(), root.display());

        Ok(SourceTree { root, files })
    }
}

/// Iterates the regular files under an absolute root.
fn walk_files<'a>(
    root: &'a Path,
    skip: Option<&'a Path>,
) -> impl Iterator<Item = Result<SourceFile>> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        // Archive order is sorted, not filesystem enumeration order.
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };

            if skip == Some(entry.path()) {
                log::debug!("skipping output archive {}", entry.path().display());
                return None;
            }

            match file_size(&entry) {
                Ok(Some(size)) => Some(build_source_file(&entry, root, size)),
                Ok(None) => None,
                Err(e) => Some(Err(e)),
            }
        })
}

/// Returns the size of a regular file entry, or `None` for anything else.
fn file_size(entry: &DirEntry) -> Result<Option<u64>> {
    let file_type = entry.file_type();

    if file_type.is_file() {
        return Ok(Some(entry.metadata()?.len()));
    }

    if file_type.is_symlink() {
        return match fs::metadata(entry.path()) {
            Ok(metadata) if metadata.is_file() => Ok(Some(metadata.len())),
            _ => {
                log::debug!("skipping link {}", entry.path().display());
                Ok(None)
            }
        };
    }

    Ok(None)
}

fn build_source_file(entry: &DirEntry, root: &Path, size: u64) -> Result<SourceFile> {
    let path = entry.path().to_path_buf();
    let relative_name = relative_name(&path, root)?;
    Ok(SourceFile {
        path,
        relative_name,
        size,
    })
}

/// Computes the `/`-separated name of `path` relative to `root`.
///
/// # Errors
///
/// Returns an error if `path` is not under `root` or contains a segment that
/// is not valid UTF-8.
///
/// # Examples
///
/// ```
/// use distpack_core::walker::relative_name;
/// use std::path::Path;
///
/// let name = relative_name(Path::new("/build/out/Release64/app.exe"), Path::new("/build/out"))?;
/// assert_eq!(name, "Release64/app.exe");
/// # Ok::<(), distpack_core::PackagingError>(())
/// ```
pub fn relative_name(path: &Path, root: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| PackagingError::InvalidConfiguration {
            reason: format!(
                "{} is not under source directory {}",
                path.display(),
                root.display()
            ),
        })?;

    let mut name = String::new();
    for component in relative.components() {
        let segment =
            component
                .as_os_str()
                .to_str()
                .ok_or_else(|| PackagingError::NonUtf8Path {
                    path: path.to_path_buf(),
                })?;
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(segment);
    }

    Ok(name)
}

/// Resolves a possibly non-existent file path through its parent directory.
fn canonical_file_path(path: &Path) -> Option<PathBuf> {
    let file_name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::canonicalize(parent).ok().map(|dir| dir.join(file_name))
}

/// Files discovered under one source root, in walk order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTree {
    root: PathBuf,
    files: Vec<SourceFile>,
}

impl SourceTree {
    /// Absolute path of the walked root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Final path component of the root, used by the base-name variant.
    #[must_use]
    pub fn base_name(&self) -> Option<&str> {
        self.root.file_name().and_then(|name| name.to_str())
    }

    /// Discovered files in walk order.
    #[must_use]
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Number of discovered files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the root contains no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total size of all discovered files in bytes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

impl IntoIterator for SourceTree {
    type Item = SourceFile;
    type IntoIter = std::vec::IntoIter<SourceFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

impl<'a> IntoIterator for &'a SourceTree {
    type Item = &'a SourceFile;
    type IntoIter = std::slice::Iter<'a, SourceFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
