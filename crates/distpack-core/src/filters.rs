//! Name matching primitives used by packaging profiles.
//!
//! All functions operate on archive entry names: relative paths whose
//! segments are separated by `/`. Comparisons ignore ASCII case.

/// Checks whether an entry name ends with the given extension.
///
/// The extension is expected to include its leading dot.
///
/// # Examples
///
/// ```
/// use distpack_core::filters;
///
/// assert!(filters::has_extension("Release64/app.pdb", ".pdb"));
/// assert!(filters::has_extension("Release64/APP.PDB", ".pdb"));
/// assert!(!filters::has_extension("Release64/app.exe", ".pdb"));
/// ```
#[must_use]
pub fn has_extension(name: &str, extension: &str) -> bool {
    let name = name.as_bytes();
    let extension = extension.as_bytes();
    name.len() >= extension.len()
        && name[name.len() - extension.len()..].eq_ignore_ascii_case(extension)
}

/// Checks whether an entry name ends with any of the given extensions.
#[must_use]
pub fn has_any_extension(name: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| has_extension(name, ext))
}

/// Returns the directory segments of an entry name.
///
/// The final segment is the file name and is never part of the result.
///
/// # Examples
///
/// ```
/// use distpack_core::filters;
///
/// let dirs: Vec<_> = filters::directory_segments("bin/Debug/tmp.obj").collect();
/// assert_eq!(dirs, ["bin", "Debug"]);
///
/// assert_eq!(filters::directory_segments("file.txt").count(), 0);
/// ```
pub fn directory_segments(name: &str) -> impl Iterator<Item = &str> {
    let dirs = name.rsplit_once('/').map_or("", |(dirs, _file)| dirs);
    dirs.split('/').filter(|segment| !segment.is_empty())
}

/// Checks whether the directory part of an entry name contains the given
/// run of consecutive segments.
///
/// Matching is structural: `tests` matches `tests/unit.pdb` but neither
/// `mytests/unit.pdb` nor a file named `tests`. An empty sequence never
/// matches.
///
/// # Examples
///
/// ```
/// use distpack_core::filters;
///
/// assert!(filters::contains_segments("bin/Debug/tmp.obj", &["bin", "Debug"]));
/// assert!(filters::contains_segments("src/BIN/debug/x.pdb", &["bin", "Debug"]));
/// assert!(!filters::contains_segments("bin/Release/x.pdb", &["bin", "Debug"]));
/// assert!(!filters::contains_segments("mytests/unit.pdb", &["tests"]));
/// ```
#[must_use]
pub fn contains_segments(name: &str, sequence: &[&str]) -> bool {
    if sequence.is_empty() {
        return false;
    }

    let dirs: Vec<&str> = directory_segments(name).collect();
    dirs.windows(sequence.len()).any(|window| {
        window
            .iter()
            .zip(sequence)
            .all(|(segment, expected)| segment.eq_ignore_ascii_case(expected))
    })
}

/// Rewrites the leading directory segment of an entry name.
///
/// Returns `None` when the first segment is not `from` (ignoring case) or when
/// the name has no directory part at all. Only that single segment is
/// replaced; later occurrences are left untouched.
///
/// # Examples
///
/// ```
/// use distpack_core::filters;
///
/// assert_eq!(
///     filters::rename_leading_segment("Release32/foo/bar.dll", "Release32", "32bit"),
///     Some("32bit/foo/bar.dll".to_string())
/// );
/// assert_eq!(
///     filters::rename_leading_segment("release64/x.dll", "Release64", "64bit"),
///     Some("64bit/x.dll".to_string())
/// );
/// assert_eq!(
///     filters::rename_leading_segment("Release640/x.dll", "Release64", "64bit"),
///     None
/// );
/// ```
#[must_use]
pub fn rename_leading_segment(name: &str, from: &str, to: &str) -> Option<String> {
    let (first, rest) = name.split_once('/')?;
    if !first.eq_ignore_ascii_case(from) {
        return None;
    }
    Some(format!("{to}/{rest}"))
}
