//! Packaging modes and their filter/rename rules.
//!
//! Every mode is described by a static [`PackagingProfile`]: the predicate
//! deciding which entries go into the archive and the rename rules applied to
//! the entries that do. The rules are fixed per mode and evaluated against
//! entry names relative to the source root.

use crate::filters;
use std::borrow::Cow;
use std::fmt;

/// Which artifact class is being packaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageMode {
    /// Complete build output without debug and intermediate artifacts.
    Full,
    /// Everything under the SDK directory, unfiltered.
    Sdk,
    /// Program database (symbol) files only.
    Symbols,
}

impl PackageMode {
    /// All packaging modes, in release order.
    pub const ALL: [Self; 3] = [Self::Full, Self::Sdk, Self::Symbols];

    /// Returns the filter/rename rules for this mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use distpack_core::PackageMode;
    ///
    /// let profile = PackageMode::Symbols.profile();
    /// assert!(profile.includes("Release64/app.pdb"));
    /// assert!(!profile.includes("Release64/app.exe"));
    /// ```
    #[must_use]
    pub const fn profile(self) -> &'static PackagingProfile {
        match self {
            Self::Full => &FULL,
            Self::Sdk => &SDK,
            Self::Symbols => &SYMBOLS,
        }
    }

    /// Returns a lowercase identifier for the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Sdk => "sdk",
            Self::Symbols => "symbols",
        }
    }
}

impl fmt::Display for PackageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter and rename rules for one packaging mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackagingProfile {
    /// Extensions an entry must carry to be included. Empty means any.
    pub include_extensions: &'static [&'static str],

    /// Extensions that exclude an entry.
    pub exclude_extensions: &'static [&'static str],

    /// Runs of consecutive directory segments that exclude an entry.
    pub exclude_segments: &'static [&'static [&'static str]],

    /// Leading directory renames as `(from, to)` pairs.
    pub renames: &'static [(&'static str, &'static str)],
}

/// Debug configuration output directory.
const DEBUG_BUILD_DIR: &[&str] = &["bin", "Debug"];
const OBJ_DIR: &[&str] = &["obj"];
const TESTS_DIR: &[&str] = &["tests"];

const FULL: PackagingProfile = PackagingProfile {
    include_extensions: &[],
    exclude_extensions: &[".pdb", ".iobj", ".ipdb", ".exp", ".lib"],
    exclude_segments: &[DEBUG_BUILD_DIR],
    renames: &[("Release32", "32bit"), ("Release64", "64bit")],
};

const SDK: PackagingProfile = PackagingProfile {
    include_extensions: &[],
    exclude_extensions: &[],
    exclude_segments: &[],
    renames: &[],
};

const SYMBOLS: PackagingProfile = PackagingProfile {
    include_extensions: &[".pdb"],
    exclude_extensions: &[],
    exclude_segments: &[DEBUG_BUILD_DIR, OBJ_DIR, TESTS_DIR],
    renames: &[],
};

impl PackagingProfile {
    /// Decides whether an entry belongs in the archive.
    ///
    /// # Examples
    ///
    /// ```
    /// use distpack_core::PackageMode;
    ///
    /// let full = PackageMode::Full.profile();
    /// assert!(full.includes("Release64/app.exe"));
    /// assert!(!full.includes("Release64/app.pdb"));
    /// assert!(!full.includes("bin/Debug/tmp.obj"));
    /// ```
    #[must_use]
    pub fn includes(&self, name: &str) -> bool {
        if !self.include_extensions.is_empty()
            && !filters::has_any_extension(name, self.include_extensions)
        {
            return false;
        }

        if filters::has_any_extension(name, self.exclude_extensions) {
            return false;
        }

        !self
            .exclude_segments
            .iter()
            .any(|sequence| filters::contains_segments(name, sequence))
    }

    /// Applies the first matching rename rule to an entry name.
    ///
    /// # Examples
    ///
    /// ```
    /// use distpack_core::PackageMode;
    ///
    /// let full = PackageMode::Full.profile();
    /// assert_eq!(full.rename("Release32/foo/bar.dll"), "32bit/foo/bar.dll");
    /// assert_eq!(full.rename("release64/x.dll"), "64bit/x.dll");
    /// assert_eq!(full.rename("plugins/x.dll"), "plugins/x.dll");
    /// ```
    #[must_use]
    pub fn rename<'a>(&self, name: &'a str) -> Cow<'a, str> {
        self.renames
            .iter()
            .find_map(|(from, to)| filters::rename_leading_segment(name, from, to))
            .map_or(Cow::Borrowed(name), Cow::Owned)
    }

    /// Returns `true` if the profile keeps every entry unchanged.
    #[must_use]
    pub fn is_passthrough(&self) -> bool {
        self.include_extensions.is_empty()
            && self.exclude_extensions.is_empty()
            && self.exclude_segments.is_empty()
            && self.renames.is_empty()
    }
}
