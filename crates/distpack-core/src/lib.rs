//! Packaging of build output trees into distributable ZIP archives.
//!
//! `distpack-core` walks a build output directory, drops artifacts that are
//! not meant for distribution, renames internal directory names to their
//! public counterparts and writes the rest into a deflate-compressed ZIP
//! archive. Three fixed packaging modes are provided:
//!
//! - [`PackageMode::Full`]: the complete build without debug junk, with
//!   `Release32`/`Release64` published as `32bit`/`64bit`
//! - [`PackageMode::Sdk`]: the SDK directory, unfiltered
//! - [`PackageMode::Symbols`]: program database files only
//!
//! Archives are written to a temporary file and moved into place only once
//! complete, so a failed run never leaves a truncated archive behind.
//!
//! # Examples
//!
//! ```no_run
//! use distpack_core::package_full;
//! use distpack_core::package_sdk;
//! use distpack_core::package_symbols;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! package_full("build/bin", "dist/release-bin.zip")?;
//! package_sdk("build/sdk", "dist/release-sdk.zip")?;
//! let report = package_symbols("build/bin", "dist/release-pdb.zip")?;
//! println!("Packaged {} symbol files", report.files_added());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod config;
pub mod error;
pub mod filters;
pub mod packager;
pub mod profile;
pub mod report;
#[doc(hidden)]
pub mod test_utils;
pub mod walker;

// Re-export main API types
pub use api::package;
pub use api::package_full;
pub use api::package_sdk;
pub use api::package_symbols;
pub use api::package_with_config;
pub use config::PackagingConfig;
pub use error::PackagingError;
pub use error::Result;
pub use packager::Packager;
pub use profile::PackageMode;
pub use profile::PackagingProfile;
pub use report::NoopProgress;
pub use report::PackagingReport;
pub use report::ProgressCallback;
pub use walker::SourceFile;
pub use walker::SourceTree;
pub use walker::SourceWalker;
