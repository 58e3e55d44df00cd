//! Property files written into temporary directories.
//!
//! # Examples
//!
//! ```
//! use optionkit_test_helpers::properties::PropertyFile;
//!
//! let file = PropertyFile::write("app.properties", "name = build\n").expect("write fixture");
//! assert!(file.path().ends_with("app.properties"));
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tempfile::TempDir;

/// A property file that lives as long as the value.
#[derive(Debug)]
pub struct PropertyFile {
    _dir: TempDir,
    root: Utf8PathBuf,
    path: Utf8PathBuf,
}

impl PropertyFile {
    /// Writes `contents` to `name` inside a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot
    /// be written.
    pub fn write(name: &str, contents: &str) -> Result<Self> {
        let fixture = Self::missing(name)?;
        let dir = Dir::open_ambient_dir(&fixture.root, ambient_authority())
            .with_context(|| format!("open {}", fixture.root))?;
        dir.write(name, contents)
            .with_context(|| format!("write {}", fixture.path))?;
        Ok(fixture)
    }

    /// Reserves the path `name` inside a fresh temporary directory without
    /// creating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is not
    /// valid UTF-8.
    pub fn missing(name: &str) -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temp dir is not valid UTF-8: {}", path.display()))?;
        let path = root.join(name);
        Ok(Self {
            _dir: dir,
            root,
            path,
        })
    }

    /// Absolute path of the file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// The temporary directory holding the file.
    #[must_use]
    pub fn dir(&self) -> &Utf8Path {
        &self.root
    }
}

/// Renders `pairs` as `key=value` lines.
#[must_use]
pub fn property_text(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}\n"))
        .collect()
}
