//! Working-directory guard for tests that read relative property paths.
//!
//! The working directory is process-global, so every change is serialised
//! through one mutex held by the returned guard.
//!
//! # Examples
//!
//! ```no_run
//! use optionkit_test_helpers::cwd;
//!
//! let guard = cwd::set_dir("/tmp/fixtures").expect("set cwd");
//! // Relative paths now resolve against `/tmp/fixtures` until `guard` drops.
//! ```

use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow};
use camino::Utf8PathBuf;
use parking_lot::{Mutex, MutexGuard};

static CWD_MUTEX: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

/// Restores the previous working directory on drop.
#[must_use = "dropping restores the prior working directory"]
pub struct CwdGuard {
    original: Utf8PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    /// Restores the previous working directory now, reporting failures.
    ///
    /// # Errors
    ///
    /// Returns an error if `set_current_dir` fails.
    pub fn restore(&self) -> std::io::Result<()> {
        std::env::set_current_dir(&self.original)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _unused = std::env::set_current_dir(&self.original);
    }
}

/// Makes `path` the working directory until the guard drops.
///
/// # Errors
///
/// Returns an error if the current directory cannot be read or is not valid
/// UTF-8, or if `path` cannot be entered.
pub fn set_dir(path: impl AsRef<std::path::Path>) -> Result<CwdGuard> {
    let lock = CWD_MUTEX.lock();
    let current = std::env::current_dir().context("read current dir")?;
    let original = Utf8PathBuf::from_path_buf(current)
        .map_err(|non_utf8| anyhow!("cwd is not valid UTF-8: {}", non_utf8.display()))?;
    std::env::set_current_dir(path.as_ref()).context("set current dir")?;
    Ok(CwdGuard {
        original,
        _lock: lock,
    })
}
