//! Test utilities for bedrock-setup.
//!
//! Shared helpers for unit and integration tests: serialized environment
//! variable manipulation and a temporary home directory layout.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// Global lock serializing environment mutation across tests.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Sets environment variables for the duration of a scope, restoring the
/// previous values on drop. Holds a global lock so env-dependent tests do not
/// race each other.
pub struct EnvGuard {
    _lock: MutexGuard<'static, ()>,
    prior: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    /// Apply the given variable assignments (`None` removes the variable).
    #[allow(unsafe_code)]
    #[must_use]
    pub fn set(vars: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut prior = Vec::new();

        for (key, value) in vars {
            let key_string = (*key).to_string();
            let existing = std::env::var(key).ok();
            prior.push((key_string, existing));

            unsafe {
                match value {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }

        Self { _lock: lock, prior }
    }
}

impl Drop for EnvGuard {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        for (key, value) in self.prior.drain(..) {
            unsafe {
                match value {
                    Some(val) => std::env::set_var(&key, val),
                    None => std::env::remove_var(&key),
                }
            }
        }
    }
}

/// A temporary home directory with an optional pre-seeded rc file.
pub struct TestHome {
    dir: tempfile::TempDir,
}

impl TestHome {
    /// Create an empty temporary home.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp home"),
        }
    }

    /// Absolute path of the home directory.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// Seed a file (relative to home), creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, content).expect("write seed file");
        path
    }

    /// Read a file back (relative to home).
    #[must_use]
    pub fn read_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(relative)).expect("read file")
    }

    /// Whether a file exists (relative to home).
    #[must_use]
    pub fn exists(&self, relative: &str) -> bool {
        self.dir.path().join(relative).exists()
    }

    /// List backup files next to the given relative path.
    #[must_use]
    pub fn backups_of(&self, relative: &str) -> Vec<PathBuf> {
        let target = self.dir.path().join(relative);
        let parent = target.parent().expect("parent dir");
        let stem = format!(
            "{}.backup.",
            target.file_name().and_then(|n| n.to_str()).expect("file name")
        );
        let Ok(entries) = std::fs::read_dir(parent) else {
            return Vec::new();
        };
        let mut backups: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&stem))
            })
            .collect();
        backups.sort();
        backups
    }
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}
