//! Paths for the generated artifacts and the shell rc file.

use std::path::PathBuf;

use crate::error::{Result, SetupError};

/// The two files this tool owns, plus the shell rc target.
pub struct AppPaths {
    /// Claude Code configuration directory (`~/.claude`).
    pub config_dir: PathBuf,
    home: PathBuf,
}

impl AppPaths {
    /// Discover paths from the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::HomeNotFound`] if no home directory can be
    /// determined.
    pub fn new() -> Result<Self> {
        let home = directories::BaseDirs::new()
            .map(|d| d.home_dir().to_path_buf())
            .ok_or(SetupError::HomeNotFound)?;
        Ok(Self::with_home(home))
    }

    /// Build paths rooted at an explicit home directory.
    #[must_use]
    pub fn with_home(home: PathBuf) -> Self {
        Self {
            config_dir: home.join(".claude"),
            home,
        }
    }

    /// Path to the Claude Code settings file.
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Path to the shell-sourceable env snippet.
    #[must_use]
    pub fn env_snippet_file(&self) -> PathBuf {
        self.config_dir.join("bedrock-env.sh")
    }

    /// Select the shell startup file to wire the snippet into.
    ///
    /// Candidates are enumerated from the `$SHELL` basename (zsh before bash
    /// when unknown); the first existing file wins, falling back to
    /// `~/.profile`.
    #[must_use]
    pub fn rc_file(&self) -> PathBuf {
        self.rc_file_for_shell(&std::env::var("SHELL").unwrap_or_default())
    }

    /// Rc file selection for an explicit shell path, for testability.
    #[must_use]
    pub fn rc_file_for_shell(&self, shell: &str) -> PathBuf {
        let shell_name = std::path::Path::new(shell)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("");

        let candidates: &[&str] = match shell_name {
            "zsh" => &[".zshrc"],
            "bash" => &[".bashrc"],
            _ => &[".zshrc", ".bashrc"],
        };

        for name in candidates {
            let path = self.home.join(name);
            if path.exists() {
                return path;
            }
        }
        self.home.join(".profile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_paths_live_under_claude_dir() {
        let paths = AppPaths::with_home(PathBuf::from("/home/u"));
        assert_eq!(paths.settings_file(), PathBuf::from("/home/u/.claude/settings.json"));
        assert_eq!(
            paths.env_snippet_file(),
            PathBuf::from("/home/u/.claude/bedrock-env.sh")
        );
    }

    #[test]
    fn rc_file_falls_back_to_profile() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = AppPaths::with_home(dir.path().to_path_buf());
        // No rc candidates exist yet.
        assert_eq!(paths.rc_file_for_shell("/bin/zsh"), dir.path().join(".profile"));
    }

    #[test]
    fn rc_file_prefers_existing_candidate() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(".bashrc"), "# hi\n").expect("write rc");
        let paths = AppPaths::with_home(dir.path().to_path_buf());
        assert_eq!(paths.rc_file_for_shell("/bin/bash"), dir.path().join(".bashrc"));
    }

    #[test]
    fn unknown_shell_tries_zsh_then_bash() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(".zshrc"), "").expect("write rc");
        std::fs::write(dir.path().join(".bashrc"), "").expect("write rc");
        let paths = AppPaths::with_home(dir.path().to_path_buf());
        assert_eq!(paths.rc_file_for_shell("/bin/fish"), dir.path().join(".zshrc"));
    }
}
