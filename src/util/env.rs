//! Environment detection utilities.

use std::io::IsTerminal;

/// Check if stdout is a TTY.
#[must_use]
pub fn stdout_is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Check if color should be enabled.
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }

    // Check NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check TERM=dumb
    if std::env::var("TERM").is_ok_and(|t| t == "dumb") {
        return false;
    }

    // Only use color if output is a TTY
    stdout_is_tty()
}

/// Check whether an environment variable is set to a truthy value ("1", "true", "yes").
#[must_use]
pub fn env_is_truthy(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| {
        let v = v.trim().to_lowercase();
        v == "1" || v == "true" || v == "yes"
    })
}

/// Read an environment variable, treating empty or whitespace-only values as unset.
#[must_use]
pub fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
