//! launch::detect
//!
//! Locating the assistant executable in its usual install locations.

use std::path::{Path, PathBuf};

use crate::core::settings::DEFAULT_CLAUDE_PATH;

/// Install locations relative to the home directory, most likely first.
pub const CANDIDATES: &[&str] = &[
    ".local/bin/claude.exe",
    ".local/bin/claude",
    "AppData/Local/Programs/claude/claude.exe",
];

/// First candidate under `home` that exists.
pub fn find_in_home(home: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|rel| home.join(rel))
        .find(|candidate| candidate.exists())
}

/// Detected executable path, or the bare default name when nothing is found.
pub fn detect_claude_path() -> String {
    dirs::home_dir()
        .as_deref()
        .and_then(find_in_home)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_CLAUDE_PATH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn nothing_installed() {
        let home = TempDir::new().unwrap();
        assert_eq!(find_in_home(home.path()), None);
    }

    #[test]
    fn first_existing_candidate_wins() {
        let home = TempDir::new().unwrap();
        let programs = home.path().join("AppData/Local/Programs/claude");
        fs::create_dir_all(&programs).unwrap();
        fs::write(programs.join("claude.exe"), "").unwrap();
        assert_eq!(
            find_in_home(home.path()),
            Some(programs.join("claude.exe"))
        );

        let local_bin = home.path().join(".local/bin");
        fs::create_dir_all(&local_bin).unwrap();
        fs::write(local_bin.join("claude"), "").unwrap();
        assert_eq!(find_in_home(home.path()), Some(local_bin.join("claude")));
    }
}
