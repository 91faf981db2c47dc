//! launch::validate
//!
//! Input checks run before anything is spawned.
//!
//! The terminal receives the executable, project path, profile and flags as
//! separate arguments, but the shell fallback and the pre-launch form embed
//! them in a command string. Anything carrying shell metacharacters is
//! refused outright rather than escaped.

use std::path::{Path, PathBuf};

use crate::core::types::{FlagName, SHELL_METACHARACTERS};

use super::{LaunchError, LaunchRequest};

/// Check a request. Returns the first problem found.
pub fn validate(request: &LaunchRequest) -> Result<(), LaunchError> {
    if has_metacharacters(&request.claude_path) {
        return Err(LaunchError::UnsafeClaudePath);
    }
    if has_metacharacters(&request.project_path) {
        return Err(LaunchError::UnsafeProjectPath);
    }
    if !is_safe_profile(&request.terminal_profile) {
        return Err(LaunchError::UnsafeProfile);
    }
    if let Some(flag) = request.flags.iter().find(|f| !FlagName::is_valid(f)) {
        return Err(LaunchError::UnsafeFlag(flag.clone()));
    }
    // The pre-launch command is user shell code by intent; only line breaks
    // would let it escape the single -Command argument.
    if let Some(pre) = &request.pre_launch_command {
        if pre.contains(['\n', '\r']) {
            return Err(LaunchError::UnsafePreLaunch);
        }
    }

    let project_dir = Path::new(&request.project_path);
    if !project_dir.is_dir() {
        return Err(LaunchError::MissingProjectDir(project_dir.to_path_buf()));
    }
    if locate_executable(&request.claude_path).is_none() {
        return Err(LaunchError::MissingExecutable(request.claude_path.clone()));
    }

    Ok(())
}

/// Whether `value` holds any shell metacharacter.
pub fn has_metacharacters(value: &str) -> bool {
    value.contains(SHELL_METACHARACTERS)
}

/// Profiles are non-empty and limited to letters, digits, space, `_` and `-`.
pub fn is_safe_profile(profile: &str) -> bool {
    !profile.is_empty()
        && profile
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
}

/// Find the executable on disk.
///
/// A path with a separator must exist as given. A bare name is looked up
/// on `PATH`, trying `.exe` as well.
pub fn locate_executable(program: &str) -> Option<PathBuf> {
    let direct = Path::new(program);
    if program.contains(['/', '\\']) || direct.is_absolute() {
        return direct.exists().then(|| direct.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var).find_map(|dir| {
        [program.to_string(), format!("{program}.exe")]
            .into_iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn request(dir: &TempDir, exe: &Path) -> LaunchRequest {
        LaunchRequest {
            claude_path: exe.to_string_lossy().into_owned(),
            project_path: dir.path().to_string_lossy().into_owned(),
            terminal_profile: "PowerShell".to_string(),
            flags: vec!["--verbose".to_string()],
            remote_control: false,
            pre_launch_command: None,
        }
    }

    fn fixture() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let exe = temp.path().join("claude");
        fs::write(&exe, "").unwrap();
        (temp, exe)
    }

    #[test]
    fn valid_request_passes() {
        let (temp, exe) = fixture();
        assert_eq!(validate(&request(&temp, &exe)), Ok(()));
    }

    #[test]
    fn metacharacters_in_paths() {
        let (temp, exe) = fixture();

        let mut req = request(&temp, &exe);
        req.claude_path.push_str("; rm -rf /");
        assert_eq!(validate(&req), Err(LaunchError::UnsafeClaudePath));

        let mut req = request(&temp, &exe);
        req.project_path = "C:\\code\\$(evil)".to_string();
        assert_eq!(validate(&req), Err(LaunchError::UnsafeProjectPath));
    }

    #[test]
    fn profiles() {
        assert!(is_safe_profile("PowerShell"));
        assert!(is_safe_profile("Ubuntu 22_04-LTS"));
        assert!(!is_safe_profile(""));
        assert!(!is_safe_profile("Power\"Shell"));
        assert!(!is_safe_profile("a;b"));

        let (temp, exe) = fixture();
        let mut req = request(&temp, &exe);
        req.terminal_profile = "x'y".to_string();
        assert_eq!(validate(&req), Err(LaunchError::UnsafeProfile));
    }

    #[test]
    fn bad_flag_is_named() {
        let (temp, exe) = fixture();
        let mut req = request(&temp, &exe);
        req.flags.push("--model=$(id)".to_string());
        assert_eq!(
            validate(&req),
            Err(LaunchError::UnsafeFlag("--model=$(id)".to_string()))
        );
    }

    #[test]
    fn pre_launch_line_breaks() {
        let (temp, exe) = fixture();
        let mut req = request(&temp, &exe);
        req.pre_launch_command = Some("nvm use 20 | Out-Null".to_string());
        assert_eq!(validate(&req), Ok(()));

        req.pre_launch_command = Some("ls\nrm x".to_string());
        assert_eq!(validate(&req), Err(LaunchError::UnsafePreLaunch));
    }

    #[test]
    fn missing_paths() {
        let (temp, exe) = fixture();

        let mut req = request(&temp, &exe);
        req.project_path = temp.path().join("nope").to_string_lossy().into_owned();
        assert!(matches!(
            validate(&req),
            Err(LaunchError::MissingProjectDir(_))
        ));

        let mut req = request(&temp, &exe);
        req.claude_path = temp.path().join("missing-claude").to_string_lossy().into_owned();
        assert!(matches!(
            validate(&req),
            Err(LaunchError::MissingExecutable(_))
        ));
    }

    #[test]
    fn bare_name_not_on_path() {
        assert!(locate_executable("launchdeck-no-such-program-xyz").is_none());
    }
}
