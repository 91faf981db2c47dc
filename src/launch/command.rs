//! launch::command
//!
//! Terminal and shell command construction.
//!
//! # Forms
//!
//! Primary, opening a terminal tab:
//!
//! ```text
//! wt new-tab --profile <profile> -d <dir> -- <claude> [remote-control] <flags...>
//! ```
//!
//! With a pre-launch command the tab runs a shell instead, which executes the
//! command and then the assistant:
//!
//! ```text
//! wt new-tab --profile <profile> -d <dir> -- pwsh -NoExit -Command "<pre>; & '<claude>' '<flag>'..."
//! ```
//!
//! Fallback, when the terminal cannot be started:
//!
//! ```text
//! pwsh -NoExit -WorkingDirectory <dir> -Command "& '<claude>' '<flag>'..."
//! ```

use super::LaunchRequest;

/// Subcommand that starts the assistant in remote-control mode.
pub const REMOTE_CONTROL_ARG: &str = "remote-control";

/// A program plus its argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl TerminalCommand {
    /// The terminal-tab invocation.
    pub fn primary(request: &LaunchRequest, terminal: &str, shell: &str) -> Self {
        let mut args = vec![
            "new-tab".to_string(),
            "--profile".to_string(),
            request.terminal_profile.clone(),
            "-d".to_string(),
            request.project_path.clone(),
            "--".to_string(),
        ];

        if pre_launch(request).is_some() {
            args.extend([
                shell.to_string(),
                "-NoExit".to_string(),
                "-Command".to_string(),
                shell_script(request),
            ]);
        } else {
            args.push(request.claude_path.clone());
            if request.remote_control {
                args.push(REMOTE_CONTROL_ARG.to_string());
            }
            args.extend(request.flags.iter().cloned());
        }

        Self {
            program: terminal.to_string(),
            args,
        }
    }

    /// The plain-shell invocation used when the terminal fails.
    pub fn fallback(request: &LaunchRequest, shell: &str) -> Self {
        Self {
            program: shell.to_string(),
            args: vec![
                "-NoExit".to_string(),
                "-WorkingDirectory".to_string(),
                request.project_path.clone(),
                "-Command".to_string(),
                shell_script(request),
            ],
        }
    }

    /// Human-readable command line.
    ///
    /// Arguments with whitespace are shown in double quotes. The string is
    /// for display and logging only; spawning uses the argument vector.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(display_arg)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn display_arg(arg: &str) -> String {
    if arg.is_empty() || arg.contains(char::is_whitespace) {
        format!("\"{arg}\"")
    } else {
        arg.to_string()
    }
}

/// Single-quote for PowerShell, doubling embedded single quotes.
pub fn ps_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// The `-Command` script: optional pre-launch command, then the assistant
/// invoked through the call operator with every argument single-quoted.
pub fn shell_script(request: &LaunchRequest) -> String {
    let mut invocation = vec!["&".to_string(), ps_quote(&request.claude_path)];
    if request.remote_control {
        invocation.push(ps_quote(REMOTE_CONTROL_ARG));
    }
    invocation.extend(request.flags.iter().map(|f| ps_quote(f)));
    let invocation = invocation.join(" ");

    match pre_launch(request) {
        Some(pre) => format!("{}; {}", pre, invocation),
        None => invocation,
    }
}

/// The trimmed pre-launch command, if it has any content.
fn pre_launch(request: &LaunchRequest) -> Option<&str> {
    request
        .pre_launch_command
        .as_deref()
        .map(str::trim)
        .filter(|pre| !pre.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> LaunchRequest {
        LaunchRequest {
            claude_path: "C:\\Users\\me\\.local\\bin\\claude.exe".to_string(),
            project_path: "C:\\code\\site".to_string(),
            terminal_profile: "PowerShell".to_string(),
            flags: vec![
                "--dangerously-skip-permissions".to_string(),
                "--verbose".to_string(),
            ],
            remote_control: false,
            pre_launch_command: None,
        }
    }

    #[test]
    fn primary_without_pre_launch() {
        let cmd = TerminalCommand::primary(&request(), "wt", "pwsh");
        assert_eq!(cmd.program, "wt");
        assert_eq!(
            cmd.args,
            vec![
                "new-tab",
                "--profile",
                "PowerShell",
                "-d",
                "C:\\code\\site",
                "--",
                "C:\\Users\\me\\.local\\bin\\claude.exe",
                "--dangerously-skip-permissions",
                "--verbose",
            ]
        );
    }

    #[test]
    fn remote_control_precedes_flags() {
        let mut req = request();
        req.remote_control = true;
        let cmd = TerminalCommand::primary(&req, "wt", "pwsh");
        let after_sep: Vec<&str> = cmd
            .args
            .iter()
            .skip_while(|a| *a != "--")
            .skip(1)
            .map(String::as_str)
            .collect();
        assert_eq!(
            after_sep,
            vec![
                "C:\\Users\\me\\.local\\bin\\claude.exe",
                "remote-control",
                "--dangerously-skip-permissions",
                "--verbose",
            ]
        );
    }

    #[test]
    fn primary_with_pre_launch_runs_shell() {
        let mut req = request();
        req.pre_launch_command = Some("nvm use 20".to_string());
        req.flags = vec!["--verbose".to_string()];
        let cmd = TerminalCommand::primary(&req, "wt", "pwsh");
        let tail = &cmd.args[6..];
        assert_eq!(tail[0], "pwsh");
        assert_eq!(tail[1], "-NoExit");
        assert_eq!(tail[2], "-Command");
        assert_eq!(
            tail[3],
            "nvm use 20; & 'C:\\Users\\me\\.local\\bin\\claude.exe' '--verbose'"
        );
        assert_eq!(tail.len(), 4);
    }

    #[test]
    fn blank_pre_launch_launches_directly() {
        let mut req = request();
        req.pre_launch_command = Some("   ".to_string());
        assert_eq!(
            TerminalCommand::primary(&req, "wt", "pwsh"),
            TerminalCommand::primary(&request(), "wt", "pwsh")
        );
        assert!(!shell_script(&req).contains(';'));
    }

    #[test]
    fn pre_launch_is_trimmed() {
        let mut req = request();
        req.pre_launch_command = Some("  nvm use 20 \t".to_string());
        req.flags.clear();
        assert_eq!(
            shell_script(&req),
            "nvm use 20; & 'C:\\Users\\me\\.local\\bin\\claude.exe'"
        );
    }

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(ps_quote("it's"), "'it''s'");

        let mut req = request();
        req.claude_path = "C:\\O'Brien\\claude.exe".to_string();
        req.flags.clear();
        assert_eq!(shell_script(&req), "& 'C:\\O''Brien\\claude.exe'");
    }

    #[test]
    fn fallback_form() {
        let mut req = request();
        req.remote_control = true;
        req.flags = vec!["--verbose".to_string()];
        let cmd = TerminalCommand::fallback(&req, "pwsh");
        assert_eq!(cmd.program, "pwsh");
        assert_eq!(
            cmd.args,
            vec![
                "-NoExit",
                "-WorkingDirectory",
                "C:\\code\\site",
                "-Command",
                "& 'C:\\Users\\me\\.local\\bin\\claude.exe' 'remote-control' '--verbose'",
            ]
        );
    }

    #[test]
    fn display_quotes_spaced_args() {
        let mut req = request();
        req.project_path = "C:\\my code".to_string();
        req.flags.clear();
        let cmd = TerminalCommand::primary(&req, "wt", "pwsh");
        assert_eq!(
            cmd.display(),
            "wt new-tab --profile PowerShell -d \"C:\\my code\" -- C:\\Users\\me\\.local\\bin\\claude.exe"
        );
    }
}
