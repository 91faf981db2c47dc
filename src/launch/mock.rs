//! launch::mock
//!
//! Launcher that records requests instead of spawning anything.
//!
//! # Example
//!
//! ```
//! use launchdeck::launch::{LaunchRequest, Launcher, MockLauncher};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let launcher = MockLauncher::succeeding();
//! let request = LaunchRequest {
//!     claude_path: "claude".to_string(),
//!     project_path: "/code/site".to_string(),
//!     terminal_profile: "PowerShell".to_string(),
//!     flags: vec!["--verbose".to_string()],
//!     remote_control: false,
//!     pre_launch_command: None,
//! };
//! assert!(launcher.launch(&request).await.success);
//! assert_eq!(launcher.requests().len(), 1);
//! # });
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::command::TerminalCommand;
use super::{LaunchError, LaunchRequest, LaunchResult, Launcher};

/// Recording launcher.
///
/// Clones share the recorded requests.
#[derive(Debug, Clone)]
pub struct MockLauncher {
    inner: Arc<Mutex<MockLauncherInner>>,
}

#[derive(Debug)]
struct MockLauncherInner {
    fail_with: Option<LaunchError>,
    requests: Vec<LaunchRequest>,
}

impl MockLauncher {
    /// A launcher whose launches all succeed.
    pub fn succeeding() -> Self {
        Self::with_failure(None)
    }

    /// A launcher whose launches all fail with `error`.
    pub fn failing(error: LaunchError) -> Self {
        Self::with_failure(Some(error))
    }

    fn with_failure(fail_with: Option<LaunchError>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockLauncherInner {
                fail_with,
                requests: Vec::new(),
            })),
        }
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<LaunchRequest> {
        self.inner
            .lock()
            .map(|inner| inner.requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Launcher for MockLauncher {
    async fn launch(&self, request: &LaunchRequest) -> LaunchResult {
        let fail_with = match self.inner.lock() {
            Ok(mut inner) => {
                inner.requests.push(request.clone());
                inner.fail_with.clone()
            }
            Err(_) => None,
        };

        match fail_with {
            Some(error) => LaunchResult::failed("", &error),
            None => LaunchResult::started(
                TerminalCommand::primary(request, "wt", "pwsh").display(),
            ),
        }
    }
}
