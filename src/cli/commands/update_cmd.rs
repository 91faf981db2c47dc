//! update command - Check for a newer release

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::Config;
use crate::ui::output;
use crate::update::{ReleaseClient, CURRENT_VERSION};

/// Compare the running version with the latest release.
///
/// A failed check is reported as unavailable rather than as an error; the
/// cause is shown with `--debug`.
pub fn update(ctx: &Context, json: bool) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let v = ctx.verbosity();

    if !config.check_updates() {
        output::print("Update checks are disabled (check_updates = false).", v);
        return Ok(());
    }

    let client = ReleaseClient::new(config.release_api());
    let rt = tokio::runtime::Runtime::new()?;
    let status = match rt.block_on(client.check(CURRENT_VERSION)) {
        Ok(status) => status,
        Err(e) => {
            output::debug(format!("release check failed: {}", e), v);
            output::print("Unable to check for updates.", v);
            return Ok(());
        }
    };

    if json {
        return Ok(output::json(&status)?);
    }

    if status.update_available {
        output::print(
            format!(
                "Update available: {} -> {}",
                status.current_version, status.latest_version
            ),
            v,
        );
        if !status.release_url.is_empty() {
            output::print(status.release_url, v);
        }
    } else {
        output::print(format!("Up to date ({})", status.current_version), v);
    }
    Ok(())
}
