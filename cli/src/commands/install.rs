//! Install command — wires production adapters into the install service and
//! renders its outcome.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::services::install::{InstallOutcome, InstallPorts, install_game};
use crate::domain::InstallConfig;
use crate::domain::error::{EXIT_ALREADY_INSTALLED, EXIT_SUCCESS, InstallError, exit_code_for};
use crate::infra::bottles::BottlesCli;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::desktop::XdgLauncherWriter;
use crate::infra::payload::ZipPayloadInstaller;
use crate::infra::probe::FsProbe;
use crate::output::{OutputContext, TerminalReporter};

/// Run the installation against the real Bottles CLI and host filesystem.
///
/// # Errors
///
/// Returns an error if the archive is unusable or any installation step fails.
pub async fn run(
    ctx: &OutputContext,
    config: &InstallConfig,
    archive: Option<&str>,
) -> Result<InstallOutcome> {
    let archive = archive.map(resolve_archive);
    let containers = BottlesCli::new(
        TokioCommandRunner,
        config.host.flatpak.to_string_lossy(),
        config.app_id,
    );
    let ports = InstallPorts {
        containers: &containers,
        probe: &FsProbe,
        payload: &ZipPayloadInstaller,
        launcher: &XdgLauncherWriter,
    };
    let reporter = TerminalReporter::new(ctx);

    let outcome = install_game(config, &ports, &reporter, archive.as_deref()).await?;
    render_outcome(ctx, config, &outcome);
    Ok(outcome)
}

/// Print errors for a finished run and pick the process exit code.
#[must_use]
pub fn report(ctx: &OutputContext, result: &Result<InstallOutcome>) -> u8 {
    match result {
        Ok(InstallOutcome::AlreadyInstalled { .. }) => EXIT_ALREADY_INSTALLED,
        Ok(InstallOutcome::Installed { .. }) => EXIT_SUCCESS,
        Err(e) => {
            ctx.error(&format!("{e:#}"));
            if e
                .downcast_ref::<InstallError>()
                .is_some_and(InstallError::is_input_error)
            {
                eprintln!("Usage: sims-bottler 'path/to/sims_game_data.zip'");
            }
            exit_code_for(e)
        }
    }
}

fn render_outcome(ctx: &OutputContext, config: &InstallConfig, outcome: &InstallOutcome) {
    match outcome {
        InstallOutcome::AlreadyInstalled { install_dir } => {
            ctx.info(&format!(
                "'{}' appears to be installed already, nothing to do.",
                config.program.name
            ));
            ctx.kv("Game install path:", &install_dir.display().to_string());
        }
        InstallOutcome::Installed {
            install_dir,
            launcher,
            ..
        } => {
            ctx.kv("Game install path:", &install_dir.display().to_string());
            ctx.kv("Launcher:", &launcher.display().to_string());
        }
    }
}

/// Expand a leading `~` and make the path absolute.
#[must_use]
pub fn resolve_archive(raw: &str) -> PathBuf {
    let expanded = expand_home(raw, dirs::home_dir().as_deref());
    std::path::absolute(&expanded).unwrap_or(expanded)
}

fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    match home {
        Some(home) if raw == "~" => home.to_path_buf(),
        Some(home) => raw
            .strip_prefix("~/")
            .map_or_else(|| PathBuf::from(raw), |rest| home.join(rest)),
        None => PathBuf::from(raw),
    }
}
