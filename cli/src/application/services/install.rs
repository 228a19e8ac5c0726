//! Application service — game installation use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! The run is a fixed sequence of steps; any failure aborts it and leaves
//! whatever was already done in place.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{
    BackupState, ContainerManager, InstallProbe, LauncherState, LauncherWriter, PayloadInstaller,
    ProgramRegistration, ProgressReporter, Registration, RegistryWrite,
};
use crate::domain::{DesktopEntry, InstallConfig, InstallError, InstallTarget};

/// Steps of an installation run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStage {
    FirstRunSetup,
    CreateContainer,
    PlacePayload,
    ConfigureRegistry,
    PatchExecutable,
    RegisterProgram,
    IntegrateDesktop,
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FirstRunSetup => "setting up Bottles",
            Self::CreateContainer => "creating bottle",
            Self::PlacePayload => "extracting game data",
            Self::ConfigureRegistry => "updating registry",
            Self::PatchExecutable => "applying no-cd patch",
            Self::RegisterProgram => "registering program",
            Self::IntegrateDesktop => "creating desktop launcher",
        })
    }
}

/// Ports the install service drives.
pub struct InstallPorts<'a, C, P, I, L> {
    pub containers: &'a C,
    pub probe: &'a P,
    pub payload: &'a I,
    pub launcher: &'a L,
}

/// Outcome of the `install_game` use-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The game executable already existed; nothing was done.
    AlreadyInstalled { install_dir: PathBuf },
    /// The game was installed by this run.
    Installed {
        install_dir: PathBuf,
        launcher: PathBuf,
        backup: BackupState,
        program: Registration,
        launcher_state: LauncherState,
    },
}

/// Install the game into a fresh bottle.
///
/// Checks for an existing install first, then validates `archive`, then
/// runs every step in order.
///
/// # Errors
///
/// Returns `InstallError::MissingArchive` / `InvalidArchive` before any side
/// effect when the archive is unusable. Any later failure aborts the run with
/// the failing step attached as context.
pub async fn install_game<C, P, I, L>(
    config: &InstallConfig,
    ports: &InstallPorts<'_, C, P, I, L>,
    reporter: &impl ProgressReporter,
    archive: Option<&Path>,
) -> Result<InstallOutcome>
where
    C: ContainerManager,
    P: InstallProbe,
    I: PayloadInstaller,
    L: LauncherWriter,
{
    let target = config.target();

    if ports.probe.is_installed(&target.executable) {
        return Ok(InstallOutcome::AlreadyInstalled {
            install_dir: target.install_dir().to_path_buf(),
        });
    }

    let archive = validate_archive(ports.probe, archive)?;

    if !ports.probe.runtime_initialized(&target.runners_dir) {
        reporter.step("Bottles has not been set up yet; finish its initial setup and close it");
        ports
            .containers
            .first_run_setup()
            .await
            .context(InstallStage::FirstRunSetup)?;
    }

    reporter.step(&format!("creating bottle '{}'...", config.bottle_id));
    ports
        .containers
        .create_container(config.bottle_id, config.environment)
        .await
        .context(InstallStage::CreateContainer)?;

    reporter.step(&format!("extracting game data from '{}'...", archive.display()));
    ports
        .payload
        .place(archive, &target.drive_c)
        .context(InstallStage::PlacePayload)?;

    reporter.step("updating registry...");
    configure_registry(config, ports.containers)
        .await
        .context(InstallStage::ConfigureRegistry)?;

    reporter.step("applying no-cd patch...");
    let backup = ports
        .payload
        .patch_executable(&target.executable, &target.backup, &config.host.patch_file)
        .context(InstallStage::PatchExecutable)?;
    if backup == BackupState::Kept {
        reporter.warn(&format!("kept existing backup {}", target.backup.display()));
    }

    let program = register_program(config, &target, ports.containers, reporter)
        .await
        .context(InstallStage::RegisterProgram)?;

    let launcher_state = integrate_desktop(config, &target, ports.launcher, reporter)
        .context(InstallStage::IntegrateDesktop)?;

    reporter.success(&format!("'{}' installed", config.program.name));
    Ok(InstallOutcome::Installed {
        install_dir: target.install_dir().to_path_buf(),
        launcher: target.desktop_file,
        backup,
        program,
        launcher_state,
    })
}

fn validate_archive<'a>(probe: &impl InstallProbe, archive: Option<&'a Path>) -> Result<&'a Path> {
    let archive = archive.ok_or(InstallError::MissingArchive)?;
    if !probe.archive_is_file(archive) {
        return Err(InstallError::InvalidArchive {
            path: archive.to_path_buf(),
        }
        .into());
    }
    Ok(archive)
}

/// Submit every registry record once, in list order.
async fn configure_registry(config: &InstallConfig, containers: &impl ContainerManager) -> Result<()> {
    for key in config.registry_keys {
        let write = RegistryWrite {
            key: config.registry_root,
            value: key.value,
            data: key.data,
            data_type: key.data_type,
        };
        containers
            .set_registry_value(config.bottle_id, &write)
            .await
            .with_context(|| format!("setting {}\\{}", config.registry_root, key.value))?;
    }
    Ok(())
}

async fn register_program(
    config: &InstallConfig,
    target: &InstallTarget,
    containers: &impl ContainerManager,
    reporter: &impl ProgressReporter,
) -> Result<Registration> {
    reporter.step(&format!(
        "adding '{}' to bottle '{}'...",
        config.program.name, config.bottle_id
    ));
    let program = ProgramRegistration {
        name: config.program.name,
        path: &target.executable,
        launch_options: config.program.launch_options,
    };
    let registration = containers
        .register_program(config.bottle_id, &program)
        .await?;
    if registration == Registration::AlreadyPresent {
        reporter.warn("program already added to bottle");
    }
    Ok(registration)
}

fn integrate_desktop(
    config: &InstallConfig,
    target: &InstallTarget,
    launcher: &impl LauncherWriter,
    reporter: &impl ProgressReporter,
) -> Result<LauncherState> {
    reporter.step("creating desktop launcher...");
    let entry = DesktopEntry {
        name: config.program.name,
        app_id: config.app_id,
        bottle_id: config.bottle_id,
        icon: &target.icon,
    };
    let state = launcher.write_launcher(&target.desktop_file, &entry)?;
    if state == LauncherState::AlreadyPresent {
        reporter.warn(".desktop file already exists");
    }
    Ok(state)
}
