//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::Output;

use anyhow::Result;

use crate::domain::{DesktopEntry, RegistryValueType};

// ── Value Types ───────────────────────────────────────────────────────────────

/// One `reg add` request against a bottle.
#[derive(Debug, Clone, Copy)]
pub struct RegistryWrite<'a> {
    /// Full key path, e.g. `HKEY_LOCAL_MACHINE\Software\Maxis\The Sims`.
    pub key: &'a str,
    pub value: &'a str,
    pub data: &'a str,
    pub data_type: RegistryValueType,
}

/// A program entry to add to a bottle's program list.
#[derive(Debug, Clone, Copy)]
pub struct ProgramRegistration<'a> {
    pub name: &'a str,
    pub path: &'a Path,
    pub launch_options: &'a str,
}

/// Result of a program registration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The program was added to the bottle.
    Added,
    /// A program with the same name was already listed; nothing was run.
    AlreadyPresent,
}

/// What happened to the backup during the executable patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupState {
    /// The original executable was moved to the backup path.
    Created,
    /// A backup already existed and was left untouched.
    Kept,
}

/// Result of a launcher write request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherState {
    Written,
    /// A launcher already existed at the path and was not modified.
    AlreadyPresent,
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program to completion and capture its output.
    ///
    /// A non-zero exit is not an error at this layer; callers inspect
    /// `Output::status`.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or waited on.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
}

// ── Container Port ────────────────────────────────────────────────────────────

/// Operations against the external container manager (Bottles).
///
/// Every method blocks until the tool exits and fails with
/// `InstallError::ToolFailed` on a non-zero exit.
#[allow(async_fn_in_trait)]
pub trait ContainerManager {
    /// Launch the manager's GUI so the user can finish its first-run wizard.
    /// Returns once the user closes it.
    async fn first_run_setup(&self) -> Result<()>;

    /// Create a new container with the given environment preset.
    ///
    /// Not idempotent: call at most once per run.
    async fn create_container(&self, name: &str, environment: &str) -> Result<()>;

    /// Add or overwrite a single registry value in the container.
    async fn set_registry_value(&self, container: &str, write: &RegistryWrite<'_>) -> Result<()>;

    /// Register a program unless one with the same name is already listed.
    async fn register_program(
        &self,
        container: &str,
        program: &ProgramRegistration<'_>,
    ) -> Result<Registration>;
}

// ── Filesystem Ports ──────────────────────────────────────────────────────────

/// Read-only checks used to decide which steps to run.
pub trait InstallProbe {
    /// `true` if the game executable already exists.
    fn is_installed(&self, executable: &Path) -> bool;
    /// `true` if the container manager has completed first-run setup.
    fn runtime_initialized(&self, runners_dir: &Path) -> bool;
    /// `true` if `archive` points at an existing regular file.
    fn archive_is_file(&self, archive: &Path) -> bool;
}

/// Places the game data and swaps in the replacement executable.
pub trait PayloadInstaller {
    /// Copy `archive` into `drive_c` and extract it there.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or an unsafe archive entry.
    fn place(&self, archive: &Path, drive_c: &Path) -> Result<()>;

    /// Move `executable` to `backup` and copy `replacement` in its place.
    ///
    /// # Errors
    ///
    /// Returns an error if `replacement` is missing or any file operation fails.
    fn patch_executable(
        &self,
        executable: &Path,
        backup: &Path,
        replacement: &Path,
    ) -> Result<BackupState>;
}

/// Writes host desktop launchers.
pub trait LauncherWriter {
    /// Write `entry` to `path` unless a file already exists there.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    fn write_launcher(&self, path: &Path, entry: &DesktopEntry<'_>) -> Result<LauncherState>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
