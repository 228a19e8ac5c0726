//! Installation configuration — identifiers, host paths and registry records.
//!
//! Pure values only. Reading overrides from disk lives in
//! `crate::infra::config`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::registry::{RegistryKey, SIMS_REGISTRY_KEYS, SIMS_REGISTRY_ROOT};
use crate::domain::target::InstallTarget;

// ── Constants ────────────────────────────────────────────────────────────────

/// Flatpak application ID of Bottles.
pub const BOTTLES_APP_ID: &str = "com.usebottles.bottles";
/// Bottle the game is installed into.
pub const SIMS_BOTTLE_ID: &str = "the-sims-complete";
/// Bottles environment preset used for the new bottle.
pub const SIMS_BOTTLE_ENVIRONMENT: &str = "gaming";
/// Display name used for the program entry and the launcher.
pub const SIMS_GAME_NAME: &str = "The Sims - Complete Collection";
/// Game executable, relative to `drive_c`.
pub const SIMS_EXECUTABLE: &str = "The Sims/Sims.exe";
/// Icon shipped with the game data, relative to `drive_c`.
pub const SIMS_ICON: &str = "The Sims/00000000.256";
/// Replacement executable expected next to the installer binary.
pub const PATCH_FILE_NAME: &str = "nocd-patch.bin";
/// Default location of the flatpak binary.
pub const DEFAULT_FLATPAK: &str = "/usr/bin/flatpak";

// ── Host paths ───────────────────────────────────────────────────────────────

/// Host-side locations the installer reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPaths {
    /// `flatpak` binary used to reach `bottles-cli`.
    pub flatpak: PathBuf,
    /// Bottles data directory (`…/data/bottles`), holding `runners/` and `bottles/`.
    pub bottles_data_dir: PathBuf,
    /// Directory the `.desktop` launcher is written to.
    pub applications_dir: PathBuf,
    /// Replacement executable copied over the game binary.
    pub patch_file: PathBuf,
}

impl HostPaths {
    /// Default layout for a Flatpak install of Bottles.
    #[must_use]
    pub fn defaults(home: &Path, binary_dir: &Path) -> Self {
        Self {
            flatpak: PathBuf::from(DEFAULT_FLATPAK),
            bottles_data_dir: home
                .join(".var/app")
                .join(BOTTLES_APP_ID)
                .join("data/bottles"),
            applications_dir: home.join(".local/share/applications"),
            patch_file: binary_dir.join(PATCH_FILE_NAME),
        }
    }

    /// Replace every field the overrides set.
    #[must_use]
    pub fn with_overrides(self, overrides: HostOverrides) -> Self {
        Self {
            flatpak: overrides.flatpak.unwrap_or(self.flatpak),
            bottles_data_dir: overrides.bottles_data_dir.unwrap_or(self.bottles_data_dir),
            applications_dir: overrides.applications_dir.unwrap_or(self.applications_dir),
            patch_file: overrides.patch_file.unwrap_or(self.patch_file),
        }
    }
}

/// Optional host path overrides as stored in `config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostOverrides {
    pub flatpak: Option<PathBuf>,
    pub bottles_data_dir: Option<PathBuf>,
    pub applications_dir: Option<PathBuf>,
    pub patch_file: Option<PathBuf>,
}

// ── Install config ───────────────────────────────────────────────────────────

/// Program entry registered inside the bottle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSpec {
    pub name: &'static str,
    /// Executable path relative to `drive_c`.
    pub executable: &'static str,
    /// Icon path relative to `drive_c`.
    pub icon: &'static str,
    pub launch_options: &'static str,
}

/// Immutable configuration for one installation run.
///
/// Built once at startup and passed by reference into the install service.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    pub host: HostPaths,
    pub app_id: &'static str,
    pub bottle_id: &'static str,
    pub environment: &'static str,
    pub program: ProgramSpec,
    pub registry_root: &'static str,
    pub registry_keys: &'static [RegistryKey],
}

impl InstallConfig {
    /// Configuration for The Sims – Complete Collection.
    #[must_use]
    pub fn sims(host: HostPaths) -> Self {
        Self {
            host,
            app_id: BOTTLES_APP_ID,
            bottle_id: SIMS_BOTTLE_ID,
            environment: SIMS_BOTTLE_ENVIRONMENT,
            program: ProgramSpec {
                name: SIMS_GAME_NAME,
                executable: SIMS_EXECUTABLE,
                icon: SIMS_ICON,
                launch_options: "",
            },
            registry_root: SIMS_REGISTRY_ROOT,
            registry_keys: SIMS_REGISTRY_KEYS,
        }
    }

    /// Paths derived from the host layout and the bottle ID.
    #[must_use]
    pub fn target(&self) -> InstallTarget {
        InstallTarget::resolve(&self.host, self.bottle_id, &self.program)
    }
}
