//! Filesystem layout of an installation, derived from the bottle ID.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::domain::config::{HostPaths, ProgramSpec};

/// Every path the installer checks or produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    /// `<data>/bottles/<id>`
    pub bottle_root: PathBuf,
    /// Emulated `C:` drive of the bottle.
    pub drive_c: PathBuf,
    pub executable: PathBuf,
    pub icon: PathBuf,
    /// Original executable kept beside the patched one.
    pub backup: PathBuf,
    /// Present once Bottles has completed its first-run setup.
    pub runners_dir: PathBuf,
    pub desktop_file: PathBuf,
}

impl InstallTarget {
    #[must_use]
    pub fn resolve(host: &HostPaths, bottle_id: &str, program: &ProgramSpec) -> Self {
        let bottle_root = host.bottles_data_dir.join("bottles").join(bottle_id);
        let drive_c = bottle_root.join("drive_c");
        let executable = drive_c.join(program.executable);
        let backup = with_suffix(&executable, ".bak");
        Self {
            icon: drive_c.join(program.icon),
            runners_dir: host.bottles_data_dir.join("runners"),
            desktop_file: host.applications_dir.join(format!("{bottle_id}.desktop")),
            bottle_root,
            drive_c,
            executable,
            backup,
        }
    }

    /// Directory holding the game executable.
    #[must_use]
    pub fn install_dir(&self) -> &Path {
        self.executable.parent().unwrap_or(&self.drive_c)
    }
}

/// Append `suffix` to the full file name (`Sims.exe` → `Sims.exe.bak`).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
