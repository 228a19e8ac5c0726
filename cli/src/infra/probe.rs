//! Filesystem implementation of `InstallProbe`. Read-only.

use std::path::Path;

use crate::application::ports::InstallProbe;

#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl InstallProbe for FsProbe {
    fn is_installed(&self, executable: &Path) -> bool {
        executable.is_file()
    }

    fn runtime_initialized(&self, runners_dir: &Path) -> bool {
        runners_dir.is_dir()
    }

    fn archive_is_file(&self, archive: &Path) -> bool {
        archive.is_file()
    }
}
