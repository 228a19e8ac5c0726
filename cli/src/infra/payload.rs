//! Game data placement — zip extraction and the executable swap.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path};

use anyhow::{Context, Result, bail};

use crate::application::ports::{BackupState, PayloadInstaller};

/// Production `PayloadInstaller` working directly on the host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipPayloadInstaller;

impl PayloadInstaller for ZipPayloadInstaller {
    fn place(&self, archive: &Path, drive_c: &Path) -> Result<()> {
        fs::create_dir_all(drive_c).with_context(|| format!("create {}", drive_c.display()))?;

        let file_name = archive
            .file_name()
            .with_context(|| format!("archive path {} has no file name", archive.display()))?;
        let copy = drive_c.join(file_name);
        if !same_file(archive, &copy) {
            fs::copy(archive, &copy).with_context(|| {
                format!("copy {} to {}", archive.display(), copy.display())
            })?;
        }

        extract_zip_to(&copy, drive_c)
    }

    fn patch_executable(
        &self,
        executable: &Path,
        backup: &Path,
        replacement: &Path,
    ) -> Result<BackupState> {
        if !replacement.is_file() {
            bail!("replacement executable {} not found", replacement.display());
        }

        // A backup from an earlier run holds the untouched original.
        let state = if backup.exists() {
            BackupState::Kept
        } else {
            fs::rename(executable, backup).with_context(|| {
                format!("move {} to {}", executable.display(), backup.display())
            })?;
            BackupState::Created
        };

        fs::copy(replacement, executable).with_context(|| {
            format!("copy {} to {}", replacement.display(), executable.display())
        })?;
        Ok(state)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn extract_zip_to(archive: &Path, dest_root: &Path) -> Result<()> {
    let file = File::open(archive).with_context(|| format!("open {}", archive.display()))?;
    let mut zip = zip::ZipArchive::new(file)
        .with_context(|| format!("read zip archive {}", archive.display()))?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let name = entry.name().to_string();
        let path = Path::new(&name);
        if path.is_absolute()
            || path
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("invalid path in game data zip: {name}");
        }

        let out_path = dest_root.join(path);
        if entry.is_dir() {
            fs::create_dir_all(&out_path)
                .with_context(|| format!("create {}", out_path.display()))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }

        let mut out_file =
            File::create(&out_path).with_context(|| format!("create {}", out_path.display()))?;
        io::copy(&mut entry, &mut out_file)
            .with_context(|| format!("write {}", out_path.display()))?;
    }
    Ok(())
}
