//! Launcher writer — implements `LauncherWriter` with XDG `.desktop` files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{LauncherState, LauncherWriter};
use crate::domain::DesktopEntry;

#[derive(Debug, Default, Clone, Copy)]
pub struct XdgLauncherWriter;

impl LauncherWriter for XdgLauncherWriter {
    fn write_launcher(&self, path: &Path, entry: &DesktopEntry<'_>) -> Result<LauncherState> {
        if path.is_file() {
            return Ok(LauncherState::AlreadyPresent);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        fs::write(path, entry.render())
            .with_context(|| format!("cannot write {}", path.display()))?;
        Ok(LauncherState::Written)
    }
}
