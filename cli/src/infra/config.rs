//! Loads the installation config: built-in defaults plus optional host path
//! overrides from a YAML file.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::config::{HostOverrides, HostPaths, InstallConfig};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "SIMS_BOTTLER_CONFIG";

/// Reads `HostOverrides` from `config.yaml`.
pub struct YamlConfigStore;

impl YamlConfigStore {
    /// Load overrides, returning the empty set when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<HostOverrides> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(HostOverrides::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    /// Config file location: `$SIMS_BOTTLER_CONFIG`, else
    /// `~/.config/sims-bottler/config.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined.
    pub fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(val));
        }
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("cannot determine config directory"))?;
        Ok(config_dir.join("sims-bottler").join("config.yaml"))
    }
}

/// Build the `InstallConfig` for this run.
///
/// # Errors
///
/// Returns an error if the home directory or the running binary's location
/// cannot be determined, or the config file is invalid.
pub fn load_install_config() -> Result<InstallConfig> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    let exe = std::env::current_exe().context("cannot locate the running binary")?;
    let binary_dir = exe
        .parent()
        .map_or_else(|| PathBuf::from("."), std::path::Path::to_path_buf);

    let overrides = YamlConfigStore.load()?;
    tracing::debug!(?overrides, "loaded config overrides");
    let host = HostPaths::defaults(&home, &binary_dir).with_overrides(overrides);
    Ok(InstallConfig::sims(host))
}
