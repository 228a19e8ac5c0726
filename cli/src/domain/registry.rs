//! Registry values injected into the bottle before first launch.
//!
//! The records are passed through to `bottles-cli reg add` verbatim; the
//! data column is already in the textual form the tool expects.

use std::fmt;

/// Root key every record is written under.
pub const SIMS_REGISTRY_ROOT: &str = r"HKEY_LOCAL_MACHINE\Software\Wow6432Node\Maxis\The Sims";

/// Windows registry value types used by the installer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryValueType {
    /// `REG_SZ`
    String,
    /// `REG_DWORD`
    Dword,
}

impl RegistryValueType {
    /// Tag accepted by `--key-type`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "REG_SZ",
            Self::Dword => "REG_DWORD",
        }
    }
}

impl fmt::Display for RegistryValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registry value: name, type tag and data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryKey {
    pub value: &'static str,
    pub data_type: RegistryValueType,
    pub data: &'static str,
}

const fn sz(value: &'static str, data: &'static str) -> RegistryKey {
    RegistryKey {
        value,
        data_type: RegistryValueType::String,
        data,
    }
}

const fn dword(value: &'static str, data: &'static str) -> RegistryKey {
    RegistryKey {
        value,
        data_type: RegistryValueType::Dword,
        data,
    }
}

/// Values the game and its expansion packs look up at startup, in the
/// order they are submitted.
pub const SIMS_REGISTRY_KEYS: &[RegistryKey] = &[
    sz("EP2Installed", "1"),
    sz("EP3Installed", "1"),
    sz("EP3Patch", "2"),
    sz("EP4Installed", "1"),
    sz("EP5Installed", "1"),
    sz("EP5Patch", "1"),
    sz("EP6Installed", "1"),
    sz("EP7Installed", "1"),
    sz("EP8Installed", "1"),
    sz("EPDInstalled", "1"),
    sz("EPDPatch", "1"),
    sz("EPInstalled", "1"),
    sz("Installed", "1"),
    sz("InstallPath", r"C:\The Sims"),
    dword("Language", "1033"),
    sz("SIMS_CURRENT_NEIGHBORHOOD_NUM", "1"),
    sz("SIMS_CURRENT_NEIGHBORHOOD_PATH", "UserData"),
    sz("SIMS_DATA", r"C:\The Sims"),
    sz("SIMS_GAME_EDITION", "255"),
    sz("SIMS_LANGUAGE", "USEnglish"),
    dword("SIMS_SKU", "1"),
    sz("SIMS_SOUND", r"C:\The Sims\SoundData"),
    sz("TELEPORT", "1"),
    sz("Version", "1.2"),
];
