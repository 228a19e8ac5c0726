//! Domain layer — pure installation types, configuration values and errors.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod desktop;
pub mod error;
pub mod registry;
pub mod target;

pub use config::{HostOverrides, HostPaths, InstallConfig, ProgramSpec};
pub use desktop::DesktopEntry;
pub use error::{InstallError, exit_code_for};
pub use registry::{RegistryKey, RegistryValueType};
pub use target::InstallTarget;
