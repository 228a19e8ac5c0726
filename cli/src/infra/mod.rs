//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the
//! Bottles CLI adapter, filesystem probes, archive extraction, launcher files
//! and config loading.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod bottles;
pub mod command_runner;
pub mod config;
pub mod desktop;
pub mod payload;
pub mod probe;
