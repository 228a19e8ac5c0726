//! Typed installer errors and the process exit codes they map to.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::fmt::Write as _;
use std::path::PathBuf;

use thiserror::Error;

/// Successful installation.
pub const EXIT_SUCCESS: u8 = 0;
/// Missing or unusable game data archive.
pub const EXIT_BAD_INPUT: u8 = 1;
/// Any failure without a more specific code.
pub const EXIT_FAILURE: u8 = 2;
/// Game already installed; nothing was done.
pub const EXIT_ALREADY_INSTALLED: u8 = 255;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("game data archive was not provided")]
    MissingArchive,

    #[error("game data archive '{}' is not a file", .path.display())]
    InvalidArchive { path: PathBuf },

    #[error("{step} failed ({}){}", describe_code(.code), captured_output(.stdout, .stderr))]
    ToolFailed {
        step: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

impl InstallError {
    /// `true` for errors caused by the command-line input.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingArchive | Self::InvalidArchive { .. })
    }

    /// Process exit code for this error.
    ///
    /// Tool failures propagate the tool's own exit code unless it collides
    /// with one of the reserved codes.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingArchive | Self::InvalidArchive { .. } => EXIT_BAD_INPUT,
            Self::ToolFailed { code, .. } => code
                .and_then(|c| u8::try_from(c).ok())
                .filter(|c| (EXIT_FAILURE..EXIT_ALREADY_INSTALLED).contains(c))
                .unwrap_or(EXIT_FAILURE),
        }
    }
}

/// Exit code for any error surfaced from an installation run.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<InstallError>()
        .map_or(EXIT_FAILURE, InstallError::exit_code)
}

#[allow(clippy::ref_option)] // called with a field borrow from the error attribute
fn describe_code(code: &Option<i32>) -> String {
    match *code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}

fn captured_output(stdout: &str, stderr: &str) -> String {
    let mut out = String::new();
    for (label, text) in [("stdout", stdout.trim()), ("stderr", stderr.trim())] {
        if !text.is_empty() {
            let _ = write!(out, "\n{label}:\n{text}");
        }
    }
    out
}
