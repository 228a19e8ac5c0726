//! Bottles CLI adapter — implements `ContainerManager` over `bottles-cli`.
//!
//! `bottles-cli` ships inside the Bottles Flatpak, so every call is issued as
//! `flatpak run --command=bottles-cli com.usebottles.bottles <args>` and routed
//! through a `CommandRunner`.

use std::process::Output;

use anyhow::Result;

use crate::application::ports::{
    CommandRunner, ContainerManager, ProgramRegistration, Registration, RegistryWrite,
};
use crate::domain::InstallError;

/// Selects `bottles-cli` as the Flatpak entry point.
const BOTTLES_CLI_COMMAND: &str = "--command=bottles-cli";

/// Process killed before the first-run GUI is launched.
const BOTTLES_PROCESS: &str = "bottles";

/// Infrastructure adapter that routes all Bottles calls through a `CommandRunner`.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct BottlesCli<R: CommandRunner> {
    runner: R,
    flatpak: String,
    app_id: String,
}

impl<R: CommandRunner> BottlesCli<R> {
    pub fn new(runner: R, flatpak: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            runner,
            flatpak: flatpak.into(),
            app_id: app_id.into(),
        }
    }

    /// Run `bottles-cli <args>` and fail on a non-zero exit.
    async fn bottles_cli(&self, args: &[&str]) -> Result<Output> {
        let mut argv: Vec<&str> = vec!["run", BOTTLES_CLI_COMMAND, self.app_id.as_str()];
        argv.extend_from_slice(args);
        let output = self.runner.run(&self.flatpak, &argv).await?;
        let step = args.first().map_or_else(
            || "bottles-cli".to_string(),
            |sub| format!("bottles-cli {sub}"),
        );
        check_status(step, output)
    }
}

impl<R: CommandRunner> ContainerManager for BottlesCli<R> {
    async fn first_run_setup(&self) -> Result<()> {
        // A running instance would swallow the launch below.
        if let Err(e) = self.runner.run("killall", &[BOTTLES_PROCESS]).await {
            tracing::debug!(error = %e, "killall unavailable");
        }
        let output = self.runner.run(&self.flatpak, &["run", self.app_id.as_str()]).await?;
        check_status("Bottles first-run setup".to_string(), output)?;
        Ok(())
    }

    async fn create_container(&self, name: &str, environment: &str) -> Result<()> {
        self.bottles_cli(&["new", "--bottle-name", name, "--environment", environment])
            .await?;
        Ok(())
    }

    async fn set_registry_value(&self, container: &str, write: &RegistryWrite<'_>) -> Result<()> {
        tracing::debug!(key = write.key, value = write.value, data = write.data, "updating registry");
        self.bottles_cli(&[
            "reg",
            "--bottle",
            container,
            "add",
            "--key",
            write.key,
            "--value",
            write.value,
            "--data",
            write.data,
            "--key-type",
            write.data_type.as_str(),
        ])
        .await?;
        Ok(())
    }

    async fn register_program(
        &self,
        container: &str,
        program: &ProgramRegistration<'_>,
    ) -> Result<Registration> {
        let listing = self.bottles_cli(&["programs", "--bottle", container]).await?;
        if String::from_utf8_lossy(&listing.stdout).contains(program.name) {
            return Ok(Registration::AlreadyPresent);
        }

        let path = program.path.to_string_lossy();
        self.bottles_cli(&[
            "add",
            "--bottle",
            container,
            "--name",
            program.name,
            "--path",
            &path,
            "--launch-options",
            program.launch_options,
        ])
        .await?;
        Ok(Registration::Added)
    }
}

/// Turn a non-zero exit into `InstallError::ToolFailed` with the captured output.
fn check_status(step: String, output: Output) -> Result<Output> {
    if output.status.success() {
        return Ok(output);
    }
    Err(InstallError::ToolFailed {
        step,
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
    .into())
}
