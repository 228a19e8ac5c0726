//! Tests for the `install` application service.
//!
//! Runs `install_game()` against the real filesystem adapters in a scratch
//! directory and a recording `CommandRunner` in place of `bottles-cli`.

use std::path::Path;

use sims_bottler::application::ports::{BackupState, LauncherState, Registration};
use sims_bottler::application::services::install::{
    InstallOutcome, InstallPorts, install_game,
};
use sims_bottler::commands::install::report;
use sims_bottler::domain::registry::{SIMS_REGISTRY_KEYS, SIMS_REGISTRY_ROOT};
use sims_bottler::domain::{InstallConfig, InstallError};
use sims_bottler::infra::bottles::BottlesCli;
use sims_bottler::infra::desktop::XdgLauncherWriter;
use sims_bottler::infra::payload::ZipPayloadInstaller;
use sims_bottler::infra::probe::FsProbe;
use sims_bottler::output::OutputContext;

use crate::helpers::{
    APP_ID, FLATPAK, MockCommandRunner, ORIGINAL_EXE, PATCHED_EXE, RecordingReporter,
    prepare_host, test_config, write_game_zip,
};

async fn run_install(
    config: &InstallConfig,
    runner: &MockCommandRunner,
    archive: Option<&Path>,
) -> anyhow::Result<InstallOutcome> {
    let containers = BottlesCli::new(runner.clone(), FLATPAK, APP_ID);
    let ports = InstallPorts {
        containers: &containers,
        probe: &FsProbe,
        payload: &ZipPayloadInstaller,
        launcher: &XdgLauncherWriter,
    };
    install_game(config, &ports, &RecordingReporter::default(), archive).await
}

fn exit_code(result: &anyhow::Result<InstallOutcome>) -> u8 {
    report(&OutputContext::new(true, true), result)
}

#[tokio::test]
async fn fresh_install_runs_every_step() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    prepare_host(&config);
    let archive = tmp.path().join("sims.zip");
    write_game_zip(&archive);
    let runner = MockCommandRunner::new();

    let result = run_install(&config, &runner, Some(&archive)).await;
    assert_eq!(exit_code(&result), 0);

    let target = config.target();
    assert_eq!(
        result.expect("install"),
        InstallOutcome::Installed {
            install_dir: target.install_dir().to_path_buf(),
            launcher: target.desktop_file.clone(),
            backup: BackupState::Created,
            program: Registration::Added,
            launcher_state: LauncherState::Written,
        }
    );

    assert_eq!(runner.count("new"), 1);
    assert_eq!(runner.count("reg"), 24);
    assert_eq!(runner.count("add"), 1);

    assert_eq!(std::fs::read(&target.backup).expect("backup"), ORIGINAL_EXE);
    assert_eq!(std::fs::read(&target.executable).expect("exe"), PATCHED_EXE);
    assert!(target.icon.is_file());
    assert!(target.drive_c.join("sims.zip").is_file(), "archive copied into drive_c");

    let launcher = std::fs::read_to_string(&target.desktop_file).expect("launcher");
    assert!(launcher.contains("-b 'the-sims-complete'"));
    assert!(launcher.contains(&format!("Icon={}", target.icon.display())));
    let launchers = std::fs::read_dir(&config.host.applications_dir)
        .expect("applications dir")
        .count();
    assert_eq!(launchers, 1);
}

#[tokio::test]
async fn registry_records_are_submitted_once_in_order() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    prepare_host(&config);
    let archive = tmp.path().join("sims.zip");
    write_game_zip(&archive);
    let runner = MockCommandRunner::new();

    run_install(&config, &runner, Some(&archive))
        .await
        .expect("install");

    let submitted: Vec<Vec<String>> = runner
        .bottles_calls()
        .into_iter()
        .filter(|args| args[0] == "reg")
        .collect();
    assert_eq!(submitted.len(), SIMS_REGISTRY_KEYS.len());
    for (args, key) in submitted.iter().zip(SIMS_REGISTRY_KEYS) {
        assert_eq!(args[2], "the-sims-complete");
        assert_eq!(args[5], SIMS_REGISTRY_ROOT);
        assert_eq!(args[7], key.value);
        assert_eq!(args[9], key.data);
        assert_eq!(args[11], key.data_type.as_str());
    }
}

#[tokio::test]
async fn steps_run_in_workflow_order() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    prepare_host(&config);
    let archive = tmp.path().join("sims.zip");
    write_game_zip(&archive);
    let runner = MockCommandRunner::new();

    run_install(&config, &runner, Some(&archive))
        .await
        .expect("install");

    let subcommands: Vec<String> = runner
        .bottles_calls()
        .into_iter()
        .map(|args| args[0].clone())
        .collect();
    let mut expected = vec!["new".to_string()];
    expected.extend(std::iter::repeat_n("reg".to_string(), 24));
    expected.extend(["programs".to_string(), "add".to_string()]);
    assert_eq!(subcommands, expected);
}

#[tokio::test]
async fn existing_executable_short_circuits() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    let target = config.target();
    std::fs::create_dir_all(target.install_dir()).expect("mkdir");
    std::fs::write(&target.executable, ORIGINAL_EXE).expect("write exe");
    let runner = MockCommandRunner::new();

    let result = run_install(&config, &runner, None).await;
    assert_eq!(exit_code(&result), 255);
    assert_eq!(
        result.expect("already installed is not an error"),
        InstallOutcome::AlreadyInstalled {
            install_dir: target.install_dir().to_path_buf(),
        }
    );
    assert!(runner.calls().is_empty());
    assert!(!target.desktop_file.exists());
}

#[tokio::test]
async fn missing_archive_is_rejected_without_side_effects() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    let runner = MockCommandRunner::new();

    let result = run_install(&config, &runner, None).await;
    assert_eq!(exit_code(&result), 1);
    let err = result.expect_err("missing archive");
    assert!(matches!(
        err.downcast_ref::<InstallError>(),
        Some(InstallError::MissingArchive)
    ));
    assert!(runner.calls().is_empty());
    assert!(!config.host.bottles_data_dir.exists());
    assert!(!config.host.applications_dir.exists());
}

#[tokio::test]
async fn nonexistent_archive_is_rejected_without_side_effects() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    let runner = MockCommandRunner::new();
    let archive = tmp.path().join("missing.zip");

    let result = run_install(&config, &runner, Some(&archive)).await;
    assert_eq!(exit_code(&result), 1);
    assert!(matches!(
        result.expect_err("invalid archive").downcast_ref::<InstallError>(),
        Some(InstallError::InvalidArchive { path }) if path == &archive
    ));
    assert!(runner.calls().is_empty());
    assert!(!config.host.bottles_data_dir.exists());
}

#[tokio::test]
async fn directory_archive_is_rejected() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    let runner = MockCommandRunner::new();

    let result = run_install(&config, &runner, Some(tmp.path())).await;
    assert_eq!(exit_code(&result), 1);
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn first_run_setup_runs_when_runners_missing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    std::fs::write(&config.host.patch_file, PATCHED_EXE).expect("write patch");
    let archive = tmp.path().join("sims.zip");
    write_game_zip(&archive);
    let runner = MockCommandRunner::new();

    run_install(&config, &runner, Some(&archive))
        .await
        .expect("install");

    let calls = runner.calls();
    assert_eq!(calls[0].0, "killall");
    assert_eq!(calls[1].0, FLATPAK);
    assert_eq!(calls[1].1, vec!["run".to_string(), APP_ID.to_string()]);
    assert_eq!(runner.bottles_calls()[0][0], "new");
}

#[tokio::test]
async fn failed_first_run_setup_aborts_before_bottle_creation() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    std::fs::write(&config.host.patch_file, PATCHED_EXE).expect("write patch");
    let archive = tmp.path().join("sims.zip");
    write_game_zip(&archive);
    let runner = MockCommandRunner::failing_command(FLATPAK, &["run", APP_ID], 5);

    let result = run_install(&config, &runner, Some(&archive)).await;
    assert_eq!(exit_code(&result), 5);
    let message = format!("{:#}", result.expect_err("setup fails"));
    assert!(message.contains("setting up Bottles"), "{message}");
    assert!(runner.bottles_calls().is_empty());
    assert!(!config.target().drive_c.exists());
}

#[tokio::test]
async fn failed_killall_still_runs_first_run_setup() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    std::fs::write(&config.host.patch_file, PATCHED_EXE).expect("write patch");
    let archive = tmp.path().join("sims.zip");
    write_game_zip(&archive);
    let runner = MockCommandRunner::failing_command("killall", &["bottles"], 1);

    let result = run_install(&config, &runner, Some(&archive)).await;
    assert_eq!(exit_code(&result), 0);
    let calls = runner.calls();
    assert_eq!(calls[1], (FLATPAK.to_string(), vec!["run".to_string(), APP_ID.to_string()]));
    assert_eq!(runner.count("new"), 1);
}

#[tokio::test]
async fn first_run_setup_skipped_when_runners_exist() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    prepare_host(&config);
    let archive = tmp.path().join("sims.zip");
    write_game_zip(&archive);
    let runner = MockCommandRunner::new();

    run_install(&config, &runner, Some(&archive))
        .await
        .expect("install");

    assert!(runner.calls().iter().all(|(program, _)| program == FLATPAK));
    assert_eq!(runner.calls().len(), runner.bottles_calls().len());
}

#[tokio::test]
async fn tool_failure_aborts_run() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    prepare_host(&config);
    let archive = tmp.path().join("sims.zip");
    write_game_zip(&archive);
    let runner = MockCommandRunner::failing_on("new", 4);

    let result = run_install(&config, &runner, Some(&archive)).await;
    assert_eq!(exit_code(&result), 4);
    let message = format!("{:#}", result.expect_err("new fails"));
    assert!(message.contains("creating bottle"), "{message}");
    assert_eq!(runner.count("reg"), 0);
    assert!(!config.target().executable.exists());
}

#[tokio::test]
async fn registry_failure_leaves_extracted_payload() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    prepare_host(&config);
    let archive = tmp.path().join("sims.zip");
    write_game_zip(&archive);
    let runner = MockCommandRunner::failing_on("reg", 9);

    let result = run_install(&config, &runner, Some(&archive)).await;
    assert_eq!(exit_code(&result), 9);
    assert_eq!(runner.count("reg"), 1);
    assert_eq!(runner.count("add"), 0);
    let target = config.target();
    assert_eq!(std::fs::read(&target.executable).expect("exe"), ORIGINAL_EXE);
    assert!(!target.backup.exists());
}

#[tokio::test]
async fn missing_patch_file_keeps_original_executable() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    std::fs::create_dir_all(config.target().runners_dir).expect("runners");
    let archive = tmp.path().join("sims.zip");
    write_game_zip(&archive);
    let runner = MockCommandRunner::new();

    let result = run_install(&config, &runner, Some(&archive)).await;
    assert_eq!(exit_code(&result), 2);
    let target = config.target();
    assert_eq!(std::fs::read(&target.executable).expect("exe"), ORIGINAL_EXE);
    assert!(!target.backup.exists());
    assert_eq!(runner.count("add"), 0);
}

#[tokio::test]
async fn rerun_after_partial_install_keeps_backup() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    prepare_host(&config);
    let archive = tmp.path().join("sims.zip");
    write_game_zip(&archive);
    let target = config.target();
    std::fs::create_dir_all(target.install_dir()).expect("mkdir");
    std::fs::write(&target.backup, b"earlier backup").expect("backup");
    let runner = MockCommandRunner::new();
    let reporter = RecordingReporter::default();

    let containers = BottlesCli::new(runner.clone(), FLATPAK, APP_ID);
    let ports = InstallPorts {
        containers: &containers,
        probe: &FsProbe,
        payload: &ZipPayloadInstaller,
        launcher: &XdgLauncherWriter,
    };
    let outcome = install_game(&config, &ports, &reporter, Some(&archive))
        .await
        .expect("install");

    assert!(matches!(
        outcome,
        InstallOutcome::Installed {
            backup: BackupState::Kept,
            ..
        }
    ));
    assert_eq!(std::fs::read(&target.backup).expect("backup"), b"earlier backup");
    assert_eq!(std::fs::read(&target.executable).expect("exe"), PATCHED_EXE);
    assert!(
        reporter
            .warnings()
            .iter()
            .any(|w| w.starts_with("kept existing backup"))
    );
}
