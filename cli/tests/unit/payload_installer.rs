//! Tests for `ZipPayloadInstaller` against a scratch directory.

use std::io::Write;

use sims_bottler::application::ports::{BackupState, PayloadInstaller};
use sims_bottler::infra::payload::ZipPayloadInstaller;

use crate::helpers::{ORIGINAL_EXE, PATCHED_EXE, write_game_zip};

#[test]
fn place_copies_archive_and_extracts_into_drive_c() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let archive = tmp.path().join("sims_game_data.zip");
    write_game_zip(&archive);
    let drive_c = tmp.path().join("bottle").join("drive_c");

    ZipPayloadInstaller
        .place(&archive, &drive_c)
        .expect("place payload");

    assert!(drive_c.join("sims_game_data.zip").is_file());
    assert!(archive.is_file(), "source archive is left in place");
    assert_eq!(
        std::fs::read(drive_c.join("The Sims").join("Sims.exe")).expect("exe"),
        ORIGINAL_EXE
    );
    assert!(drive_c.join("The Sims").join("00000000.256").is_file());
}

#[test]
fn place_accepts_archive_already_inside_drive_c() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let drive_c = tmp.path().join("drive_c");
    std::fs::create_dir_all(&drive_c).expect("mkdir");
    let archive = drive_c.join("sims.zip");
    write_game_zip(&archive);

    ZipPayloadInstaller
        .place(&archive, &drive_c)
        .expect("place payload");

    assert!(archive.is_file());
    assert!(drive_c.join("The Sims").join("Sims.exe").is_file());
}

#[test]
fn place_rejects_non_zip_archive() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let archive = tmp.path().join("notes.zip");
    std::fs::write(&archive, b"definitely not a zip").expect("write");
    let drive_c = tmp.path().join("drive_c");

    let err = ZipPayloadInstaller
        .place(&archive, &drive_c)
        .expect_err("garbage archive");
    assert!(format!("{err:#}").contains("read zip archive"), "{err:#}");
    assert!(!drive_c.join("The Sims").exists());
}

#[test]
fn place_rejects_entries_escaping_drive_c() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let archive = tmp.path().join("evil.zip");
    let file = std::fs::File::create(&archive).expect("create");
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("../outside.txt", zip::write::SimpleFileOptions::default())
        .expect("start");
    zip.write_all(b"nope").expect("write");
    zip.finish().expect("finish");
    let drive_c = tmp.path().join("bottle").join("drive_c");

    let err = ZipPayloadInstaller
        .place(&archive, &drive_c)
        .expect_err("traversal entry");
    assert!(format!("{err:#}").contains("invalid path"), "{err:#}");
    assert!(!tmp.path().join("bottle").join("outside.txt").exists());
}

fn game_files(root: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf, std::path::PathBuf) {
    let exe = root.join("Sims.exe");
    let backup = root.join("Sims.exe.bak");
    let patch = root.join("nocd-patch.bin");
    std::fs::write(&exe, ORIGINAL_EXE).expect("write exe");
    std::fs::write(&patch, PATCHED_EXE).expect("write patch");
    (exe, backup, patch)
}

#[test]
fn patch_moves_original_aside_and_installs_replacement() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (exe, backup, patch) = game_files(tmp.path());

    let state = ZipPayloadInstaller
        .patch_executable(&exe, &backup, &patch)
        .expect("patch");

    assert_eq!(state, BackupState::Created);
    assert_eq!(std::fs::read(&backup).expect("backup"), ORIGINAL_EXE);
    assert_eq!(std::fs::read(&exe).expect("exe"), PATCHED_EXE);
    assert_eq!(std::fs::read(&patch).expect("patch"), PATCHED_EXE);
}

#[test]
fn patch_never_overwrites_existing_backup() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (exe, backup, patch) = game_files(tmp.path());
    std::fs::write(&backup, b"first original").expect("write backup");

    let state = ZipPayloadInstaller
        .patch_executable(&exe, &backup, &patch)
        .expect("patch");

    assert_eq!(state, BackupState::Kept);
    assert_eq!(std::fs::read(&backup).expect("backup"), b"first original");
    assert_eq!(std::fs::read(&exe).expect("exe"), PATCHED_EXE);
}

#[test]
fn patch_without_replacement_leaves_executable_alone() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (exe, backup, patch) = game_files(tmp.path());
    std::fs::remove_file(&patch).expect("remove patch");

    let err = ZipPayloadInstaller
        .patch_executable(&exe, &backup, &patch)
        .expect_err("missing replacement");

    assert!(err.to_string().contains("not found"), "{err}");
    assert_eq!(std::fs::read(&exe).expect("exe"), ORIGINAL_EXE);
    assert!(!backup.exists());
}
