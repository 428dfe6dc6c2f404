// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::time::Duration;

use cmd::commands::{cat, digest, lines, link, rm, stat, watch, write};
use hostfile::FileOptions;
use tempfile::tempdir;

/// Create test files in a temporary directory
fn create_test_files(dir: &std::path::Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let file1_path = dir.join("file1.txt");
    let file2_path = dir.join("file2.txt");
    let file3_path = dir.join("file3.txt");

    std::fs::write(&file1_path, "Content of file1")?;
    std::fs::write(&file2_path, "Content of file1")?;
    std::fs::write(&file3_path, "line one\nline two\nline three\n")?;

    Ok(vec![file1_path, file2_path, file3_path])
}

#[test]
fn test_cat_follows_link_in_small_chunks() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let files = create_test_files(tmp.path())?;
    let options = FileOptions::default();

    let link_path = tmp.path().join("first.ln");
    link::link_command(&options, &link_path, &files[0])?;

    let mut out = Vec::new();
    let copied = cat::cat_command(&options, &link_path, 3, &mut out)?;
    assert_eq!(copied, 16);
    assert_eq!(out, b"Content of file1");
    Ok(())
}

#[test]
fn test_cat_exact_multiple_of_chunk_size() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let files = create_test_files(tmp.path())?;

    let mut out = Vec::new();
    let copied = cat::cat_command(&FileOptions::default(), &files[0], 8, &mut out)?;
    assert_eq!(copied, 16);
    assert_eq!(out, b"Content of file1");
    Ok(())
}

#[test]
fn test_cat_missing_file_errors() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let mut out = Vec::new();
    let result = cat::cat_command(
        &FileOptions::default(),
        &tmp.path().join("missing.txt"),
        16,
        &mut out,
    );
    assert!(result.is_err());
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn test_lines_numbers_each_line() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let files = create_test_files(tmp.path())?;

    let mut results = Vec::new();
    let count = lines::lines_command(&FileOptions::default(), &files[2], |line| {
        results.push(line)
    })?;
    assert_eq!(count, 3);
    assert_eq!(results[0], "     1  line one");
    assert_eq!(results[2], "     3  line three");
    Ok(())
}

#[test]
fn test_digest_identical_files_match() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let files = create_test_files(tmp.path())?;

    let mut results = Vec::new();
    digest::digest_command(&FileOptions::default(), &files[..2], |line| {
        results.push(line)
    })?;
    assert_eq!(results.len(), 2);

    let hex: Vec<&str> = results
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(hex[0], hex[1]);
    assert_eq!(hex[0].len(), 40);
    assert!(results[1].ends_with("file2.txt"));
    Ok(())
}

#[test]
fn test_digest_with_yaml_config() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let files = create_test_files(tmp.path())?;
    let config = tmp.path().join("hostfile.yaml");
    std::fs::write(&config, "digest: sha256\n")?;

    let options = cmd::common::load_options(Some(config.as_path()))?;
    let mut results = Vec::new();
    digest::digest_command(&options, &files[..1], |line| results.push(line))?;
    let hex = results[0].split_whitespace().next().unwrap_or_default();
    assert_eq!(hex.len(), 64);
    Ok(())
}

#[test]
fn test_write_then_stat() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let target = tmp.path().join("nested/dir/out.txt");
    let options = FileOptions::default();

    write::write_command(&options, &target, 0, b"hello")?;
    write::write_command(&options, &target, 5, b" world")?;
    assert_eq!(std::fs::read(&target)?, b"hello world");

    let mut results = Vec::new();
    stat::stat_command(&options, &[target.clone()], |line| results.push(line))?;
    assert_eq!(results.len(), 1);
    assert!(results[0].starts_with("file"));
    assert!(results[0].contains("11B"));
    assert!(results[0].ends_with("out.txt"));
    // Just written, so younger than the default stable age
    assert!(results[0].contains(" active "));

    let settled_now = FileOptions {
        stable_age_ms: 0,
        ..FileOptions::default()
    };
    let mut results = Vec::new();
    stat::stat_command(&settled_now, &[target], |line| results.push(line))?;
    assert!(results[0].contains(" settled "));
    Ok(())
}

#[test]
fn test_stat_reports_link_and_missing() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let files = create_test_files(tmp.path())?;
    let options = FileOptions::default();
    let link_path = tmp.path().join("third.ln");
    link::link_command(&options, &link_path, &files[2])?;

    let mut results = Vec::new();
    stat::stat_command(
        &options,
        &[link_path, tmp.path().join("absent")],
        |line| results.push(line),
    )?;
    assert!(results[0].contains("-> "));
    assert!(results[0].ends_with("file3.txt"));
    assert!(results[1].starts_with("missing"));
    Ok(())
}

#[test]
fn test_link_requires_extension() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let files = create_test_files(tmp.path())?;
    let result = link::link_command(
        &FileOptions::default(),
        &tmp.path().join("not-a-link.txt"),
        &files[0],
    );
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_rm_removes_link_only() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let files = create_test_files(tmp.path())?;
    let options = FileOptions::default();
    let link_path = tmp.path().join("first.ln");
    link::link_command(&options, &link_path, &files[0])?;

    rm::rm_command(
        &options,
        &[link_path.clone(), tmp.path().join("never-existed")],
    )?;
    assert!(!link_path.exists());
    assert!(files[0].exists());
    Ok(())
}

#[test]
fn test_watch_reports_stable_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let files = create_test_files(tmp.path())?;

    let mut results = Vec::new();
    let stable = watch::watch_command(
        &FileOptions::default(),
        &files[0],
        Duration::from_millis(10),
        5,
        |line| results.push(line),
    )?;
    assert!(stable);
    assert!(results[0].contains("stable at 16 bytes after 2 polls"));
    Ok(())
}

#[test]
fn test_watch_gives_up_on_missing_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;

    let mut results = Vec::new();
    let stable = watch::watch_command(
        &FileOptions::default(),
        &tmp.path().join("missing"),
        Duration::from_millis(1),
        3,
        |line| results.push(line),
    )?;
    assert!(!stable);
    assert!(results[0].ends_with("not stable after 3 polls"));
    Ok(())
}
