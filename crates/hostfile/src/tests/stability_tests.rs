// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Stability polling

use super::{append, create_test_tree, join};
use crate::FileHandle;
use std::time::UNIX_EPOCH;

#[test]
fn test_first_observation_is_not_stable() {
    let dir = create_test_tree();
    let mut handle = FileHandle::new(Some(dir.path()), "hello.txt").expect("handle");
    assert!(!handle.is_stable());
    assert!(handle.is_stable());
    assert!(handle.is_stable());
}

#[test]
fn test_growth_resets_stability() {
    let dir = create_test_tree();
    let path = join(&dir, "hello.txt");
    let mut handle = FileHandle::new(None, &path).expect("handle");
    assert!(!handle.is_stable());
    assert!(handle.is_stable());

    append(&path, b"more");
    assert!(!handle.is_stable());
    assert!(handle.is_stable());
}

#[test]
fn test_is_stable_refreshes_snapshot() {
    let dir = create_test_tree();
    let path = join(&dir, "hello.txt");
    let mut handle = FileHandle::new(None, &path).expect("handle");

    append(&path, b"12");
    assert_eq!(handle.cursize(), 13);
    handle.is_stable();
    assert_eq!(handle.cursize(), 15);
    assert!(!handle.has_changed());
}

#[test]
fn test_missing_file_never_stable() {
    let dir = create_test_tree();
    let mut handle = FileHandle::new(Some(dir.path()), "nope.txt").expect("handle");
    assert!(!handle.is_stable());
    assert!(!handle.is_stable());
}

#[test]
fn test_duplicate_starts_without_observation() {
    let dir = create_test_tree();
    let mut handle = FileHandle::new(Some(dir.path()), "hello.txt").expect("handle");
    assert!(!handle.is_stable());
    assert!(handle.is_stable());

    let mut copy = handle.duplicate();
    assert!(!copy.is_stable());
    assert!(copy.is_stable());
}

#[test]
fn test_touch_without_growth_resets_stability() {
    let dir = create_test_tree();
    let path = join(&dir, "hello.txt");
    let mut handle = FileHandle::new(None, &path).expect("handle");
    assert!(!handle.is_stable());
    assert!(handle.is_stable());

    std::fs::File::options()
        .write(true)
        .open(&path)
        .expect("open")
        .set_modified(UNIX_EPOCH)
        .expect("set mtime");
    assert!(!handle.is_stable());
    assert_eq!(handle.cursize(), 13);
    assert!(handle.is_stable());
}
