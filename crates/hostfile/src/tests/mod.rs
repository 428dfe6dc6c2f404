// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

mod stability_tests;

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temp directory holding `hello.txt`, `lines.txt` and an empty `sub/`
fn create_test_tree() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    std::fs::write(dir.path().join("hello.txt"), b"Hello, World!").expect("write hello");
    std::fs::write(dir.path().join("lines.txt"), b"a\nb\n").expect("write lines");
    std::fs::create_dir(dir.path().join("sub")).expect("create sub");
    dir
}

fn append(path: &Path, data: &[u8]) {
    use std::io::Write;
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(path)
        .expect("open for append");
    file.write_all(data).expect("append");
}

fn join(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}
