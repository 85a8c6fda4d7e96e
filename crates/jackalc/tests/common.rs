#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A fresh directory under the cargo target tmp dir
pub fn target_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("target-")
        .tempdir_in(env!("CARGO_TARGET_TMPDIR"))
        .expect("could not create directory")
}

/// The fixture directory with the given name
pub fn fixtures(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("jack_files")
        .join(name)
}

/// Copies a fixture directory into `dir`, returning the copy's path
pub fn copy_fixtures(name: &str, dir: &Path) -> PathBuf {
    let copy = dir.join(name);
    fs::create_dir_all(&copy).expect("could not create directory");
    for entry in fs::read_dir(fixtures(name)).expect("could not read fixtures") {
        let path = entry.expect("could not read entry").path();
        let file_name = path.file_name().expect("fixture has a name");
        fs::copy(&path, copy.join(file_name)).expect("could not copy fixture");
    }
    copy
}

/// Reads a produced document as lines, whatever its line ending
pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("could not read document")
        .split("\r\n")
        .map(str::to_string)
        .collect()
}
