//! Where compiled outputs are written

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Name of the directory created next to the sources for their outputs
pub const OUTPUT_DIR_NAME: &str = "out";

/// The output directory used when none is configured.
///
/// For a directory input this is `out` inside it, for a file input `out` inside the file's
/// parent directory.
pub fn default_output_dir(input: &Path) -> PathBuf {
    if input.is_dir() {
        input.join(OUTPUT_DIR_NAME)
    } else {
        match input.parent() {
            Some(parent) => parent.join(OUTPUT_DIR_NAME),
            None => PathBuf::from(OUTPUT_DIR_NAME),
        }
    }
}

/// The output path for a source file: its stem plus `suffix`, with `extension`, placed in
/// `output_dir`.
///
/// # Example
/// ```
/// # use std::path::Path;
/// # use jackal_files::output_path;
/// let path = output_path(Path::new("src/Main.jack"), Path::new("out"), "T", "xml");
/// assert_eq!(path, Path::new("out/MainT.xml"));
/// ```
pub fn output_path(source: &Path, output_dir: &Path, suffix: &str, extension: &str) -> PathBuf {
    let mut name = source
        .file_stem()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(suffix);
    name.push(".");
    name.push(extension);
    output_dir.join(name)
}
