#![doc = include_str!("../README.md")]

mod file_tree;
mod output;

pub use self::{
    file_tree::{FileTree, SourceTree},
    output::{default_output_dir, output_path, OUTPUT_DIR_NAME},
};
use std::path::{Path, PathBuf};

/// The extension of Jack source files
pub const SOURCE_EXTENSION: &str = "jack";

/// Creates a file tree from a starting file or directory
pub fn source_tree(src: &Path, recursive: bool) -> SourceTree<'_> {
    SourceTree::new(src, recursive)
}

/// Finds the Jack sources of an input, sorted by path.
///
/// A file input is taken as is, whatever its extension. A directory input yields every file
/// in it with the `.jack` extension.
pub fn jack_sources(src: &Path, recursive: bool) -> Vec<PathBuf> {
    if src.is_file() {
        return vec![src.to_path_buf()];
    }
    let mut sources = source_tree(src, recursive)
        .files()
        .into_iter()
        .filter(|path| is_jack_source(path))
        .collect::<Vec<_>>();
    sources.sort();
    sources
}

/// Checks if a path has the Jack source extension
pub fn is_jack_source(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension == SOURCE_EXTENSION)
}
