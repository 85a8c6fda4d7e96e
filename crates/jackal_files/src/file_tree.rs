use std::collections::HashSet;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Used for representing a hierarchy of files that can be flattened into the files it contains
pub trait FileTree {
    type Path: AsRef<Path> + Eq + Hash;

    /// Gets every file of this tree
    fn files(&self) -> HashSet<Self::Path>;
}

/// A file, or a directory and the files below it
#[derive(Debug)]
pub struct SourceTree<'a> {
    src: &'a Path,
    recursive: bool,
}

impl<'a> SourceTree<'a> {
    /// Creates a tree rooted at `src`. Unless `recursive`, only the direct children of a
    /// directory are part of the tree.
    pub fn new(src: &'a Path, recursive: bool) -> Self {
        Self { src, recursive }
    }
}

impl FileTree for SourceTree<'_> {
    type Path = PathBuf;

    fn files(&self) -> HashSet<Self::Path> {
        let mut stack = vec![(self.src.to_path_buf(), 0usize)];
        let mut visited = HashSet::new();
        let mut files = HashSet::new();

        while let Some((path, depth)) = stack.pop() {
            if !visited.insert(path.clone()) {
                continue;
            }
            if path.is_file() {
                files.insert(path);
            } else if path.is_dir() && (depth == 0 || self.recursive) {
                match std::fs::read_dir(&path) {
                    Ok(read_dir) => read_dir
                        .filter_map(|entry| entry.ok())
                        .for_each(|entry| stack.push((entry.path(), depth + 1))),
                    Err(e) => warn!("could not read directory {path:?}: {e}"),
                }
            }
        }

        files
    }
}
