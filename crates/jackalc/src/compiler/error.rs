//! A jackalc compilation error

use itertools::Itertools as _;
use jackal_syntax::parser::SyntaxError;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task::JoinError;

/// The kind of error
#[derive(Debug, Error)]
pub enum JackalCErrorKind {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("{}", .0.iter().join("\n"))]
    Multi(Vec<JackalCError>),
    #[error("no jack sources found")]
    NoSources,
    #[error("{output:?} is already written by {other:?}")]
    OutputConflict { output: PathBuf, other: PathBuf },
    #[error("compile task failed: {0}")]
    Join(#[from] JoinError),
}

/// An error occurred while attempting to compile jack files
#[derive(Debug, Error)]
pub struct JackalCError {
    source_file: Option<PathBuf>,
    kind: JackalCErrorKind,
}

impl JackalCError {
    /// Creates a new [JackalCError] using a quick constructor
    #[inline]
    pub fn new(error: impl Into<JackalCErrorKind>, source_file: impl Into<Option<PathBuf>>) -> Self {
        Self {
            source_file: source_file.into(),
            kind: error.into(),
        }
    }

    /// Creates an error that happened while compiling `path`
    pub fn at(error: impl Into<JackalCErrorKind>, path: &Path) -> Self {
        Self::new(error, path.to_path_buf())
    }

    pub fn kind(&self) -> &JackalCErrorKind {
        &self.kind
    }

    /// The source file being compiled when this error occurred
    pub fn source_file(&self) -> Option<&Path> {
        self.source_file.as_deref()
    }

    /// Every error this error is made of, flattening [JackalCErrorKind::Multi]
    pub fn errors(&self) -> Vec<&JackalCError> {
        match &self.kind {
            JackalCErrorKind::Multi(errors) => errors.iter().flat_map(|e| e.errors()).collect(),
            _ => vec![self],
        }
    }
}

impl Display for JackalCError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.source_file {
            Some(path) => write!(f, "{}: {}", path.display(), self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl From<JackalCErrorKind> for JackalCError {
    fn from(value: JackalCErrorKind) -> Self {
        Self::new(value, None)
    }
}

impl From<Vec<JackalCError>> for JackalCError {
    fn from(value: Vec<JackalCError>) -> Self {
        JackalCErrorKind::Multi(value).into()
    }
}

impl From<JoinError> for JackalCError {
    fn from(value: JoinError) -> Self {
        JackalCErrorKind::from(value).into()
    }
}

/// A type alias for general results in jackalc
pub type JackalCResult<T> = Result<T, JackalCError>;

#[cfg(test)]
mod tests {
    use super::*;
    use jackal_syntax::parser::ErrorKind;

    #[test]
    fn test_display_includes_source_file() {
        let error = JackalCError::at(
            io::Error::new(io::ErrorKind::NotFound, "gone"),
            Path::new("Main.jack"),
        );
        assert_eq!(error.to_string(), "Main.jack: gone");
    }

    #[test]
    fn test_multi_flattens() {
        let syntax = SyntaxError::from(ErrorKind::unexpected_eof(Some("}")));
        let inner = JackalCError::from(vec![
            JackalCError::at(syntax, Path::new("A.jack")),
            JackalCError::new(JackalCErrorKind::NoSources, PathBuf::from("empty")),
        ]);
        let outer = JackalCError::from(vec![inner]);
        assert_eq!(outer.errors().len(), 2);
        assert_eq!(outer.errors()[0].source_file(), Some(Path::new("A.jack")));
        let rendered = outer.to_string();
        assert!(rendered.contains("A.jack: syntax error: unexpected end of input"));
        assert!(rendered.contains("empty: no jack sources found"));
    }
}
