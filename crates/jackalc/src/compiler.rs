//! Responsible with compiling jack files into parse tree documents

use jackal_files::{default_output_dir, jack_sources};
use jackal_syntax::lexer::LexerOptions;
use jackal_syntax::markup::RenderOptions;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{fs, io};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, error_span, info};

mod compile_job;
pub mod error;

pub use compile_job::{CompileJob, CompiledUnit, JobSettings, OUTPUT_EXTENSION, TOKENS_SUFFIX};

/// Prelude that can be used in inner modules.
mod prelude {
    pub use super::error::{JackalCError, JackalCErrorKind, JackalCResult};
}

pub use prelude::*;

/// Which documents are produced for every source unit
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// The serialized parse tree, `Xxx.xml`
    #[default]
    Tree,
    /// The flat token listing, `XxxT.xml`
    Tokens,
    Both,
}

impl Emit {
    pub fn tree(&self) -> bool {
        matches!(self, Emit::Tree | Emit::Both)
    }

    pub fn tokens(&self) -> bool {
        matches!(self, Emit::Tokens | Emit::Both)
    }
}

/// Responsible with compiling jack files into parse tree documents.
///
/// Must be configured using a [JackalCBuilder].
#[derive(Debug)]
pub struct JackalC {
    max_jobs: usize,
    output_directory: Option<PathBuf>,
    recursive: bool,
    settings: JobSettings,
}

impl JackalC {
    /// Creates the default JackalCBuilder
    #[inline]
    pub fn builder() -> JackalCBuilder {
        JackalCBuilder::new()
    }

    /// Compile a file or directory at a given path
    #[inline]
    pub async fn compile(&mut self, path: &Path) -> JackalCResult<Vec<CompiledUnit>> {
        self.compile_all(vec![path.to_path_buf()]).await
    }

    /// Compile every jack source found in the given files and directories.
    ///
    /// Sources found below a directory input keep their relative location under the output
    /// directory. A source given more than once is compiled once, and a source whose documents
    /// would overwrite another's is rejected with [JackalCErrorKind::OutputConflict].
    ///
    /// Every unit is compiled even if another fails. All failures are reported together
    /// as a [JackalCErrorKind::Multi] error.
    pub async fn compile_all(&mut self, paths: Vec<PathBuf>) -> JackalCResult<Vec<CompiledUnit>> {
        let mut errors = vec![];
        let mut seen_sources = HashSet::new();
        let mut planned_outputs: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut jobs = vec![];
        for input in paths {
            let sources = jack_sources(&input, self.recursive);
            if sources.is_empty() {
                error!("no jack sources found in {input:?}");
                errors.push(JackalCError::new(JackalCErrorKind::NoSources, input.clone()));
                continue;
            }
            let output_root = self
                .output_directory
                .clone()
                .unwrap_or_else(|| default_output_dir(&input));
            debug!("{} sources in {input:?} -> {output_root:?}", sources.len());

            for source in sources {
                if !seen_sources.insert(fs::canonicalize(&source).unwrap_or(source.clone())) {
                    debug!("{source:?} was already given");
                    continue;
                }
                let output_directory = mirrored_output_directory(&input, &source, &output_root);
                let job = CompileJob::new(source, output_directory, self.settings);
                let outputs = job.outputs();
                if let Some((output, other)) = outputs
                    .iter()
                    .find_map(|output| Some((output, planned_outputs.get(output)?)))
                {
                    errors.push(JackalCError::at(
                        JackalCErrorKind::OutputConflict {
                            output: output.clone(),
                            other: other.clone(),
                        },
                        job.source(),
                    ));
                    continue;
                }
                for output in outputs {
                    planned_outputs.insert(output, job.source().to_path_buf());
                }
                jobs.push(job);
            }
        }

        let permits = Arc::new(Semaphore::new(self.max_jobs));
        let mut join_set = JoinSet::new();
        for job in jobs {
            let permit = permits.clone().acquire_owned().await.ok();
            let span = error_span!("compile", path=?job.source());
            join_set.spawn_blocking(move || {
                let _permit = permit;
                span.in_scope(|| job.run())
            });
        }

        let mut compiled = vec![];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(Ok(unit)) => compiled.push(unit),
                Ok(Err(e)) => {
                    debug!("{e}");
                    errors.push(e);
                }
                Err(e) => errors.push(e.into()),
            }
        }
        compiled.sort_by(|l, r| l.source.cmp(&r.source));
        info!("compiled {} units, {} failed", compiled.len(), errors.len());

        if errors.is_empty() {
            Ok(compiled)
        } else {
            Err(errors.into())
        }
    }
}

/// Where the documents of `source` go. A source found below a directory input keeps its
/// location relative to that input.
fn mirrored_output_directory(input: &Path, source: &Path, output_root: &Path) -> PathBuf {
    match source.parent().map(|parent| parent.strip_prefix(input)) {
        Some(Ok(relative)) if !relative.as_os_str().is_empty() => output_root.join(relative),
        _ => output_root.to_path_buf(),
    }
}

/// Builder for creating a [JackalC] instance.
#[derive(Debug)]
pub struct JackalCBuilder {
    /// Number of jobs to run at once
    pub jobs: usize,
    /// Where documents are written. When absent, an `out` directory next to each input is used.
    pub output_directory: Option<PathBuf>,
    pub recursive: bool,
    pub emit: Emit,
    pub render: RenderOptions,
    pub lexer: LexerOptions,
}

impl JackalCBuilder {
    /// Creates a JackalCBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output directory for produced documents
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Whether directories are searched recursively for sources
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn emit(mut self, emit: Emit) -> Self {
        self.emit = emit;
        self
    }

    pub fn render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    pub fn lexer(mut self, lexer: LexerOptions) -> Self {
        self.lexer = lexer;
        self
    }

    /// Builds a [JackalC] instance from this builder
    pub fn build(self) -> Result<JackalC, BuildJackalCError> {
        if self.jobs == 0 {
            return Err(BuildJackalCError::ZeroJobs);
        }

        if let Some(output_directory) = &self.output_directory {
            match std::fs::metadata(output_directory) {
                Ok(meta) if !meta.is_dir() => {
                    return Err(BuildJackalCError::OutputDirectoryIsNotADirectory(
                        output_directory.clone(),
                    ));
                }
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!("{output_directory:?} will be created");
                }
                Err(e) => {
                    return Err(BuildJackalCError::OutputDirectoryUnreadable(
                        output_directory.clone(),
                        e,
                    ));
                }
            }
        }

        Ok(JackalC {
            max_jobs: self.jobs,
            output_directory: self.output_directory,
            recursive: self.recursive,
            settings: JobSettings {
                emit: self.emit,
                render: self.render,
                lexer: self.lexer,
            },
        })
    }
}

impl Default for JackalCBuilder {
    fn default() -> Self {
        Self {
            jobs: num_cpus::get(),
            output_directory: None,
            recursive: false,
            emit: Emit::default(),
            render: RenderOptions::default(),
            lexer: LexerOptions::default(),
        }
    }
}

/// An error occurred while building a [JackalC] instance
#[derive(Debug, Error)]
pub enum BuildJackalCError {
    #[error("{0:?} can not be read: {1}")]
    OutputDirectoryUnreadable(PathBuf, io::Error),
    #[error("{0:?} is not a directory")]
    OutputDirectoryIsNotADirectory(PathBuf),
    #[error("Compilation can't occur if no jobs are allowed")]
    ZeroJobs,
}
