//! A single source unit being compiled

use super::prelude::*;
use crate::Emit;
use jackal_files::output_path;
use jackal_syntax::lexer::LexerOptions;
use jackal_syntax::markup::{Markup, RenderOptions};
use jackal_syntax::{lex_source, parse_tokens};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Extension of every produced document
pub const OUTPUT_EXTENSION: &str = "xml";
/// Stem suffix of the token listing document
pub const TOKENS_SUFFIX: &str = "T";

/// Settings shared by every job of a compilation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JobSettings {
    pub emit: Emit,
    pub render: RenderOptions,
    pub lexer: LexerOptions,
}

/// The documents written for a single source unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledUnit {
    pub source: PathBuf,
    pub outputs: Vec<PathBuf>,
}

/// Compiles one source file into its output documents.
///
/// Nothing is written unless the whole unit lexes and parses.
#[derive(Debug, Clone)]
pub struct CompileJob {
    source: PathBuf,
    output_directory: PathBuf,
    settings: JobSettings,
}

impl CompileJob {
    pub fn new(source: PathBuf, output_directory: PathBuf, settings: JobSettings) -> Self {
        Self {
            source,
            output_directory,
            settings,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// The documents this job writes, in the order it writes them
    pub fn outputs(&self) -> Vec<PathBuf> {
        self.documents()
            .into_iter()
            .map(|suffix| self.output_path(suffix))
            .collect()
    }

    fn documents(&self) -> Vec<&'static str> {
        let mut suffixes = vec![];
        if self.settings.emit.tokens() {
            suffixes.push(TOKENS_SUFFIX);
        }
        if self.settings.emit.tree() {
            suffixes.push("");
        }
        suffixes
    }

    fn output_path(&self, suffix: &str) -> PathBuf {
        output_path(&self.source, &self.output_directory, suffix, OUTPUT_EXTENSION)
    }

    /// Runs this job to completion
    pub fn run(self) -> JackalCResult<CompiledUnit> {
        let source = self.source.as_path();
        debug!("compiling {source:?}");
        let text = fs::read_to_string(source).map_err(|e| JackalCError::at(e, source))?;
        let tokens =
            lex_source(&text, self.settings.lexer).map_err(|e| JackalCError::at(e, source))?;
        trace!("lexed {} tokens", tokens.len());

        let mut documents = vec![];
        if self.settings.emit.tokens() {
            documents.push((TOKENS_SUFFIX, Markup::token_listing(&tokens)));
        }
        if self.settings.emit.tree() {
            let class = parse_tokens(tokens).map_err(|e| JackalCError::at(e, source))?;
            documents.push(("", Markup::from(&class)));
        }

        fs::create_dir_all(&self.output_directory).map_err(|e| JackalCError::at(e, source))?;
        let mut outputs = Vec::with_capacity(documents.len());
        for (suffix, markup) in documents {
            debug_assert!(markup.is_well_nested());
            let path = self.output_path(suffix);
            fs::write(&path, markup.render(&self.settings.render))
                .map_err(|e| JackalCError::at(e, source))?;
            info!("wrote {path:?}");
            outputs.push(path);
        }

        Ok(CompiledUnit {
            source: self.source,
            outputs,
        })
    }
}
