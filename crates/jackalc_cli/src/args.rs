//! the args for running jackalc

use clap::ValueEnum;
use clap_complete::Shell;
use jackal_cli_common::LoggingArgs;
use jackal_syntax::lexer::LexerOptions;
use jackal_syntax::markup::{LineEnding, RenderOptions};
use jackalc::Emit;
use std::path::PathBuf;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(
    author,
    version,
    about = "Parses jack classes into their parse tree documents"
)]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// Jack source files, or directories containing them
    #[clap(required_unless_present = "completions", value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,
    /// Specify where to place produced documents.
    ///
    /// Defaults to an `out` directory next to each input.
    #[clap(short = 'd', long = "output-directory", value_hint = clap::ValueHint::DirPath)]
    pub output_directory: Option<PathBuf>,
    /// Which documents to produce for each source
    #[clap(short = 'e', long = "emit", value_enum, default_value_t = EmitArg::Tree)]
    pub emit: EmitArg,
    /// Line terminator of produced documents
    #[clap(long = "line-ending", value_enum, default_value_t = LineEndingArg::Crlf)]
    pub line_ending: LineEndingArg,
    /// Spaces of indentation per nesting level
    #[clap(long = "indent", default_value_t = 0)]
    pub indent: usize,
    /// Fail on a string constant still open at the end of the source instead of dropping it.
    ///
    /// String constants may span lines, so only the end of input can leave one open.
    #[clap(long = "strict-strings")]
    pub strict_strings: bool,
    /// Search directories recursively for sources
    #[clap(short = 'r', long = "recursive")]
    pub recursive: bool,
    /// Number of sources to compile at once. Defaults to the number of cpus
    #[clap(short = 'j', long = "jobs")]
    pub jobs: Option<usize>,
    /// Print a completion script for the given shell and exit
    #[clap(long = "completions", value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

/// Documents produced per source
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmitArg {
    Tree,
    Tokens,
    Both,
}

impl From<EmitArg> for Emit {
    fn from(value: EmitArg) -> Self {
        match value {
            EmitArg::Tree => Emit::Tree,
            EmitArg::Tokens => Emit::Tokens,
            EmitArg::Both => Emit::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LineEndingArg {
    Crlf,
    Lf,
}

impl From<LineEndingArg> for LineEnding {
    fn from(value: LineEndingArg) -> Self {
        match value {
            LineEndingArg::Crlf => LineEnding::CrLf,
            LineEndingArg::Lf => LineEnding::Lf,
        }
    }
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            line_ending: self.line_ending.into(),
            indent: self.indent,
        }
    }

    pub fn lexer_options(&self) -> LexerOptions {
        LexerOptions {
            strict_strings: self.strict_strings,
        }
    }
}
