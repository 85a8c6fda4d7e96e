use crate::args::Args;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use jackalc::JackalC;
use owo_colors::{OwoColorize, Stream};
use std::io;
use std::io::{stderr, stdout, Stderr, StderrLock, Stdout, StdoutLock};
use std::time::Instant;
use tracing::metadata::LevelFilter;
use tracing::{debug, trace, Level, Metadata};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::{format, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Layer, Registry};

mod args;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    if let Some(shell) = args.completions {
        generate(shell, &mut Args::command(), "jackalc", &mut stdout());
        return Ok(());
    }
    let logging = args.logging();
    if !logging.color() {
        owo_colors::set_override(false);
    }
    init_logging(logging.log_level_filter(), logging.color())?;
    trace!("starting jackalc with args: {args:?}");
    debug!("jackalc version: {}", env!("CARGO_PKG_VERSION"));

    let mut builder = JackalC::builder()
        .emit(args.emit.into())
        .render(args.render_options())
        .lexer(args.lexer_options())
        .recursive(args.recursive);
    if let Some(output_directory) = &args.output_directory {
        builder = builder.output_directory(output_directory);
    }
    if let Some(jobs) = args.jobs {
        builder = builder.jobs(jobs);
    }
    let mut jackal_c = builder.build()?;

    let start = Instant::now();
    match jackal_c.compile_all(args.paths.clone()).await {
        Ok(compiled) => {
            let outputs = compiled.iter().map(|unit| unit.outputs.len()).sum::<usize>();
            println!(
                "{} {} units into {} documents in {:.2?}",
                "Compiled".if_supports_color(Stream::Stdout, |text| text.green()),
                compiled.len(),
                outputs,
                start.elapsed()
            );
            Ok(())
        }
        Err(error) => {
            eprintln!(
                "{} {} failures",
                "Failed".if_supports_color(Stream::Stderr, |text| text.red()),
                error.errors().len()
            );
            Err(error.into())
        }
    }
}

struct MyWriter {
    stdout: Stdout,
    stderr: Stderr,
}

enum StdioLock<'a> {
    Stdout(StdoutLock<'a>),
    Stderr(StderrLock<'a>),
}

impl<'a> io::Write for StdioLock<'a> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            StdioLock::Stdout(stdout) => stdout.write(buf),
            StdioLock::Stderr(stderr) => stderr.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            StdioLock::Stdout(stdout) => stdout.flush(),
            StdioLock::Stderr(stderr) => stderr.flush(),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            StdioLock::Stdout(stdout) => stdout.write_all(buf),
            StdioLock::Stderr(stderr) => stderr.write_all(buf),
        }
    }
}

impl<'a> MakeWriter<'a> for MyWriter {
    type Writer = StdioLock<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        StdioLock::Stdout(self.stdout.lock())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        // warnings and errors go to stderr
        if meta.level() <= &Level::WARN {
            StdioLock::Stderr(self.stderr.lock())
        } else {
            StdioLock::Stdout(self.stdout.lock())
        }
    }
}

fn init_logging(level_filter: LevelFilter, color: bool) -> eyre::Result<()> {
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format().with_thread_ids(true))
                .with_ansi(color)
                .with_writer(MyWriter {
                    stdout: stdout(),
                    stderr: stderr(),
                })
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}
