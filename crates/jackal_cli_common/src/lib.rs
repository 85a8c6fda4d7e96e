#![doc = include_str!("../README.md")]

use clap::{value_parser, ArgAction, Args};

/// Common way to set logging levels and output styling
#[derive(Debug, Clone, Copy, Args)]
pub struct LoggingArgs {
    /// Log more, can be repeated
    #[clap(short = 'v', long = "verbose", value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Log less, can be repeated
    #[clap(short = 'q', long = "quiet", value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
    /// Disable colored output
    #[clap(long = "no-color", env = "NO_COLOR")]
    no_color: bool,
}

impl LoggingArgs {
    /// How far from the default level logging was moved. Positive is more verbose.
    pub fn verbosity(&self) -> i8 {
        self.verbose.min(2) as i8 - self.quiet.min(2) as i8
    }

    /// Whether output may use ANSI colors
    pub fn color(&self) -> bool {
        !self.no_color
    }

    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used,
    #[cfg(feature = "tracing")]
    pub fn log_level_filter(&self) -> tracing::level_filters::LevelFilter {
        use tracing::level_filters::LevelFilter;
        match self.verbosity() {
            i8::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            2..=i8::MAX => LevelFilter::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestArgs {
        #[command(flatten)]
        logging: LoggingArgs,
    }

    fn parse(args: &str) -> LoggingArgs {
        TestArgs::try_parse_from(args.split_whitespace())
            .expect("could not parse test string")
            .logging
    }

    #[test]
    fn test_default_verbosity() {
        let logging = parse("test");
        assert_eq!(logging.verbosity(), 0);
    }

    #[test]
    fn test_verbose_and_quiet() {
        assert_eq!(parse("test -vv").verbosity(), 2);
        assert_eq!(parse("test -q").verbosity(), -1);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(TestArgs::try_parse_from(["test", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_no_color() {
        assert!(!parse("test --no-color").color());
    }
}
