//! the args for running tavolac

use clap::{value_parser, ArgAction};
use std::path::PathBuf;
use tracing::metadata::LevelFilter;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Compiles tavola configuration files into TOML")]
pub struct Args {
    /// The config file to compile
    #[clap(value_name = "config file", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// More verbose logging
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Less verbose logging
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl Args {
    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used
    pub fn log_level_filter(&self) -> LevelFilter {
        let sum = self.verbose as i8 - self.quiet as i8;
        match sum {
            -2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            2 => LevelFilter::TRACE,
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from("tavolac config.tav".split(' '))
            .expect("could not parse test string");
        assert_eq!(args.file, Path::new("config.tav"));
        assert_eq!(args.log_level_filter(), LevelFilter::INFO);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Args::try_parse_from(["tavolac"]).is_err());
    }

    #[test]
    fn test_extra_positional_is_an_error() {
        assert!(Args::try_parse_from(["tavolac", "a.tav", "b.tav"]).is_err());
    }

    #[test]
    fn test_verbosity_flags() {
        let args = Args::try_parse_from(["tavolac", "-vv", "config.tav"]).unwrap();
        assert_eq!(args.log_level_filter(), LevelFilter::TRACE);
        let args = Args::try_parse_from(["tavolac", "-q", "config.tav"]).unwrap();
        assert_eq!(args.log_level_filter(), LevelFilter::ERROR);
        assert!(Args::try_parse_from(["tavolac", "-v", "-q", "config.tav"]).is_err());
    }
}
