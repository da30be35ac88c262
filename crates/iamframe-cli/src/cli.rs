//! CLI argument definitions for the domain swap tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use iamframe_transform::Subannual;

#[derive(Parser)]
#[command(
    name = "iamframe",
    version,
    about = "Swap the temporal key of long-format datasets between time and year",
    long_about = "Swap the temporal key of long-format CSV datasets.\n\n\
                  `downcast` replaces a datetime `time` column with an integer `year`,\n\
                  optionally keeping the sub-year part in a `subannual` column.\n\
                  `upcast` rebuilds `time` from `year` and `subannual`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Replace the `time` key column with `year`.
    Downcast(DowncastArgs),

    /// Replace the `year` key column with `time`.
    Upcast(UpcastArgs),

    /// Describe the key structure of a dataset.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct DowncastArgs {
    /// Long-format CSV file with a `time` column.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the converted CSV file.
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Keep the sub-year part in a `subannual` column using the default format.
    #[arg(long = "subannual")]
    pub subannual: bool,

    /// Keep the sub-year part using a custom strftime pattern.
    #[arg(long = "subannual-format", value_name = "FMT")]
    pub subannual_format: Option<String>,
}

impl DowncastArgs {
    /// The subannual option selected by the flags; a custom pattern wins.
    pub fn subannual(&self) -> Subannual {
        match &self.subannual_format {
            Some(pattern) => Subannual::CustomFormat(pattern.clone()),
            None => Subannual::from(self.subannual),
        }
    }
}

#[derive(Parser)]
pub struct UpcastArgs {
    /// Long-format CSV file with a `year` column.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the converted CSV file.
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Long-format CSV file to describe.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_subannual_flags() {
        let cli = Cli::parse_from(["iamframe", "downcast", "in.csv", "-o", "out.csv"]);
        let Command::Downcast(args) = cli.command else {
            panic!("expected downcast");
        };
        assert!(matches!(args.subannual(), Subannual::Disabled));

        let cli = Cli::parse_from([
            "iamframe",
            "downcast",
            "in.csv",
            "-o",
            "out.csv",
            "--subannual",
        ]);
        let Command::Downcast(args) = cli.command else {
            panic!("expected downcast");
        };
        assert!(matches!(args.subannual(), Subannual::DefaultFormat));

        let cli = Cli::parse_from([
            "iamframe",
            "downcast",
            "in.csv",
            "-o",
            "out.csv",
            "--subannual-format",
            "%m-%d",
        ]);
        let Command::Downcast(args) = cli.command else {
            panic!("expected downcast");
        };
        assert!(matches!(args.subannual(), Subannual::CustomFormat(ref p) if p == "%m-%d"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "iamframe",
            "inspect",
            "in.csv",
            "--json",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ]);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        assert!(matches!(cli.log_level, Some(LogLevelArg::Debug)));
        assert!(matches!(cli.command, Command::Inspect(InspectArgs { json: true, .. })));
    }

    #[test]
    fn test_downcast_requires_output() {
        assert!(Cli::try_parse_from(["iamframe", "downcast", "in.csv"]).is_err());
    }
}
