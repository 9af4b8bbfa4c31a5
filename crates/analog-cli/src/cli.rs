//! CLI argument definitions for the dump/assessment cross-reference.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "analog",
    version,
    about = "Cross-reference house pairs from an analog dump into an assessment sheet",
    long_about = "Cross-reference house pairs from an analog dump into an assessment sheet.\n\n\
                  Rows are matched on the direct number column. Empty house pair cells in the\n\
                  assessment are filled from the dump; cells that already hold a value are kept.\n\
                  Flags can also come from ANALOG_* environment variables or ~/.analog.toml."
)]
pub struct Cli {
    #[command(flatten)]
    pub job: JobArgs,

    /// Config file (default is $HOME/.analog.toml).
    #[arg(long = "config", value_name = "PATH", env = "ANALOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Job inputs. All are required, but may be supplied by the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct JobArgs {
    /// Dump file, generally exported from the old analog system.
    #[arg(
        short = 'd',
        long = "dump-file",
        value_name = "PATH",
        env = "ANALOG_DUMP_FILE"
    )]
    pub dump_file: Option<PathBuf>,

    /// Dump file direct number header name.
    #[arg(
        long = "df-dn-header",
        value_name = "NAME",
        env = "ANALOG_DF_DN_HEADER"
    )]
    pub df_dn_header: Option<String>,

    /// Dump file house pair header name.
    #[arg(
        long = "df-hp-header",
        value_name = "NAME",
        env = "ANALOG_DF_HP_HEADER"
    )]
    pub df_hp_header: Option<String>,

    /// Assessment file where the analog assessment has been done for the facility.
    #[arg(
        short = 'a',
        long = "assessment-file",
        value_name = "PATH",
        env = "ANALOG_ASSESSMENT_FILE"
    )]
    pub assessment_file: Option<PathBuf>,

    /// Assessment file direct number header name.
    #[arg(
        long = "af-dn-header",
        value_name = "NAME",
        env = "ANALOG_AF_DN_HEADER"
    )]
    pub af_dn_header: Option<String>,

    /// Assessment file house pair header name.
    ///
    /// This column receives the house pairs cross-referenced from the dump file.
    #[arg(
        long = "af-hp-header",
        value_name = "NAME",
        env = "ANALOG_AF_HP_HEADER"
    )]
    pub af_hp_header: Option<String>,

    /// New file that combines the assessment with the cross-referenced house pairs.
    #[arg(
        short = 'o',
        long = "output-file",
        value_name = "PATH",
        env = "ANALOG_OUTPUT_FILE"
    )]
    pub output_file: Option<PathBuf>,
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
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_short_and_long_flags() {
        let cli = Cli::try_parse_from([
            "analog",
            "-d",
            "dump.csv",
            "--df-dn-header",
            "DN",
            "--df-hp-header",
            "HP",
            "-a",
            "assessment.csv",
            "--af-dn-header",
            "Direct Number",
            "--af-hp-header",
            "House Pair",
            "-o",
            "out.csv",
        ])
        .unwrap();
        assert_eq!(cli.job.dump_file, Some(PathBuf::from("dump.csv")));
        assert_eq!(cli.job.af_dn_header.as_deref(), Some("Direct Number"));
        assert_eq!(cli.job.output_file, Some(PathBuf::from("out.csv")));
        assert!(cli.config.is_none());
    }
}
