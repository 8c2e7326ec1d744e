//! CLI argument definitions for the scrub data cleaner.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use scrub_model::Domain;

#[derive(Parser)]
#[command(
    name = "scrub",
    version,
    about = "scrub - configurable per-field data cleaning",
    long_about = "Clean and normalize tabular data column by column.\n\n\
                  Each column is bound to a domain (text, number, datetime, email, url)\n\
                  and cleaned by that domain's configurable rule pipeline."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Clean CSV columns and write the cleaned file.
    Clean(CleanArgs),

    /// Print the effective merged configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Input CSV file with a header row.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Column to clean, as NAME:DOMAIN (repeatable).
    ///
    /// Domains: text, number, datetime, email, url.
    #[arg(long = "column", value_name = "NAME:DOMAIN", required = true)]
    pub columns: Vec<ColumnSpec>,

    /// Output path (default: <INPUT> with a .cleaned.csv extension).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Configuration file (JSON) merged over the built-in defaults.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Configuration override, as dot.path=value (repeatable).
    ///
    /// Values parse as JSON where possible, falling back to strings:
    /// --set cleaners.text.max_length=10 --set cleaners.url.default_scheme=http
    #[arg(long = "set", value_name = "PATH=VALUE")]
    pub overrides: Vec<String>,

    /// Stop at the first cell that fails to clean.
    ///
    /// Without this flag failed cells keep their raw value in the output
    /// and are counted in the summary.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Clean and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Configuration file (JSON) merged over the built-in defaults.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Configuration override, as dot.path=value (repeatable).
    #[arg(long = "set", value_name = "PATH=VALUE")]
    pub overrides: Vec<String>,
}

/// One `NAME:DOMAIN` column binding from the command line.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: String,
    pub domain: Domain,
}

impl FromStr for ColumnSpec {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let Some((name, domain)) = value.rsplit_once(':') else {
            return Err(format!("expected NAME:DOMAIN, got '{value}'"));
        };
        if name.is_empty() {
            return Err(format!("empty column name in '{value}'"));
        }
        let domain = Domain::from_str(domain).map_err(|error| error.to_string())?;
        Ok(Self { name: name.to_string(), domain })
    }
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
    fn column_spec_parses_name_and_domain() {
        let spec: ColumnSpec = "amount:number".parse().unwrap();
        assert_eq!(spec.name, "amount");
        assert_eq!(spec.domain, Domain::Number);
    }

    #[test]
    fn column_spec_keeps_colons_in_the_name() {
        let spec: ColumnSpec = "visit:date:datetime".parse().unwrap();
        assert_eq!(spec.name, "visit:date");
        assert_eq!(spec.domain, Domain::DateTime);
    }

    #[test]
    fn column_spec_rejects_bad_input() {
        assert!("no-domain".parse::<ColumnSpec>().is_err());
        assert!(":number".parse::<ColumnSpec>().is_err());
        assert!("name:nope".parse::<ColumnSpec>().is_err());
    }
}
