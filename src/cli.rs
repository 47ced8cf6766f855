//! CLI argument parsing for prepost

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format for analysis results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "prepost")]
#[command(version)]
#[command(about = "Paired-samples pre/post analyzer with significance testing", long_about = None)]
pub struct Cli {
    /// CSV file with one column per measurement
    pub input: PathBuf,

    /// Pre-test columns, comma-separated, in pairing order
    #[arg(long = "pre", value_name = "NAMES", value_delimiter = ',', required = true)]
    pub pre: Vec<String>,

    /// Post-test columns, comma-separated, paired positionally with --pre
    #[arg(long = "post", value_name = "NAMES", value_delimiter = ',', required = true)]
    pub post: Vec<String>,

    /// Output format (text, json, or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Include chart-ready data series in JSON output
    #[arg(long = "charts")]
    pub charts: bool,

    /// Enable verbose tracing to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_pair_selections() {
        let cli = Cli::parse_from([
            "prepost", "data.csv", "--pre", "a,b", "--post", "c,d",
        ]);
        assert_eq!(cli.pre, vec!["a", "b"]);
        assert_eq!(cli.post, vec!["c", "d"]);
        assert_eq!(cli.input, PathBuf::from("data.csv"));
    }

    #[test]
    fn test_cli_single_pair() {
        let cli = Cli::parse_from(["prepost", "data.csv", "--pre", "a", "--post", "b"]);
        assert_eq!(cli.pre.len(), 1);
        assert_eq!(cli.post.len(), 1);
    }

    #[test]
    fn test_cli_requires_selections() {
        assert!(Cli::try_parse_from(["prepost", "data.csv"]).is_err());
        assert!(Cli::try_parse_from(["prepost", "data.csv", "--pre", "a"]).is_err());
    }

    #[test]
    fn test_cli_format_default_text() {
        let cli = Cli::parse_from(["prepost", "data.csv", "--pre", "a", "--post", "b"]);
        assert!(matches!(cli.format, OutputFormat::Text));
    }

    #[test]
    fn test_cli_format_json() {
        let cli = Cli::parse_from([
            "prepost", "data.csv", "--pre", "a", "--post", "b", "--format", "json",
        ]);
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn test_cli_charts_flag_default_false() {
        let cli = Cli::parse_from(["prepost", "data.csv", "--pre", "a", "--post", "b"]);
        assert!(!cli.charts);
        assert!(!cli.debug);
    }
}
