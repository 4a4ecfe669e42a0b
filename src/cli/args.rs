use crate::strategy::BatchConfig;
use crate::types::{TransactionId, UserId};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Track user transactions and project scheduled withdrawal coverage
#[derive(Parser, Debug)]
#[command(name = "balance-engine")]
#[command(
    about = "Track user transactions and project scheduled withdrawal coverage",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the balance of every user in a ledger CSV file
    Report(ReportArgs),

    /// Print the balance and withdrawal coverage of one user
    Balance {
        #[arg(long, value_name = "DIR", help = "Ledger directory")]
        ledger: PathBuf,

        #[arg(long, value_name = "ID")]
        user: UserId,
    },

    /// List the transactions of one user as ledger CSV
    List {
        #[arg(long, value_name = "DIR", help = "Ledger directory")]
        ledger: PathBuf,

        #[arg(long, value_name = "ID")]
        user: UserId,
    },

    /// Print a single transaction of one user
    Show {
        #[arg(long, value_name = "DIR", help = "Ledger directory")]
        ledger: PathBuf,

        #[arg(long, value_name = "ID")]
        user: UserId,

        #[arg(long = "id", value_name = "TX")]
        id: TransactionId,
    },

    /// Create a transaction for one user
    Create {
        #[arg(long, value_name = "DIR", help = "Ledger directory")]
        ledger: PathBuf,

        #[arg(long, value_name = "ID")]
        user: UserId,

        #[arg(
            long = "type",
            value_name = "TYPE",
            help = "deposit, refund or scheduled_withdrawal"
        )]
        tx_type: String,

        #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
        amount: String,

        #[arg(long, value_name = "DATE", help = "Date as YYYY-MM-DD")]
        date: String,
    },
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Input CSV file path containing ledger rows
    #[arg(value_name = "INPUT", help = "Path to the ledger CSV file")]
    pub input_file: PathBuf,

    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    #[arg(long = "format", value_name = "FORMAT", default_value = "csv")]
    pub format: OutputFormat,

    /// Number of rows per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of rows per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub max_concurrent: Option<usize>,
}

/// Available processing strategies for reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Report output formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl ReportArgs {
    /// Create a BatchConfig from the report flags, falling back to defaults
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_none() && self.max_concurrent.is_none() {
            return BatchConfig::default();
        }

        let default = BatchConfig::default();
        BatchConfig::new(
            self.batch_size.unwrap_or(default.batch_size),
            self.max_concurrent.unwrap_or(default.max_concurrent),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn report_args(args: &[&str]) -> ReportArgs {
        match CliArgs::try_parse_from(args).unwrap().command {
            Command::Report(report) => report,
            other => panic!("Expected report command, got {:?}", other),
        }
    }

    #[rstest]
    #[case::default_strategy(&["program", "report", "input.csv"], StrategyType::Sync)]
    #[case::explicit_sync(&["program", "report", "--strategy", "sync", "input.csv"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "report", "--strategy", "async", "input.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        assert_eq!(report_args(args).strategy, expected);
    }

    #[rstest]
    #[case::default_format(&["program", "report", "input.csv"], OutputFormat::Csv)]
    #[case::json(&["program", "report", "--format", "json", "input.csv"], OutputFormat::Json)]
    fn test_format_parsing(#[case] args: &[&str], #[case] expected: OutputFormat) {
        assert_eq!(report_args(args).format, expected);
    }

    #[rstest]
    #[case::all_defaults(&["program", "report", "input.csv"], 1000, num_cpus::get())]
    #[case::custom_batch_size(&["program", "report", "--batch-size", "2000", "input.csv"], 2000, num_cpus::get())]
    #[case::custom_max_concurrent(&["program", "report", "--max-concurrent", "8", "input.csv"], 1000, 8)]
    #[case::zero_batch_size(&["program", "report", "--batch-size", "0", "input.csv"], 1000, num_cpus::get())]
    #[case::zero_max_concurrent(&["program", "report", "--max-concurrent", "0", "input.csv"], 1000, num_cpus::get())]
    fn test_batch_config_conversion(
        #[case] args: &[&str],
        #[case] expected_batch_size: usize,
        #[case] expected_max_concurrent: usize,
    ) {
        let config = report_args(args).to_batch_config();

        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.max_concurrent, expected_max_concurrent);
    }

    #[test]
    fn test_show_command() {
        let parsed =
            CliArgs::try_parse_from(["program", "show", "--ledger", "data", "--user", "1", "--id", "7"])
                .unwrap();

        match parsed.command {
            Command::Show { ledger, user, id } => {
                assert_eq!(ledger, PathBuf::from("data"));
                assert_eq!(user, 1);
                assert_eq!(id, 7);
            }
            other => panic!("Expected show command, got {:?}", other),
        }
    }

    #[test]
    fn test_create_command_keeps_raw_values() {
        let parsed = CliArgs::try_parse_from([
            "program", "create", "--ledger", "data", "--user", "3", "--type", "refund",
            "--amount", "-5", "--date", "2024-01-01",
        ])
        .unwrap();

        match parsed.command {
            Command::Create {
                tx_type, amount, ..
            } => {
                assert_eq!(tx_type, "refund");
                assert_eq!(amount, "-5");
            }
            other => panic!("Expected create command, got {:?}", other),
        }
    }

    #[rstest]
    #[case::no_command(&["program"])]
    #[case::missing_input(&["program", "report"])]
    #[case::invalid_strategy(&["program", "report", "--strategy", "invalid", "input.csv"])]
    #[case::invalid_format(&["program", "report", "--format", "xml", "input.csv"])]
    #[case::missing_user(&["program", "balance", "--ledger", "data"])]
    #[case::non_numeric_user(&["program", "balance", "--ledger", "data", "--user", "abc"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
