//! Processing strategy module for whole-ledger balance reports
//!
//! A report reads a ledger CSV, computes the balance of every user found in
//! it and writes the results. The Strategy pattern lets the pipeline
//! (synchronous, or asynchronous with per-user tasks) be picked at runtime.
//! Both strategies produce identical output for the same input.

use crate::cli::{OutputFormat, StrategyType};
use crate::io::{write_balances_csv, write_balances_json};
use crate::types::{Balance, UserId};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for balance report pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Read a ledger from `input_path` and write the balance report to `output`
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the report was written (malformed rows are logged and skipped)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O error, etc.)
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Write per-user balances in the requested format
pub fn write_report(
    format: OutputFormat,
    balances: &[(UserId, Balance)],
    output: &mut dyn Write,
) -> Result<(), String> {
    match format {
        OutputFormat::Csv => write_balances_csv(balances, output),
        OutputFormat::Json => write_balances_json(balances, output),
    }
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async processing (ignored for sync)
/// * `format` - Output format of the report
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    format: OutputFormat,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(format)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, format))
        }
    }
}
