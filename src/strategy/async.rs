//! Asynchronous batch processing strategy
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent)
//!     ├── AsyncReader (batch CSV reading)
//!     └── BalanceProcessor (user partitioning + one task per user)
//! ```
//!
//! Batches are read and ingested sequentially so that every user history
//! keeps input order. Once the input is exhausted, balances are computed in
//! parallel on a tokio multi-threaded runtime.

use crate::cli::OutputFormat;
use crate::core::r#async::BalanceProcessor;
use crate::io::async_reader::AsyncReader;
use crate::strategy::{write_report, ProcessingStrategy};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Configuration for batch processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of rows per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig; zero values fall back to the defaults
    pub fn new(batch_size: usize, max_concurrent: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent = if max_concurrent == 0 {
            warn!(
                "Invalid max_concurrent ({}), using default ({})",
                max_concurrent, default.max_concurrent
            );
            default.max_concurrent
        } else {
            max_concurrent
        };

        Self {
            batch_size,
            max_concurrent,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    format: OutputFormat,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Fatal errors (file not found, runtime errors) are returned immediately.
    /// Malformed rows are logged and skipped.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        let balances = runtime.block_on(async {
            let processor = BalanceProcessor::new();

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async reads through the futures io traits
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut batches = 0usize;
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }
                batches += 1;
                processor.ingest(batch);
            }

            debug!(
                batches,
                users = processor.pending_users(),
                "ledger ingested"
            );

            processor.compute_all().await;

            Ok::<_, String>(processor.balances())
        })?;

        write_report(self.format, &balances, output)
    }
}
