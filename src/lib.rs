//! Splits JSON Lines profile rows into accepted and rejected files,
//! stamping each row with ETL batch metadata.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod output;
pub mod pipeline;
pub mod runner;
pub mod types;

pub use error::{EtlError, Result, RowError};
pub use pipeline::{RowOutcome, RowPipeline};
pub use runner::{run, RunOptions};
pub use types::{BatchContext, Row, RowTags, RunCounters, RunSummary};
