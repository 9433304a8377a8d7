//! Row pipeline metrics
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the
//! embedding program installs a recorder.

use crate::error::RowError;
use crate::types::RunSummary;

pub const LINES_READ_TOTAL: &str = "profile_etl_lines_read_total";
pub const ROWS_ACCEPTED_TOTAL: &str = "profile_etl_rows_accepted_total";
pub const ROWS_REJECTED_TOTAL: &str = "profile_etl_rows_rejected_total";
pub const RUN_DURATION_SECONDS: &str = "profile_etl_run_duration_seconds";

/// Metrics for the row pipeline
pub struct PipelineMetrics;

impl PipelineMetrics {
    pub fn record_line_read() {
        ::metrics::counter!(LINES_READ_TOTAL).increment(1);
    }

    pub fn record_accepted() {
        ::metrics::counter!(ROWS_ACCEPTED_TOTAL).increment(1);
    }

    /// Rejections are labelled with the failure reason
    pub fn record_rejected(error: &RowError) {
        ::metrics::counter!(ROWS_REJECTED_TOTAL, "reason" => error.reason()).increment(1);
    }

    pub fn record_run(summary: &RunSummary) {
        ::metrics::histogram!(RUN_DURATION_SECONDS).record(summary.duration_secs);
    }
}
