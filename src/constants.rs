//! Field names and formats shared across the pipeline.

// Metadata columns added during enrichment
pub const MODIFIED_TIMESTAMP_FIELD: &str = "modified_timestamp";
pub const BATCH_ID_FIELD: &str = "batch_id";
pub const TAGS_FIELD: &str = "tags";

// Columns only present on rejection records
pub const ERROR_FIELD: &str = "error";
pub const LINE_NUMBER_FIELD: &str = "line_number";
pub const RAW_LINE_FIELD: &str = "raw_line";

/// Fields that must be present in every accepted row, checked in this order.
pub const REQUIRED_SCHEMA_FIELDS: &[&str] = &[
    "uid",
    "name",
    "gender",
    "email",
    "birthdate",
    "salary",
    "credit_score",
    "active",
    MODIFIED_TIMESTAMP_FIELD,
];

/// Fields that must hold a non-null value in every accepted row, checked in this order.
pub const NOT_NULL_FIELDS: &[&str] = &[
    "uid",
    "name",
    "gender",
    "email",
    "birthdate",
    "salary",
    "credit_score",
    "active",
    MODIFIED_TIMESTAMP_FIELD,
];

// Default classification tags
pub const DEFAULT_SECURITY_LEVEL: &str = "high";
pub const DEFAULT_ALLOW_USER_GROUPS: &[&str] = &["admin"];

/// Day comes before month. Downstream consumers parse this exact layout.
pub const ETL_TIMESTAMP_FORMAT: &str = "%Y-%d-%m %H:%M:%S%.6f %z";

/// Date stamp used in output file names.
pub const FILE_DATE_FORMAT: &str = "%Y%m%d";

pub const OK_FILE_SUFFIX: &str = "ok";
pub const REJECT_FILE_SUFFIX: &str = "reject";
pub const OUTPUT_EXTENSION: &str = "json";

// Configuration lookup
pub const CONFIG_ENV_VAR: &str = "PROFILE_ETL_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "profile-etl.toml";

/// Values of the `print_lines` argument that enable echoing accepted rows.
pub const TRUTHY_FLAGS: &[&str] = &["yes", "true"];

/// Returns true when `value` is one of the truthy flag literals, ignoring case.
pub fn is_truthy_flag(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    TRUTHY_FLAGS.contains(&lowered.as_str())
}
