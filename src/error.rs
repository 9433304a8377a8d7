use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors. Any of these aborts the run.
#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Failed to open input file '{}': {source}", path.display())]
    OpenInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create output file '{}': {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read input: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write to {sink} sink: {source}")]
    Write {
        sink: &'static str,
        source: std::io::Error,
    },

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Per-row failures. Always recovered by turning the row into a rejection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("Invalid JSON row: {0}")]
    Decode(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("{0} can NOT be None or null.")]
    NullField(String),
}

impl RowError {
    /// Short label used for log fields and metric labels.
    pub fn reason(&self) -> &'static str {
        match self {
            RowError::Decode(_) => "decode",
            RowError::MissingField(_) => "missing_field",
            RowError::NullField(_) => "null_field",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_messages() {
        assert_eq!(
            RowError::MissingField("gender".to_string()).to_string(),
            "Missing required field: gender"
        );
        assert_eq!(
            RowError::NullField("birthdate".to_string()).to_string(),
            "birthdate can NOT be None or null."
        );
        assert!(RowError::Decode("expected value".to_string())
            .to_string()
            .starts_with("Invalid JSON row"));
    }

    #[test]
    fn test_row_error_reasons() {
        assert_eq!(RowError::Decode(String::new()).reason(), "decode");
        assert_eq!(RowError::MissingField("uid".into()).reason(), "missing_field");
        assert_eq!(RowError::NullField("uid".into()).reason(), "null_field");
    }

    #[test]
    fn test_fatal_error_names_path() {
        let err = EtlError::OpenInput {
            path: PathBuf::from("data/missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("data/missing.json"));
    }
}
