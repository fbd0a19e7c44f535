//! Error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes and recovery actions
//! - Proper exit codes for scripted use
//!
//! `ConfigParse` and `StorageUnavailable` are recoverable: the option store
//! converts them into fallbacks and only logs them. The remaining variants
//! surface through the history and the CLI.
//!
//! # Examples
//!
//! ```
//! use oobee_scan::error::OobeeError;
//!
//! let err = OobeeError::SnapshotNotFound {
//!     id: "scan-42".to_string(),
//! };
//!
//! assert!(err.suggestion().unwrap().contains("snapshot list"));
//! assert_eq!(err.exit_code(), 65);
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors for option persistence and snapshot comparison
#[derive(Error, Debug)]
pub enum OobeeError {
    /// Persisted record exists but cannot be decoded
    #[error("Malformed record under key '{key}'")]
    ConfigParse {
        /// Storage key of the record
        key: String,
        #[source]
        /// JSON decoding error
        source: serde_json::Error,
    },

    /// Persistence backend is missing or denied access
    #[error("Storage unavailable for key '{key}'")]
    StorageUnavailable {
        /// Storage key that was being accessed
        key: String,
        #[source]
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// No snapshot with this id in history
    #[error("Snapshot not found: {id}")]
    SnapshotNotFound {
        /// Requested snapshot id
        id: String,
    },

    /// Compliance score outside 0..=100
    #[error("Compliance score {score} is out of range (0-100)")]
    InvalidScore {
        /// Rejected score
        score: u32,
    },

    /// Unknown ranking metric name
    #[error("Unknown rank metric: '{metric}'")]
    InvalidRankMetric {
        /// Rejected metric name
        metric: String,
        /// Accepted metric names
        valid_metrics: Vec<String>,
    },

    /// Unknown value for a scan option
    #[error("Invalid value '{value}' for option '{option}'")]
    InvalidOption {
        /// Option name
        option: String,
        /// Rejected value
        value: String,
        /// Accepted values
        expected: Vec<String>,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Project configuration file could not be parsed
    #[error("Invalid configuration file {path}: {message}")]
    InvalidConfig {
        /// Path of the config file
        path: PathBuf,
        /// Parser message
        message: String,
    },
}

impl OobeeError {
    /// Get actionable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ConfigParse { key, .. } => Some(format!(
                "Run 'oobee options reset' to overwrite the '{}' record with defaults",
                key
            )),
            Self::StorageUnavailable { .. } => Some(
                "Check that the store directory is writable; changes only last for this session"
                    .to_string(),
            ),
            Self::SnapshotNotFound { .. } => {
                Some("Run 'oobee snapshot list' to see recorded scans".to_string())
            }
            Self::InvalidScore { .. } => {
                Some("Compliance scores are percentages between 0 and 100".to_string())
            }
            Self::InvalidRankMetric { valid_metrics, .. } => {
                Some(format!("Valid metrics: {}", valid_metrics.join(", ")))
            }
            Self::InvalidOption {
                option, expected, ..
            } => Some(format!(
                "Valid values for {}: {}",
                option,
                expected.join(", ")
            )),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
            Self::InvalidConfig { path, .. } => Some(format!(
                "Fix or delete {} to fall back to defaults",
                path.display()
            )),
        }
    }

    /// Get appropriate exit code for this error, following sysexits.h.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigParse { .. } => 65,          // EX_DATAERR
            Self::StorageUnavailable { .. } => 74,   // EX_IOERR
            Self::SnapshotNotFound { .. } => 65,     // EX_DATAERR
            Self::InvalidScore { .. } => 64,         // EX_USAGE
            Self::InvalidRankMetric { .. } => 64,    // EX_USAGE
            Self::InvalidOption { .. } => 64,        // EX_USAGE
            Self::Io { .. } => 74,                   // EX_IOERR
            Self::InvalidConfig { .. } => 78,        // EX_CONFIG
        }
    }

    /// Whether the store boundary degrades this error to a fallback
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ConfigParse { .. } | Self::StorageUnavailable { .. }
        )
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(oobee_error) = error.downcast_ref::<OobeeError>() {
            if let Some(suggestion) = oobee_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(oobee_error) = error.downcast_ref::<OobeeError>() {
            oobee_error.exit_code()
        } else {
            1
        }
    }
}
