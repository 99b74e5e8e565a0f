//! Settings loading and types.
//!
//! - Type definitions for the settings structures (`types`)
//! - Layered loading from a YAML file and the environment (`load`)

mod load;
mod types;

pub use types::{MarkdownConfig, Settings};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to encode config file path as a unicode string: {0}")]
    EncodePath(std::path::PathBuf),

    #[error("failed to deserialize settings: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("{0}")]
    Validation(String),
}

impl Settings {
    /// Check the values that end up inside the dataset URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let storage = [
            ("AMAZON_S3_REGION", &self.amazon_s3_region),
            ("AMAZON_S3_BUCKET", &self.amazon_s3_bucket),
            ("AMAZON_S3_DATASET_DATE", &self.amazon_s3_dataset_date),
        ];

        for (key, value) in storage {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if value.contains('/') || value.chars().any(char::is_whitespace) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a single URL segment, got '{value}'"
                )));
            }
        }

        Ok(())
    }
}
