use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A record field is missing or out of range. `field` names it, with a
    /// `records[i].` prefix when the record came in a batch.
    #[error("Validation error on `{field}`: {reason}")]
    Validation { field: String, reason: String },

    /// The upstream source could not deliver a complete batch.
    #[error("Source error: {0}")]
    Source(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Prefixes the field of a validation error with the batch position.
    pub fn at_index(self, index: usize) -> Self {
        match self {
            Self::Validation { field, reason } => Self::Validation {
                field: format!("records[{}].{}", index, field),
                reason,
            },
            other => other,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
