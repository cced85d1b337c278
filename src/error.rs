use thiserror::Error;

#[derive(Error, Debug)]
pub enum BidashError {
    #[error("Not in a bidash project. Run 'bidash init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .bidash/ to reinitialize.")]
    AlreadyInitialized,

    #[error("{kind} not found: {id}")]
    EntityNotFound { kind: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Area '{area}' is still used by {} BI(s): {}", bis.len(), bis.join(", "))]
    AreaInUse { area: String, bis: Vec<String> },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl BidashError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        BidashError::EntityNotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        BidashError::Validation(message.into())
    }

    /// True for failures of the backing key-value store.
    pub fn is_storage(&self) -> bool {
        matches!(self, BidashError::Storage(_))
    }
}

pub type Result<T> = std::result::Result<T, BidashError>;
