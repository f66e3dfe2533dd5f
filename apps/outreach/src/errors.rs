use thiserror::Error;

/// Application-level error type for stores and session operations.
///
/// AI gateway failures never show up here: the gateway recovers them locally
/// and reports the reason on its `Outcome` instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored document '{key}' is corrupt: {source}")]
    CorruptDocument {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Another request is still in progress")]
    Busy,

    #[error("No draft is open")]
    NoDraft,
}

impl AppError {
    /// Short, user-facing line for the interactive shell.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                "Could not save your data to disk".to_string()
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {e}");
                "Could not encode your data".to_string()
            }
            AppError::CorruptDocument { key, .. } => {
                format!("Saved data '{key}' could not be read")
            }
            AppError::Busy => "Still working on the previous request".to_string(),
            AppError::NoDraft => "Open a draft first with `draft <n>`".to_string(),
        }
    }
}
