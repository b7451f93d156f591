use thiserror::Error;

pub type ArticleResult<T> = Result<T, ArticleError>;

#[derive(Error, Debug)]
pub enum ArticleError {
    #[error("Unknown template type: {0}")]
    UnknownTemplate(String),

    #[error("Variable pool '{0}' is empty or not defined")]
    EmptyPool(String),

    #[error("Unresolved token '{{{0}}}' in pattern")]
    UnresolvedToken(String),

    #[error("Invalid template definition '{template_type}': {reason}")]
    InvalidTemplate {
        template_type: String,
        reason: String,
    },

    #[error("Invalid batch state transition: {0}")]
    InvalidTransition(String),

    #[error("Request validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ArticleError {
    /// Slot-level errors abort only the current article and are recorded by
    /// the batch orchestrator. Everything else is fatal to the request.
    pub fn is_slot_recoverable(&self) -> bool {
        matches!(
            self,
            ArticleError::EmptyPool(_) | ArticleError::UnresolvedToken(_)
        )
    }
}
