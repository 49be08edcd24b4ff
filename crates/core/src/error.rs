#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} '{name}' not found")]
    NotFound { entity: &'static str, name: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl CoreError {
    /// Shorthand for a missing category, keyed by its name.
    pub fn category_not_found(name: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: "Category",
            name: name.into(),
        }
    }
}
