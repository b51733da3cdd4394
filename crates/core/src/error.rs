use crate::types::EntityId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: EntityId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Every generation attempt failed (or the generator is unusable).
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The message shown inline in a view, without the category prefix.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::NotFound { entity, .. } => format!("{entity} not found"),
            CoreError::Validation(msg)
            | CoreError::Conflict(msg)
            | CoreError::Unauthorized(msg)
            | CoreError::Forbidden(msg)
            | CoreError::GenerationFailed(msg)
            | CoreError::Internal(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_strips_category() {
        let err = CoreError::Validation("Please enter a project title".into());
        assert_eq!(err.to_string(), "Validation failed: Please enter a project title");
        assert_eq!(err.user_message(), "Please enter a project title");
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = CoreError::NotFound {
            entity: "Task",
            id: EntityId::nil(),
        };
        assert_eq!(err.user_message(), "Task not found");
    }
}
