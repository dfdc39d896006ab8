use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The model call failed or returned nothing usable.
    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),

    /// Caller input rejected before any model call was attempted.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Meal log has not been loaded yet")]
    MealLogNotReady,

    #[error("Meal log storage error: {0}")]
    Storage(String),
}
