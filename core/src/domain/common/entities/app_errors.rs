use thiserror::Error;

use crate::domain::meal_plan::errors::PlanValidationError;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Invalid meal plan: {0}")]
    InvalidMealPlan(PlanValidationError),

    #[error("Invalid input: {0}")]
    Invalid(String),
}

impl From<PlanValidationError> for CoreError {
    fn from(error: PlanValidationError) -> Self {
        CoreError::InvalidMealPlan(error)
    }
}
