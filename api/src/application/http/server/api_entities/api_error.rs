use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mealplanner_core::domain::{
    common::entities::app_errors::CoreError, meal_plan::errors::FieldIssue,
};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{message}")]
    InvalidMealPlan {
        message: String,
        issues: Vec<FieldIssue>,
    },

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: String,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<FieldIssue>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError(_) | ApiError::InvalidMealPlan { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "E_BAD_REQUEST",
            ApiError::ValidationError(_) => "E_VALIDATION",
            ApiError::InvalidMealPlan { .. } => "E_INVALID_MEAL_PLAN",
            ApiError::BadGateway(_) => "E_PROVIDER",
            ApiError::InternalServerError(_) => "E_INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidMealPlan(validation) => ApiError::InvalidMealPlan {
                message: "The generated meal plan did not match the expected format".to_string(),
                issues: validation.into_issues(),
            },
            CoreError::ExternalServiceError(message) => ApiError::BadGateway(message),
            CoreError::Invalid(message) => ApiError::BadRequest(message),
            CoreError::Configuration(message) => ApiError::InternalServerError(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().to_string();
        let message = self.to_string();
        let issues = match self {
            ApiError::InvalidMealPlan { issues, .. } => issues,
            _ => Vec::new(),
        };

        (
            status,
            Json(ApiErrorResponse {
                code,
                status: status.as_u16(),
                message,
                issues,
            }),
        )
            .into_response()
    }
}

/// JSON body extractor that also runs `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::ValidationError(e.to_string()))?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use mealplanner_core::domain::meal_plan::errors::{IssueKind, PlanValidationError};

    use super::*;

    #[test]
    fn test_core_errors_map_to_statuses() {
        let provider: ApiError = CoreError::ExternalServiceError("timeout".into()).into();
        assert_eq!(provider.status(), StatusCode::BAD_GATEWAY);

        let invalid: ApiError = CoreError::InvalidMealPlan(PlanValidationError::new(vec![
            FieldIssue::new("sunday", IssueKind::Missing),
        ]))
        .into();
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
        match invalid {
            ApiError::InvalidMealPlan { issues, .. } => assert_eq!(issues.len(), 1),
            other => panic!("unexpected {other:?}"),
        }

        let config: ApiError = CoreError::Configuration("missing key".into()).into();
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
