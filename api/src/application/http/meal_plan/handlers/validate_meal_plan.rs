use axum::extract::State;
use mealplanner_core::domain::meal_plan::{entities::WeekPlan, ports::MealPlanService};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::http::{
    meal_plan::validators::ValidateMealPlanRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct ValidateMealPlanResponse {
    pub data: WeekPlan,
}

#[utoipa::path(
    post,
    path = "/validate",
    tag = "meal-plan",
    summary = "Validate raw model output",
    description = "Parses text as a week plan without calling a provider and reports every missing or malformed field.",
    responses(
        (status = 200, body = ValidateMealPlanResponse),
        (status = 422, body = ApiErrorResponse)
    ),
    request_body = ValidateMealPlanRequest
)]
pub async fn validate_meal_plan(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<ValidateMealPlanRequest>,
) -> Result<Response<ValidateMealPlanResponse>, ApiError> {
    let plan = state
        .service
        .validate_meal_plan(&payload.raw)
        .map_err(ApiError::from)?;

    Ok(Response::OK(ValidateMealPlanResponse { data: plan }))
}
