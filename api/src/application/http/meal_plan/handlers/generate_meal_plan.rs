use axum::extract::State;
use mealplanner_core::domain::meal_plan::{
    entities::GeneratedMealPlan, ports::MealPlanService, value_objects::GenerateMealPlanInput,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::http::{
    meal_plan::validators::GenerateMealPlanRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct GenerateMealPlanResponse {
    pub data: GeneratedMealPlan,
}

#[utoipa::path(
    post,
    path = "",
    tag = "meal-plan",
    summary = "Generate a 7-day meal plan",
    description = "Builds a prompt from the given preferences, asks the configured LLM provider for a plan and validates the answer.",
    responses(
        (status = 200, body = GenerateMealPlanResponse),
        (status = 422, description = "Invalid request or unusable model output", body = ApiErrorResponse),
        (status = 502, description = "LLM provider failure", body = ApiErrorResponse)
    ),
    request_body = GenerateMealPlanRequest
)]
pub async fn generate_meal_plan(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<GenerateMealPlanRequest>,
) -> Result<Response<GenerateMealPlanResponse>, ApiError> {
    let generated = state
        .service
        .generate_meal_plan(GenerateMealPlanInput {
            preferences: payload.into(),
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GenerateMealPlanResponse { data: generated }))
}
