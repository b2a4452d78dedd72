use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::Html,
};
use mealplanner_core::domain::meal_plan::{
    ports::MealPlanService, value_objects::GenerateMealPlanInput,
};
use tracing::{info, warn};

use crate::application::http::{
    server::{api_entities::api_error::ApiError, app_state::AppState},
    web::{
        validators::PlanForm,
        views::{FailureView, PlanView, PlannerPage},
    },
};

const MISSING_PROFILE_WARNING: &str =
    "Please fill in at least one profile field to get a personalized plan.";

pub async fn generate_plan(
    State(state): State<AppState>,
    Form(form): Form<PlanForm>,
) -> Result<(StatusCode, Html<String>), ApiError> {
    let page = PlannerPage::new(
        state.args.server.root_path.clone(),
        state.service.provider_description(),
        form.clone(),
    );

    let preferences = match form.to_preferences() {
        Ok(preferences) => preferences,
        Err(message) => {
            return Ok((StatusCode::BAD_REQUEST, page.with_warning(message).into_html()?));
        }
    };

    if preferences.lacks_profile() {
        return Ok((StatusCode::OK, page.with_warning(MISSING_PROFILE_WARNING).into_html()?));
    }

    let page = page.with_profile(&preferences);

    match state
        .service
        .generate_meal_plan(GenerateMealPlanInput { preferences })
        .await
    {
        Ok(generated) => {
            info!(plan_id = %generated.id, attempts = generated.attempts, "meal plan rendered");
            Ok((StatusCode::OK, page.with_plan(PlanView::from(&generated)).into_html()?))
        }
        Err(e) => {
            warn!("meal plan generation failed: {}", e);
            let status = FailureView::status(&e);
            Ok((status, page.with_failure(FailureView::from(e)).into_html()?))
        }
    }
}
