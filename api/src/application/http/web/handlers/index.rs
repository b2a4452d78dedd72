use axum::{extract::State, response::Html};
use mealplanner_core::domain::meal_plan::ports::MealPlanService;

use crate::application::http::{
    server::{api_entities::api_error::ApiError, app_state::AppState},
    web::{validators::PlanForm, views::PlannerPage},
};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    PlannerPage::new(
        state.args.server.root_path.clone(),
        state.service.provider_description(),
        PlanForm::default(),
    )
    .into_html()
}
