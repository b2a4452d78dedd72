use axum::Json;
use mealplanner_core::domain::meal_plan::schema::meal_plan_json_schema;

#[utoipa::path(
    get,
    path = "/schema",
    tag = "meal-plan",
    summary = "Meal plan JSON schema",
    responses(
        (status = 200, description = "JSON schema of the expected model output")
    )
)]
pub async fn get_meal_plan_schema() -> Json<serde_json::Value> {
    Json(meal_plan_json_schema())
}
