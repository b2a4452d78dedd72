use crate::application::http::{health::HealthApiDoc, meal_plan::router::MealPlanApiDoc};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Meal Planner API"
    ),
    nest(
        (path = "/meal-plans", api = MealPlanApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
