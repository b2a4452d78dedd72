pub mod generate_meal_plan;
pub mod get_meal_plan_schema;
pub mod validate_meal_plan;
