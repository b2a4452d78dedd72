use mealplanner_core::domain::meal_plan::value_objects::{Complexity, UserPreferences};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct GenerateMealPlanRequest {
    #[serde(default)]
    #[validate(length(max = 25, message = "at most 25 dietary restrictions"))]
    pub dietary_restrictions: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 25, message = "at most 25 allergies"))]
    pub allergies: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 25, message = "at most 25 disliked ingredients"))]
    pub disliked_ingredients: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 200, message = "goal must be at most 200 characters"))]
    pub goal: Option<String>,

    #[serde(default)]
    #[validate(length(max = 25, message = "at most 25 cuisine preferences"))]
    pub cuisine_preferences: Vec<String>,

    #[serde(default)]
    pub complexity: Option<Complexity>,

    #[serde(default)]
    #[validate(range(min = 500, max = 10000, message = "target_calories must be between 500 and 10000"))]
    pub target_calories: Option<u32>,

    #[serde(default)]
    #[validate(range(min = 5, max = 600, message = "cook_time_limit_minutes must be between 5 and 600"))]
    pub cook_time_limit_minutes: Option<u32>,
}

impl From<GenerateMealPlanRequest> for UserPreferences {
    fn from(request: GenerateMealPlanRequest) -> Self {
        UserPreferences {
            dietary_restrictions: request.dietary_restrictions.into_iter().collect(),
            allergies: request.allergies.into_iter().collect(),
            disliked_ingredients: request.disliked_ingredients.into_iter().collect(),
            goal: request.goal,
            cuisine_preferences: request.cuisine_preferences.into_iter().collect(),
            complexity: request.complexity,
            target_calories: request.target_calories,
            cook_time_limit_minutes: request.cook_time_limit_minutes,
        }
        .normalized()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct ValidateMealPlanRequest {
    /// Raw model output, optionally wrapped in markdown code fences.
    #[validate(length(min = 1, message = "raw is required"))]
    pub raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_converts_to_normalized_preferences() {
        let request = GenerateMealPlanRequest {
            dietary_restrictions: vec!["vegan".into(), " vegan ".into(), "".into()],
            goal: Some("  ".into()),
            ..Default::default()
        };

        let preferences = UserPreferences::from(request);

        assert_eq!(preferences.dietary_restrictions.len(), 1);
        assert_eq!(preferences.goal, None);
    }

    #[test]
    fn test_out_of_range_calories_fail_validation() {
        let request = GenerateMealPlanRequest {
            target_calories: Some(100),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
