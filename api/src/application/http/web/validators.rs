use mealplanner_core::domain::meal_plan::value_objects::{
    Complexity, UserPreferences, parse_list_input,
};
use serde::Deserialize;

/// Raw values of the preference form; list fields are comma-separated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlanForm {
    pub dietary_restrictions: String,
    pub allergies: String,
    pub dislikes: String,
    pub goal: String,
    pub cuisines: String,
    pub complexity: String,
    pub target_calories: String,
    pub cook_time_limit: String,
}

impl PlanForm {
    pub fn to_preferences(&self) -> Result<UserPreferences, String> {
        let complexity = match self.complexity.trim() {
            "" => None,
            value if value.eq_ignore_ascii_case("any") => None,
            value => Some(
                value
                    .parse::<Complexity>()
                    .map_err(|_| format!("Unknown meal complexity: {value}"))?,
            ),
        };

        Ok(UserPreferences {
            dietary_restrictions: parse_list_input(&self.dietary_restrictions),
            allergies: parse_list_input(&self.allergies),
            disliked_ingredients: parse_list_input(&self.dislikes),
            goal: Some(self.goal.clone()),
            cuisine_preferences: parse_list_input(&self.cuisines),
            complexity,
            target_calories: parse_optional_number("Target daily calories", &self.target_calories)?,
            cook_time_limit_minutes: parse_optional_number(
                "Max cook time per meal",
                &self.cook_time_limit,
            )?,
        }
        .normalized())
    }
}

fn parse_optional_number(label: &str, value: &str) -> Result<Option<u32>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    value
        .parse::<u32>()
        .map(|number| Some(number).filter(|n| *n > 0))
        .map_err(|_| format!("{label} must be a whole number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_to_preferences() {
        let form = PlanForm {
            dietary_restrictions: "vegetarian, gluten-free".to_string(),
            allergies: "peanuts".to_string(),
            goal: " weight loss ".to_string(),
            complexity: "Simple".to_string(),
            target_calories: "1800".to_string(),
            cook_time_limit: "0".to_string(),
            ..Default::default()
        };

        let preferences = form.to_preferences().unwrap();

        assert_eq!(preferences.dietary_restrictions.len(), 2);
        assert_eq!(preferences.goal.as_deref(), Some("weight loss"));
        assert_eq!(preferences.complexity, Some(Complexity::Simple));
        assert_eq!(preferences.target_calories, Some(1800));
        assert_eq!(preferences.cook_time_limit_minutes, None);
        assert!(preferences.disliked_ingredients.is_empty());
    }

    #[test]
    fn test_any_complexity_means_none() {
        let form = PlanForm {
            complexity: "Any".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_preferences().unwrap().complexity, None);
    }

    #[test]
    fn test_non_numeric_limit_is_rejected() {
        let form = PlanForm {
            cook_time_limit: "half an hour".to_string(),
            ..Default::default()
        };
        let message = form.to_preferences().unwrap_err();
        assert!(message.contains("Max cook time per meal"));
    }
}
