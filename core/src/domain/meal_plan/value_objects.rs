use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [Complexity::Simple, Complexity::Medium, Complexity::Complex];

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Complexity::Simple => "Simple",
            Complexity::Medium => "Medium",
            Complexity::Complex => "Complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Complexity::Simple),
            "medium" => Ok(Complexity::Medium),
            "complex" => Ok(Complexity::Complex),
            other => Err(CoreError::Invalid(format!("unknown complexity: {other}"))),
        }
    }
}

/// Dietary profile collected from the user for a single generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPreferences {
    pub dietary_restrictions: BTreeSet<String>,
    pub allergies: BTreeSet<String>,
    pub disliked_ingredients: BTreeSet<String>,
    pub goal: Option<String>,
    pub cuisine_preferences: BTreeSet<String>,
    pub complexity: Option<Complexity>,
    pub target_calories: Option<u32>,
    pub cook_time_limit_minutes: Option<u32>,
}

impl UserPreferences {
    /// Trims every entry, drops blank ones and clears zero-valued limits.
    pub fn normalized(self) -> Self {
        Self {
            dietary_restrictions: normalize_set(self.dietary_restrictions),
            allergies: normalize_set(self.allergies),
            disliked_ingredients: normalize_set(self.disliked_ingredients),
            goal: self
                .goal
                .map(|goal| goal.trim().to_string())
                .filter(|goal| !goal.is_empty()),
            cuisine_preferences: normalize_set(self.cuisine_preferences),
            complexity: self.complexity,
            target_calories: self.target_calories.filter(|calories| *calories > 0),
            cook_time_limit_minutes: self.cook_time_limit_minutes.filter(|minutes| *minutes > 0),
        }
    }

    /// True when none of restrictions, allergies, dislikes or goal were given.
    pub fn lacks_profile(&self) -> bool {
        self.dietary_restrictions.is_empty()
            && self.allergies.is_empty()
            && self.disliked_ingredients.is_empty()
            && self.goal.as_deref().is_none_or(|goal| goal.trim().is_empty())
    }
}

fn normalize_set(values: BTreeSet<String>) -> BTreeSet<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Splits comma-separated user input into a set of trimmed, non-empty entries.
pub fn parse_list_input(input: &str) -> BTreeSet<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone)]
pub struct GenerateMealPlanInput {
    pub preferences: UserPreferences,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_input_drops_blanks() {
        let parsed = parse_list_input(" peanuts, ,shellfish ,, ");
        assert_eq!(
            parsed.into_iter().collect::<Vec<_>>(),
            vec!["peanuts".to_string(), "shellfish".to_string()]
        );
    }

    #[test]
    fn test_normalized_clears_blank_goal_and_zero_limits() {
        let preferences = UserPreferences {
            goal: Some("   ".to_string()),
            target_calories: Some(0),
            cook_time_limit_minutes: Some(0),
            allergies: BTreeSet::from([" ".to_string(), " sesame ".to_string()]),
            ..Default::default()
        }
        .normalized();

        assert_eq!(preferences.goal, None);
        assert_eq!(preferences.target_calories, None);
        assert_eq!(preferences.cook_time_limit_minutes, None);
        assert_eq!(preferences.allergies, BTreeSet::from(["sesame".to_string()]));
    }

    #[test]
    fn test_lacks_profile() {
        assert!(UserPreferences::default().lacks_profile());

        let with_goal = UserPreferences {
            goal: Some("muscle gain".to_string()),
            ..Default::default()
        };
        assert!(!with_goal.lacks_profile());

        let cuisine_only = UserPreferences {
            cuisine_preferences: BTreeSet::from(["thai".to_string()]),
            ..Default::default()
        };
        assert!(cuisine_only.lacks_profile());
    }

    #[test]
    fn test_complexity_from_str_is_case_insensitive() {
        assert_eq!("Simple".parse::<Complexity>().unwrap(), Complexity::Simple);
        assert_eq!(" COMPLEX ".parse::<Complexity>().unwrap(), Complexity::Complex);
        assert!("any".parse::<Complexity>().is_err());
    }
}
