use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::domain::meal_plan::{
    errors::PlanValidationError, schema::meal_plan_json_schema, value_objects::UserPreferences,
};

/// System instruction sent alongside every meal plan prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful meal planning assistant. Generate meal plans \
strictly in the requested JSON format based on user profiles. Output ONLY the JSON object.";

fn join(values: &BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Labelled lines for every preference that carries a value, in a fixed order.
///
/// These are the lines embedded in the prompt, so they show exactly which
/// profile is sent to the provider.
pub fn profile_lines(preferences: &UserPreferences) -> Vec<(&'static str, String)> {
    let mut lines = Vec::new();

    if !preferences.dietary_restrictions.is_empty() {
        lines.push(("Dietary restrictions", join(&preferences.dietary_restrictions)));
    }
    if !preferences.allergies.is_empty() {
        lines.push(("Allergies", join(&preferences.allergies)));
    }
    if !preferences.disliked_ingredients.is_empty() {
        lines.push(("Disliked ingredients", join(&preferences.disliked_ingredients)));
    }
    if let Some(goal) = &preferences.goal {
        lines.push(("Goal", goal.clone()));
    }
    if !preferences.cuisine_preferences.is_empty() {
        lines.push(("Preferred cuisines", join(&preferences.cuisine_preferences)));
    }
    if let Some(complexity) = preferences.complexity {
        lines.push(("Desired complexity", complexity.to_string()));
    }
    if let Some(calories) = preferences.target_calories {
        lines.push(("Target daily calories", format!("approximately {calories} kcal")));
    }
    if let Some(minutes) = preferences.cook_time_limit_minutes {
        lines.push(("Max cook time per meal", format!("{minutes} minutes")));
    }

    lines
}

/// Renders the generation prompt for a normalized preference record.
///
/// Preferences without a value are left out entirely.
pub fn build_meal_plan_prompt(preferences: &UserPreferences) -> String {
    let lines = profile_lines(preferences);
    let mut prompt = String::new();

    if lines.is_empty() {
        prompt.push_str(
            "Generate a balanced, varied 7-day meal plan (Monday to Sunday) for a general audience.\n",
        );
    } else {
        prompt.push_str(
            "Generate a personalized 7-day meal plan (Monday to Sunday) for a user with the following profile:\n",
        );
        for (label, value) in &lines {
            let _ = writeln!(prompt, "- {label}: {value}");
        }
    }

    prompt.push_str("\nPlease provide a plan including Breakfast, Lunch, and Dinner for each day.");
    prompt.push_str(
        " For each meal, provide a 'meal_name' and a 'recipe' with clear, easy-to-follow instructions.",
    );
    if !lines.is_empty() {
        prompt.push_str(" Ensure every meal strictly respects the profile above.");
    }
    prompt.push_str(" Structure the output as a valid JSON object matching this JSON schema:\n");

    let schema = serde_json::to_string_pretty(&meal_plan_json_schema()).unwrap_or_default();
    let _ = writeln!(prompt, "```json\n{schema}\n```");
    prompt.push_str(
        "Ensure the final output is ONLY the JSON object, without any introductory text or explanations.",
    );

    prompt
}

/// Prompt asking the model to repair an answer that failed validation.
pub fn build_correction_prompt(
    original_prompt: &str,
    previous_output: &str,
    error: &PlanValidationError,
) -> String {
    let mut prompt = String::from(original_prompt);

    prompt.push_str(
        "\n\nYour previous answer could not be used because it did not match the required structure:\n",
    );
    for issue in error.issues() {
        let _ = writeln!(prompt, "- {issue}");
    }
    let _ = writeln!(prompt, "\nPrevious answer:\n```\n{}\n```", previous_output.trim());
    prompt.push_str(
        "Return the corrected, complete JSON object for all seven days. Output ONLY the JSON object.",
    );

    prompt
}
