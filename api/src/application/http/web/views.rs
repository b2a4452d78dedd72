use askama::Template;
use axum::{http::StatusCode, response::Html};
use mealplanner_core::domain::{
    common::entities::app_errors::CoreError,
    meal_plan::{
        entities::GeneratedMealPlan,
        prompt::profile_lines,
        value_objects::{Complexity, UserPreferences},
    },
};

use crate::application::http::{
    server::api_entities::api_error::ApiError, web::validators::PlanForm,
};

pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub struct ProfileLine {
    pub label: String,
    pub value: String,
}

pub struct MealView {
    pub label: String,
    pub name: String,
    pub recipe_lines: Vec<String>,
}

pub struct DayView {
    pub label: String,
    pub meals: Vec<MealView>,
}

pub struct PlanView {
    pub attempts: u8,
    pub days: Vec<DayView>,
}

impl From<&GeneratedMealPlan> for PlanView {
    fn from(generated: &GeneratedMealPlan) -> Self {
        let days = generated
            .plan
            .days()
            .map(|(weekday, day)| DayView {
                label: weekday.label().to_string(),
                meals: day
                    .meals()
                    .map(|(kind, slot)| MealView {
                        label: kind.label().to_string(),
                        name: slot.meal_name().to_string(),
                        recipe_lines: slot
                            .recipe()
                            .lines()
                            .map(str::trim)
                            .filter(|line| !line.is_empty())
                            .map(str::to_string)
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            attempts: generated.attempts,
            days,
        }
    }
}

pub struct FailureView {
    pub title: String,
    pub message: String,
    pub issues: Vec<String>,
}

impl FailureView {
    pub fn status(error: &CoreError) -> StatusCode {
        match error {
            CoreError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            CoreError::InvalidMealPlan(_) | CoreError::Invalid(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CoreError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for FailureView {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::ExternalServiceError(detail) => FailureView {
                title: "The meal planning service could not be reached".to_string(),
                message: format!(
                    "The AI provider returned an error, so no plan was generated. Check that your API key is valid and try again. ({detail})"
                ),
                issues: Vec::new(),
            },
            CoreError::InvalidMealPlan(validation) => FailureView {
                title: "The AI returned a plan in an unexpected format".to_string(),
                message: "Please try generating the plan again. These parts of the answer were missing or malformed:".to_string(),
                issues: validation
                    .issues()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            },
            CoreError::Invalid(message) | CoreError::Configuration(message) => FailureView {
                title: "Something went wrong while generating the meal plan".to_string(),
                message,
                issues: Vec::new(),
            },
        }
    }
}

#[derive(Template)]
#[template(path = "planner.html")]
pub struct PlannerPage {
    pub root_path: String,
    pub provider: String,
    pub form: PlanForm,
    pub complexity_options: Vec<SelectOption>,
    pub warning: Option<String>,
    pub profile: Vec<ProfileLine>,
    pub failure: Option<FailureView>,
    pub plan: Option<PlanView>,
}

impl PlannerPage {
    pub fn new(root_path: String, provider: String, form: PlanForm) -> Self {
        let selected = form.complexity.trim().to_ascii_lowercase();
        let mut complexity_options = vec![SelectOption {
            value: "any".to_string(),
            label: "Any".to_string(),
            selected: selected.is_empty() || selected == "any",
        }];
        complexity_options.extend(Complexity::ALL.iter().map(|complexity| SelectOption {
            value: complexity.as_str().to_string(),
            label: complexity.label().to_string(),
            selected: selected == complexity.as_str(),
        }));

        Self {
            root_path,
            provider,
            form,
            complexity_options,
            warning: None,
            profile: Vec::new(),
            failure: None,
            plan: None,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    /// Shows the normalized preferences the plan is generated from.
    pub fn with_profile(mut self, preferences: &UserPreferences) -> Self {
        self.profile = profile_lines(preferences)
            .into_iter()
            .map(|(label, value)| ProfileLine {
                label: label.to_string(),
                value,
            })
            .collect();
        self
    }

    pub fn with_failure(mut self, failure: FailureView) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn with_plan(mut self, plan: PlanView) -> Self {
        self.plan = Some(plan);
        self
    }

    pub fn into_html(self) -> Result<Html<String>, ApiError> {
        self.render().map(Html).map_err(|e| {
            tracing::error!("Failed to render planner page: {}", e);
            ApiError::InternalServerError(format!("Failed to render page: {}", e))
        })
    }
}
