use std::future::Future;

use crate::domain::{
    common::{LlmProvider, entities::app_errors::CoreError},
    meal_plan::{
        entities::{GeneratedMealPlan, WeekPlan},
        value_objects::GenerateMealPlanInput,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
}

/// Text-completion capability of an LLM vendor.
///
/// Implementations own their credentials and model name. Transport failures,
/// authentication errors and unusable response envelopes are reported as
/// [`CoreError::ExternalServiceError`].
pub trait TextCompleter: Send + Sync {
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn provider(&self) -> LlmProvider;

    fn model(&self) -> &str;
}

/// Service trait for meal plan generation
pub trait MealPlanService: Send + Sync {
    fn generate_meal_plan(
        &self,
        input: GenerateMealPlanInput,
    ) -> impl Future<Output = Result<GeneratedMealPlan, CoreError>> + Send;

    fn validate_meal_plan(&self, raw: &str) -> Result<WeekPlan, CoreError>;

    /// Human-readable provider and model, e.g. `openai (gpt-3.5-turbo)`.
    fn provider_description(&self) -> String;
}
