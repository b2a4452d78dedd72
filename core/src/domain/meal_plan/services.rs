use tracing::{debug, error, info, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    meal_plan::{
        entities::{GeneratedMealPlan, WeekPlan},
        parser::parse_week_plan,
        ports::{CompletionRequest, MealPlanService, TextCompleter},
        prompt::{SYSTEM_INSTRUCTION, build_correction_prompt, build_meal_plan_prompt},
        value_objects::GenerateMealPlanInput,
    },
};

impl<TC> Service<TC>
where
    TC: TextCompleter,
{
    async fn request_completion(&self, prompt: String) -> Result<String, CoreError> {
        debug!(prompt = %prompt, "Sending prompt to LLM");

        let raw_response = self
            .text_completer
            .complete(CompletionRequest {
                system: SYSTEM_INSTRUCTION.to_string(),
                prompt,
            })
            .await
            .inspect_err(|e| error!("LLM completion failed: {}", e))?;

        debug!(raw_response = %raw_response, "Received raw LLM output");
        Ok(raw_response)
    }

    fn accept(&self, plan: WeekPlan, attempts: u8, raw_response: String) -> GeneratedMealPlan {
        info!(attempts, "Meal plan parsed and validated");
        GeneratedMealPlan::new(
            plan,
            self.text_completer.provider(),
            self.text_completer.model().to_string(),
            attempts,
            raw_response,
        )
    }
}

impl<TC> MealPlanService for Service<TC>
where
    TC: TextCompleter,
{
    async fn generate_meal_plan(
        &self,
        input: GenerateMealPlanInput,
    ) -> Result<GeneratedMealPlan, CoreError> {
        // 1. Build prompt
        let preferences = input.preferences.normalized();
        let prompt = build_meal_plan_prompt(&preferences);

        // 2. Call LLM
        let raw_response = self.request_completion(prompt.clone()).await?;

        // 3. Parse and validate response
        let validation_error = match parse_week_plan(&raw_response) {
            Ok(plan) => return Ok(self.accept(plan, 1, raw_response)),
            Err(e) => e,
        };

        if !self.generation.correct_invalid_output {
            warn!("LLM output failed validation: {}", validation_error);
            return Err(CoreError::InvalidMealPlan(validation_error));
        }

        // 4. Ask once for a corrected answer
        warn!(
            issues = validation_error.issues().len(),
            "LLM output failed validation, re-prompting once: {}", validation_error
        );
        let correction = build_correction_prompt(&prompt, &raw_response, &validation_error);
        let corrected_response = self.request_completion(correction).await?;

        match parse_week_plan(&corrected_response) {
            Ok(plan) => Ok(self.accept(plan, 2, corrected_response)),
            Err(e) => {
                error!("Corrected LLM output still failed validation: {}", e);
                Err(CoreError::InvalidMealPlan(e))
            }
        }
    }

    fn validate_meal_plan(&self, raw: &str) -> Result<WeekPlan, CoreError> {
        parse_week_plan(raw).map_err(CoreError::InvalidMealPlan)
    }

    fn provider_description(&self) -> String {
        format!(
            "{} ({})",
            self.text_completer.provider(),
            self.text_completer.model()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};
    use std::sync::Mutex;

    use serde_json::{Map, Value, json};

    use super::*;
    use crate::domain::{
        common::{GenerationConfig, LlmProvider},
        meal_plan::{entities::Weekday, value_objects::UserPreferences},
    };

    /// Replays canned answers and records every request it receives.
    struct ScriptedCompleter {
        answers: Mutex<VecDeque<Result<String, CoreError>>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedCompleter {
        fn new(answers: Vec<Result<String, CoreError>>) -> Self {
            Self {
                answers: Mutex::new(answers.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl TextCompleter for ScriptedCompleter {
        async fn complete(&self, request: CompletionRequest) -> Result<String, CoreError> {
            self.requests.lock().unwrap().push(request);
            self.answers
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(CoreError::ExternalServiceError("no answer left".into())))
        }

        fn provider(&self) -> LlmProvider {
            LlmProvider::OpenAI
        }

        fn model(&self) -> &str {
            "gpt-test"
        }
    }

    fn valid_plan() -> String {
        let mut root = Map::new();
        for weekday in Weekday::ALL {
            root.insert(
                weekday.as_str().to_string(),
                json!({
                    "breakfast": { "meal_name": "Porridge", "recipe": "Cook oats." },
                    "lunch": { "meal_name": "Soup", "recipe": "Simmer vegetables." },
                    "dinner": { "meal_name": "Stir fry", "recipe": "Fry tofu and greens." }
                }),
            );
        }
        Value::Object(root).to_string()
    }

    fn service(answers: Vec<Result<String, CoreError>>, correct: bool) -> Service<ScriptedCompleter> {
        Service::new(
            ScriptedCompleter::new(answers),
            GenerationConfig {
                correct_invalid_output: correct,
            },
        )
    }

    fn input() -> GenerateMealPlanInput {
        GenerateMealPlanInput {
            preferences: UserPreferences {
                goal: Some("weight loss".to_string()),
                dietary_restrictions: BTreeSet::from(["vegetarian".to_string()]),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_valid_first_answer() {
        let service = service(vec![Ok(format!("```json\n{}\n```", valid_plan()))], true);

        let generated = service.generate_meal_plan(input()).await.unwrap();

        assert_eq!(generated.attempts, 1);
        assert_eq!(generated.provider, LlmProvider::OpenAI);
        assert_eq!(generated.model, "gpt-test");
        assert_eq!(
            generated.plan.day(Weekday::Friday).dinner().meal_name(),
            "Stir fry"
        );

        let requests = service.text_completer.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system, SYSTEM_INSTRUCTION);
        assert!(requests[0].prompt.contains("weight loss"));
        assert!(requests[0].prompt.contains("vegetarian"));
    }

    #[tokio::test]
    async fn test_invalid_answer_is_corrected_once() {
        let service = service(
            vec![Ok("{\"monday\": {}}".to_string()), Ok(valid_plan())],
            true,
        );

        let generated = service.generate_meal_plan(input()).await.unwrap();

        assert_eq!(generated.attempts, 2);
        let requests = service.text_completer.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].prompt.starts_with(&requests[0].prompt));
        assert!(requests[1].prompt.contains("- sunday is missing"));
        assert!(requests[1].prompt.contains("- monday.breakfast is missing"));
    }

    #[tokio::test]
    async fn test_still_invalid_after_correction() {
        let service = service(
            vec![Ok("not json".to_string()), Ok("{\"monday\": 1}".to_string())],
            true,
        );

        let err = service.generate_meal_plan(input()).await.unwrap_err();

        match err {
            CoreError::InvalidMealPlan(validation) => {
                assert!(validation.mentions("monday"));
                assert!(validation.mentions("tuesday"));
            }
            other => panic!("expected invalid meal plan, got {other:?}"),
        }
        assert_eq!(service.text_completer.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_correction_disabled_surfaces_first_error() {
        let service = service(vec![Ok("{}".to_string()), Ok(valid_plan())], false);

        let err = service.generate_meal_plan(input()).await.unwrap_err();

        assert!(matches!(err, CoreError::InvalidMealPlan(_)));
        assert_eq!(service.text_completer.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_provider_error_is_not_retried() {
        let service = service(
            vec![
                Err(CoreError::ExternalServiceError("401 Unauthorized".into())),
                Ok(valid_plan()),
            ],
            true,
        );

        let err = service.generate_meal_plan(input()).await.unwrap_err();

        assert!(matches!(err, CoreError::ExternalServiceError(_)));
        assert_eq!(service.text_completer.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_provider_error_during_correction() {
        let service = service(
            vec![
                Ok("{}".to_string()),
                Err(CoreError::ExternalServiceError("rate limited".into())),
            ],
            true,
        );

        let err = service.generate_meal_plan(input()).await.unwrap_err();

        assert!(matches!(err, CoreError::ExternalServiceError(_)));
    }

    #[test]
    fn test_validate_meal_plan_and_description() {
        let service = service(vec![], true);

        assert!(service.validate_meal_plan(&valid_plan()).is_ok());
        assert!(matches!(
            service.validate_meal_plan("{}"),
            Err(CoreError::InvalidMealPlan(_))
        ));
        assert_eq!(service.provider_description(), "openai (gpt-test)");
    }
}
