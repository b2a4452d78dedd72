use crate::{
    domain::common::{MealPlannerConfig, entities::app_errors::CoreError, services::Service},
    domain::meal_plan::ports::TextCompleter,
    infrastructure::llm::LlmClient,
};

pub type MealPlannerService = Service<LlmClient>;

/// Wires the service from configuration. Fails when the selected provider has no credential.
pub fn create_service(config: MealPlannerConfig) -> Result<MealPlannerService, CoreError> {
    let llm_client = LlmClient::from_config(&config.llm)?;

    tracing::info!(
        provider = %llm_client.provider(),
        model = llm_client.model(),
        "Initialized LLM client"
    );

    Ok(Service::new(llm_client, config.generation))
}
