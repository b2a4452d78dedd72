use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::{LlmProvider, generate_timestamp};
use crate::domain::meal_plan::entities::WeekPlan;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GeneratedMealPlan {
    pub id: Uuid,
    pub plan: WeekPlan,
    pub provider: LlmProvider,
    pub model: String,
    /// Provider calls made, 2 when a corrective re-prompt was needed.
    pub attempts: u8,
    pub raw_response: String,
    pub created_at: DateTime<Utc>,
}

impl GeneratedMealPlan {
    pub fn new(
        plan: WeekPlan,
        provider: LlmProvider,
        model: String,
        attempts: u8,
        raw_response: String,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            plan,
            provider,
            model,
            attempts,
            raw_response,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::meal_plan::entities::{DayPlan, MealSlot};

    fn plan() -> WeekPlan {
        let slot = |name: &str| MealSlot::new(name, "Cook it.").unwrap();
        let day = || DayPlan::new(slot("Oats"), slot("Soup"), slot("Stew"));
        WeekPlan::new([day(), day(), day(), day(), day(), day(), day()])
    }

    #[test]
    fn test_generated_plan_gets_time_ordered_id() {
        let generated = GeneratedMealPlan::new(
            plan(),
            LlmProvider::OpenAI,
            "gpt-test".to_string(),
            1,
            "{}".to_string(),
        );

        assert_eq!(generated.id.get_version_num(), 7);
        assert_eq!(generated.provider, LlmProvider::OpenAI);
        assert!(generated.created_at <= Utc::now());
    }
}
