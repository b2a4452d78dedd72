use serde_json::{Map, Value, json};

use crate::domain::meal_plan::entities::{MealKind, Weekday};

fn meal_slot_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "meal_name": { "type": "string", "minLength": 1 },
            "recipe": { "type": "string", "minLength": 1 }
        },
        "required": ["meal_name", "recipe"]
    })
}

fn day_plan_schema() -> Value {
    let mut properties = Map::new();
    for kind in MealKind::REQUIRED {
        properties.insert(kind.as_str().to_string(), meal_slot_schema());
    }
    properties.insert(MealKind::Snacks.as_str().to_string(), meal_slot_schema());

    json!({
        "type": "object",
        "properties": properties,
        "required": MealKind::REQUIRED.map(|kind| kind.as_str())
    })
}

/// Returns the JSON schema for week plan LLM responses
pub fn meal_plan_json_schema() -> Value {
    let mut properties = Map::new();
    for weekday in Weekday::ALL {
        properties.insert(weekday.as_str().to_string(), day_plan_schema());
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": Weekday::ALL.map(|weekday| weekday.as_str())
    })
}
