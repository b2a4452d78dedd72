use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::domain::meal_plan::{
    entities::{DayPlan, MealKind, MealSlot, WeekPlan, Weekday},
    errors::{FieldIssue, IssueKind, PlanValidationError},
};

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```").expect("fence pattern is valid")
});

/// Decodes the JSON payload in raw model output.
///
/// A reply that is already a JSON document is used as is. Otherwise the body
/// of a markdown code fence is tried, then the first balanced object that
/// decodes, searching the fence body before the whole reply. Prose before or
/// after the payload is skipped.
pub fn extract_json_payload(raw: &str) -> Result<Value, serde_json::Error> {
    let trimmed = raw.trim();
    let direct = serde_json::from_str::<Value>(trimmed);
    if direct.is_ok() {
        return direct;
    }

    let fenced = FENCED_BLOCK
        .captures(trimmed)
        .and_then(|captures| captures.get(1))
        .map(|block| block.as_str().trim());

    if let Some(body) = fenced {
        if let Ok(value) = serde_json::from_str::<Value>(body) {
            return Ok(value);
        }
        if let Some(value) = first_decodable_object(body) {
            return Ok(value);
        }
    }

    if let Some(value) = first_decodable_object(trimmed) {
        return Ok(value);
    }

    match fenced {
        Some(body) => serde_json::from_str(body),
        None => direct,
    }
}

/// Walks the `{` positions of `text` and decodes the first balanced object that is valid JSON.
fn first_decodable_object(text: &str) -> Option<Value> {
    let mut from = 0;

    while let Some(found) = text[from..].find('{') {
        let start = from + found;
        // an unclosed object runs to the end of the text
        let candidate = balanced_object(&text[start..])?;
        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
            return Some(value);
        }
        from = start + candidate.len();
    }

    None
}

/// Returns the object opening at the start of `text`, up to its matching brace.
fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parses raw model output and validates it as a [`WeekPlan`].
///
/// Unknown keys are ignored. Every missing, mistyped or empty field is
/// reported, not only the first one.
pub fn parse_week_plan(raw: &str) -> Result<WeekPlan, PlanValidationError> {
    let value = extract_json_payload(raw).map_err(|e| {
        tracing::debug!("Meal plan payload is not valid JSON: {}", e);
        PlanValidationError::malformed(e.to_string())
    })?;

    validate_week_plan(&value)
}

/// Validates an already-parsed JSON document as a [`WeekPlan`].
pub fn validate_week_plan(value: &Value) -> Result<WeekPlan, PlanValidationError> {
    let root = value.as_object().ok_or_else(|| {
        PlanValidationError::new(vec![FieldIssue::new("$", wrong_type("an object"))])
    })?;

    let mut issues = Vec::new();
    let days: Vec<Option<DayPlan>> = Weekday::ALL
        .iter()
        .map(|weekday| read_day(root, weekday.as_str(), &mut issues))
        .collect();

    if !issues.is_empty() {
        return Err(PlanValidationError::new(issues));
    }

    let days: Vec<DayPlan> = days.into_iter().flatten().collect();
    let days: [DayPlan; 7] = days
        .try_into()
        .map_err(|_| PlanValidationError::new(vec![FieldIssue::new("$", IssueKind::Missing)]))?;

    Ok(WeekPlan::new(days))
}

fn read_day(root: &Map<String, Value>, key: &str, issues: &mut Vec<FieldIssue>) -> Option<DayPlan> {
    let day = require_object(root, key, key, issues)?;

    let breakfast = read_slot(day, key, MealKind::Breakfast, issues);
    let lunch = read_slot(day, key, MealKind::Lunch, issues);
    let dinner = read_slot(day, key, MealKind::Dinner, issues);

    let snacks_key = MealKind::Snacks.as_str();
    let snacks = match day.get(snacks_key) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => read_slot(day, key, MealKind::Snacks, issues)
            .map(Some)
            .ok_or(()),
    };

    let plan = DayPlan::new(breakfast?, lunch?, dinner?);
    match snacks {
        Ok(Some(snacks)) => Some(plan.with_snacks(snacks)),
        Ok(None) => Some(plan),
        Err(()) => None,
    }
}

fn read_slot(
    day: &Map<String, Value>,
    day_path: &str,
    kind: MealKind,
    issues: &mut Vec<FieldIssue>,
) -> Option<MealSlot> {
    let path = format!("{day_path}.{kind}");
    let slot = require_object(day, kind.as_str(), &path, issues)?;

    let meal_name = read_text(slot, &path, "meal_name", issues);
    let recipe = read_text(slot, &path, "recipe", issues);

    Some(MealSlot::from_validated(meal_name?, recipe?))
}

fn read_text(
    slot: &Map<String, Value>,
    slot_path: &str,
    key: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    let path = format!("{slot_path}.{key}");
    match slot.get(key) {
        None | Some(Value::Null) => {
            issues.push(FieldIssue::new(path, IssueKind::Missing));
            None
        }
        Some(Value::String(text)) if text.trim().is_empty() => {
            issues.push(FieldIssue::new(path, IssueKind::Empty));
            None
        }
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            issues.push(FieldIssue::new(path, wrong_type("a string")));
            None
        }
    }
}

fn require_object<'a>(
    parent: &'a Map<String, Value>,
    key: &str,
    path: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<&'a Map<String, Value>> {
    match parent.get(key) {
        None | Some(Value::Null) => {
            issues.push(FieldIssue::new(path, IssueKind::Missing));
            None
        }
        Some(Value::Object(object)) => Some(object),
        Some(_) => {
            issues.push(FieldIssue::new(path, wrong_type("an object")));
            None
        }
    }
}

fn wrong_type(expected: &str) -> IssueKind {
    IssueKind::WrongType {
        expected: expected.to_string(),
    }
}
