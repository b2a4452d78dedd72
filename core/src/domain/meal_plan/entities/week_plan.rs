use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::meal_plan::errors::{FieldIssue, IssueKind, PlanValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Key used in the JSON payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealKind {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealKind {
    /// Slots every day must provide.
    pub const REQUIRED: [MealKind; 3] = [MealKind::Breakfast, MealKind::Lunch, MealKind::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealKind::Breakfast => "breakfast",
            MealKind::Lunch => "lunch",
            MealKind::Dinner => "dinner",
            MealKind::Snacks => "snacks",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MealKind::Breakfast => "Breakfast",
            MealKind::Lunch => "Lunch",
            MealKind::Dinner => "Dinner",
            MealKind::Snacks => "Snacks",
        }
    }
}

impl fmt::Display for MealKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single meal: its name and free-text recipe. Both are guaranteed non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MealSlot {
    meal_name: String,
    recipe: String,
}

impl MealSlot {
    pub fn new(
        meal_name: impl Into<String>,
        recipe: impl Into<String>,
    ) -> Result<Self, PlanValidationError> {
        let meal_name = meal_name.into();
        let recipe = recipe.into();

        let mut issues = Vec::new();
        if meal_name.trim().is_empty() {
            issues.push(FieldIssue::new("meal_name", IssueKind::Empty));
        }
        if recipe.trim().is_empty() {
            issues.push(FieldIssue::new("recipe", IssueKind::Empty));
        }
        if !issues.is_empty() {
            return Err(PlanValidationError::new(issues));
        }

        Ok(Self { meal_name, recipe })
    }

    /// Caller has already checked both strings.
    pub(crate) fn from_validated(meal_name: String, recipe: String) -> Self {
        Self { meal_name, recipe }
    }

    pub fn meal_name(&self) -> &str {
        &self.meal_name
    }

    pub fn recipe(&self) -> &str {
        &self.recipe
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DayPlan {
    breakfast: MealSlot,
    lunch: MealSlot,
    dinner: MealSlot,
    #[serde(skip_serializing_if = "Option::is_none")]
    snacks: Option<MealSlot>,
}

impl DayPlan {
    pub fn new(breakfast: MealSlot, lunch: MealSlot, dinner: MealSlot) -> Self {
        Self {
            breakfast,
            lunch,
            dinner,
            snacks: None,
        }
    }

    pub fn with_snacks(mut self, snacks: MealSlot) -> Self {
        self.snacks = Some(snacks);
        self
    }

    pub fn breakfast(&self) -> &MealSlot {
        &self.breakfast
    }

    pub fn lunch(&self) -> &MealSlot {
        &self.lunch
    }

    pub fn dinner(&self) -> &MealSlot {
        &self.dinner
    }

    pub fn snacks(&self) -> Option<&MealSlot> {
        self.snacks.as_ref()
    }

    pub fn meal(&self, kind: MealKind) -> Option<&MealSlot> {
        match kind {
            MealKind::Breakfast => Some(&self.breakfast),
            MealKind::Lunch => Some(&self.lunch),
            MealKind::Dinner => Some(&self.dinner),
            MealKind::Snacks => self.snacks.as_ref(),
        }
    }

    /// Meals in serving order, snacks last when present.
    pub fn meals(&self) -> impl Iterator<Item = (MealKind, &MealSlot)> {
        [
            MealKind::Breakfast,
            MealKind::Lunch,
            MealKind::Dinner,
            MealKind::Snacks,
        ]
        .into_iter()
        .filter_map(|kind| self.meal(kind).map(|slot| (kind, slot)))
    }
}

/// A validated seven-day meal plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WeekPlan {
    monday: DayPlan,
    tuesday: DayPlan,
    wednesday: DayPlan,
    thursday: DayPlan,
    friday: DayPlan,
    saturday: DayPlan,
    sunday: DayPlan,
}

impl WeekPlan {
    /// Builds a plan from days given in calendar order, Monday first.
    pub fn new(days: [DayPlan; 7]) -> Self {
        let [monday, tuesday, wednesday, thursday, friday, saturday, sunday] = days;
        Self {
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
            sunday,
        }
    }

    pub fn day(&self, weekday: Weekday) -> &DayPlan {
        match weekday {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn days(&self) -> impl Iterator<Item = (Weekday, &DayPlan)> {
        Weekday::ALL.into_iter().map(|weekday| (weekday, self.day(weekday)))
    }
}
