//! Seasonal task data model
//!
//! Tasks are read-only copies of records owned by the external task store.
//! Contexts, recommendations and summaries are derived per request and
//! never persisted.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Wildcard plant-type tag: the task applies to every plant
pub const ALL_PLANTS: &str = "all";

/// Task priority (high > medium > low)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Ordering weight, higher is more important
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Parse a lowercase tag ("high", "medium", "low")
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of gardening work a task describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Planting,
    Maintenance,
    Harvesting,
    Preparation,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Planting,
            Category::Maintenance,
            Category::Harvesting,
            Category::Preparation,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Planting => "planting",
            Category::Maintenance => "maintenance",
            Category::Harvesting => "harvesting",
            Category::Preparation => "preparation",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "planting" => Some(Category::Planting),
            "maintenance" => Some(Category::Maintenance),
            "harvesting" => Some(Category::Harvesting),
            "preparation" => Some(Category::Preparation),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of seasonal gardening guidance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Calendar month, 1-12
    pub month: u32,
    pub priority: Priority,
    pub category: Category,
    #[serde(default)]
    pub climate_zone: Option<String>,
    /// Plant-type tags; `None`, empty, or containing "all" means universal
    #[serde(default)]
    pub plant_types: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl SeasonalTask {
    /// True when the task carries no plant-type restriction
    pub fn is_universal(&self) -> bool {
        match &self.plant_types {
            None => true,
            Some(types) => types.is_empty() || types.iter().any(|t| t == ALL_PLANTS),
        }
    }

    /// True when the task is universal or shares a plant type with `plants`
    pub fn applies_to(&self, plants: &[String]) -> bool {
        if self.is_universal() {
            return true;
        }
        self.plant_types
            .as_ref()
            .map(|types| types.iter().any(|t| plants.contains(t)))
            .unwrap_or(false)
    }
}

/// Query descriptor for the task store
///
/// Every field is optional; an empty filter selects all tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalTaskFilter {
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub plant_types: Option<Vec<String>>,
    #[serde(default)]
    pub climate_zone: Option<String>,
}

impl SeasonalTaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_plant_types<I, S>(mut self, plant_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plant_types = Some(plant_types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_climate_zone(mut self, zone: impl Into<String>) -> Self {
        self.climate_zone = Some(zone.into());
        self
    }

    /// True when no field constrains the query
    pub fn is_empty(&self) -> bool {
        self.month.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.plant_types.is_none()
            && self.climate_zone.is_none()
    }
}

/// Optional user preferences that bias scoring
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Categories the user wants to see more of
    #[serde(default)]
    pub focus_categories: Option<Vec<Category>>,
    /// Drop low-priority tasks entirely
    #[serde(default)]
    pub skip_low_priority: bool,
}

/// Per-request input for recommendations and the monthly guide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationContext {
    /// Plant-type tags the user owns
    #[serde(default)]
    pub user_plants: Vec<String>,
    /// Calendar month, 1-12
    pub current_month: u32,
    pub climate_zone: String,
    #[serde(default)]
    pub user_preferences: Option<UserPreferences>,
}

impl RecommendationContext {
    pub fn new<I, S>(user_plants: I, current_month: u32, climate_zone: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_plants: user_plants.into_iter().map(Into::into).collect(),
            current_month,
            climate_zone: climate_zone.into(),
            user_preferences: None,
        }
    }

    /// Build a context for the month `now` falls in
    pub fn at<I, S>(user_plants: I, now: DateTime<Utc>, climate_zone: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(user_plants, now.month(), climate_zone)
    }

    pub fn with_preferences(mut self, preferences: UserPreferences) -> Self {
        self.user_preferences = Some(preferences);
        self
    }
}

/// How soon a recommended task should be acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Immediate,
    ThisWeek,
    ThisMonth,
}

impl Urgency {
    /// Sort weight: immediate=3, this_week=2, this_month=1
    pub fn rank(&self) -> u8 {
        match self {
            Urgency::Immediate => 3,
            Urgency::ThisWeek => 2,
            Urgency::ThisMonth => 1,
        }
    }
}

/// A scored task for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecommendation {
    pub task: SeasonalTask,
    pub relevance_score: i32,
    pub user_plant_match: bool,
    pub urgency: Urgency,
}

/// Per-month task statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTaskSummary {
    pub month: u32,
    pub total_tasks: usize,
    /// Always 0: per-user progress tracking is not implemented
    pub completed_tasks: usize,
    pub high_priority_tasks: usize,
    pub tasks_by_category: BTreeMap<Category, usize>,
}

/// Tasks and tips for the month a user is in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentMonthGuide {
    pub current_month: Vec<SeasonalTask>,
    pub upcoming_tasks: Vec<SeasonalTask>,
    pub seasonal_tips: Vec<String>,
}
