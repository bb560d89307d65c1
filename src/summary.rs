//! Monthly Summary Aggregator

use crate::models::{Category, MonthlyTaskSummary, Priority, SeasonalTask};
use std::collections::BTreeMap;

/// Count tasks for a month by priority and category
///
/// All four categories are always present. `completed_tasks` is 0 because
/// per-user progress is not tracked.
pub fn summarize(month: u32, tasks: &[SeasonalTask]) -> MonthlyTaskSummary {
    let mut tasks_by_category: BTreeMap<Category, usize> =
        Category::all().iter().map(|c| (*c, 0)).collect();

    for task in tasks {
        *tasks_by_category.entry(task.category).or_insert(0) += 1;
    }

    MonthlyTaskSummary {
        month,
        total_tasks: tasks.len(),
        completed_tasks: 0,
        high_priority_tasks: tasks.iter().filter(|t| t.priority == Priority::High).count(),
        tasks_by_category,
    }
}
