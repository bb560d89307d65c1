//! Task Repository Access
//!
//! The engine depends only on the async `TaskRepository` capability. Query
//! translation for a concrete store lives in its adapter; `JsonTaskRepository`
//! is the bundled adapter, serving a task calendar loaded from a JSON file.

use crate::error::{GuideError, Result};
use crate::models::{SeasonalTask, SeasonalTaskFilter};
use async_trait::async_trait;
use std::path::Path;

/// Source of seasonal tasks
///
/// Implementations return tasks ordered by month ascending, then priority
/// descending. Store failures are reported as `GuideError::Repository`.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn fetch(&self, filter: Option<&SeasonalTaskFilter>) -> Result<Vec<SeasonalTask>>;
}

/// Check a task against every constraint a filter sets
///
/// Scalar fields are equality constraints. `plant_types` matches when any
/// of the task's tags is in the requested set.
pub fn matches_filter(task: &SeasonalTask, filter: &SeasonalTaskFilter) -> bool {
    if let Some(month) = filter.month {
        if task.month != month {
            return false;
        }
    }
    if let Some(priority) = filter.priority {
        if task.priority != priority {
            return false;
        }
    }
    if let Some(category) = filter.category {
        if task.category != category {
            return false;
        }
    }
    if let Some(ref zone) = filter.climate_zone {
        if task.climate_zone.as_deref() != Some(zone.as_str()) {
            return false;
        }
    }
    if let Some(ref wanted) = filter.plant_types {
        let hit = task
            .plant_types
            .as_ref()
            .map(|types| types.iter().any(|t| wanted.contains(t)))
            .unwrap_or(false);
        if !hit {
            return false;
        }
    }
    true
}

/// Month ascending, then priority descending
pub fn order_tasks(tasks: &mut [SeasonalTask]) {
    tasks.sort_by(|a, b| {
        a.month
            .cmp(&b.month)
            .then_with(|| b.priority.rank().cmp(&a.priority.rank()))
    });
}

/// In-memory task store backed by a JSON task list
#[derive(Debug, Clone, Default)]
pub struct JsonTaskRepository {
    tasks: Vec<SeasonalTask>,
}

impl JsonTaskRepository {
    pub fn from_tasks(tasks: Vec<SeasonalTask>) -> Self {
        Self { tasks }
    }

    /// Load a JSON array of tasks
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| GuideError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let tasks: Vec<SeasonalTask> =
            serde_json::from_str(&raw).map_err(|source| GuideError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!("Loaded {} seasonal tasks from {}", tasks.len(), path.display());
        Ok(Self { tasks })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[async_trait]
impl TaskRepository for JsonTaskRepository {
    async fn fetch(&self, filter: Option<&SeasonalTaskFilter>) -> Result<Vec<SeasonalTask>> {
        let mut tasks: Vec<SeasonalTask> = match filter {
            Some(filter) => self
                .tasks
                .iter()
                .filter(|t| matches_filter(t, filter))
                .cloned()
                .collect(),
            None => self.tasks.clone(),
        };
        order_tasks(&mut tasks);
        tracing::debug!("Task store returned {} rows for {:?}", tasks.len(), filter);
        Ok(tasks)
    }
}
