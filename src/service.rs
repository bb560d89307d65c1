//! Seasonal Task Service - public entry point for the presentation layer
//!
//! Every query goes through the shared `TaskCache`. Once the tasks are in
//! memory, filtering, scoring, ranking, summaries and tips are synchronous.
//! Repository failures are returned to the caller as they are.

use crate::cache::TaskCache;
use crate::error::Result;
use crate::filters::{filter_by_plant_types, search_tasks};
use crate::models::{
    Category, CurrentMonthGuide, MonthlyTaskSummary, Priority, RecommendationContext,
    SeasonalTask, SeasonalTaskFilter, TaskRecommendation,
};
use crate::ranker::rank_recommendations;
use crate::repository::TaskRepository;
use crate::summary::summarize;
use crate::tips::seasonal_tips;
use std::sync::Arc;

/// Longest upcoming-task list in the monthly guide
pub const MAX_UPCOMING_TASKS: usize = 5;

/// Month after `month`, wrapping December to January
pub fn next_month(month: u32) -> u32 {
    month % 12 + 1
}

#[derive(Clone)]
pub struct SeasonalTaskService {
    repository: Arc<dyn TaskRepository>,
    cache: Arc<TaskCache>,
}

impl SeasonalTaskService {
    pub fn new(repository: Arc<dyn TaskRepository>, cache: Arc<TaskCache>) -> Self {
        Self { repository, cache }
    }

    pub fn cache(&self) -> &TaskCache {
        &self.cache
    }

    async fn fetch(&self, filter: Option<&SeasonalTaskFilter>) -> Result<Arc<Vec<SeasonalTask>>> {
        self.cache.get_or_fetch(filter, self.repository.as_ref()).await
    }

    /// Tasks matching `filter`, or every task when `None`
    pub async fn get_seasonal_tasks(
        &self,
        filter: Option<&SeasonalTaskFilter>,
    ) -> Result<Vec<SeasonalTask>> {
        Ok(self.fetch(filter).await?.as_ref().clone())
    }

    /// This month's tasks, next month's first few, and seasonal tips
    pub async fn get_current_month_guide(
        &self,
        context: &RecommendationContext,
    ) -> Result<CurrentMonthGuide> {
        let current_filter = SeasonalTaskFilter::new()
            .with_month(context.current_month)
            .with_climate_zone(context.climate_zone.clone());
        let upcoming_filter = SeasonalTaskFilter::new()
            .with_month(next_month(context.current_month))
            .with_climate_zone(context.climate_zone.clone());

        let current = self.fetch(Some(&current_filter)).await?;
        let upcoming = self.fetch(Some(&upcoming_filter)).await?;

        let current_month = filter_by_plant_types(&current, &context.user_plants);
        let mut upcoming_tasks = filter_by_plant_types(&upcoming, &context.user_plants);
        upcoming_tasks.truncate(MAX_UPCOMING_TASKS);

        tracing::debug!(
            "Guide for month {} ({}): {} current, {} upcoming",
            context.current_month,
            context.climate_zone,
            current_month.len(),
            upcoming_tasks.len()
        );

        Ok(CurrentMonthGuide {
            current_month,
            upcoming_tasks,
            seasonal_tips: seasonal_tips(context.current_month, &context.user_plants),
        })
    }

    /// Up to ten tasks for the user's climate zone, most urgent first
    pub async fn get_task_recommendations(
        &self,
        context: &RecommendationContext,
    ) -> Result<Vec<TaskRecommendation>> {
        let filter = SeasonalTaskFilter::new().with_climate_zone(context.climate_zone.clone());
        let tasks = self.fetch(Some(&filter)).await?;
        let ranked = rank_recommendations(&tasks, context);
        tracing::debug!(
            "Ranked {} of {} tasks for month {} ({})",
            ranked.len(),
            tasks.len(),
            context.current_month,
            context.climate_zone
        );
        Ok(ranked)
    }

    pub async fn get_monthly_task_summary(
        &self,
        month: u32,
        climate_zone: &str,
    ) -> Result<MonthlyTaskSummary> {
        let filter = SeasonalTaskFilter::new()
            .with_month(month)
            .with_climate_zone(climate_zone);
        let tasks = self.fetch(Some(&filter)).await?;
        Ok(summarize(month, &tasks))
    }

    /// Case-insensitive search of title and description within `filter`
    pub async fn search_tasks(
        &self,
        query: &str,
        filter: Option<&SeasonalTaskFilter>,
    ) -> Result<Vec<SeasonalTask>> {
        let tasks = self.fetch(filter).await?;
        Ok(search_tasks(&tasks, query))
    }

    pub async fn get_tasks_by_priority(
        &self,
        priority: Priority,
        month: Option<u32>,
    ) -> Result<Vec<SeasonalTask>> {
        let mut filter = SeasonalTaskFilter::new().with_priority(priority);
        filter.month = month;
        self.get_seasonal_tasks(Some(&filter)).await
    }

    pub async fn get_tasks_by_category(
        &self,
        category: Category,
        month: Option<u32>,
    ) -> Result<Vec<SeasonalTask>> {
        let mut filter = SeasonalTaskFilter::new().with_category(category);
        filter.month = month;
        self.get_seasonal_tasks(Some(&filter)).await
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
