//! Recommendation Ranker
//!
//! Scores a fetched task collection, drops tasks the scorer rejects, and
//! orders the rest by urgency then relevance.

use crate::models::{RecommendationContext, SeasonalTask, TaskRecommendation};
use crate::scorer::score_task;

/// Longest recommendation list returned
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Rank `tasks` for `context`
///
/// Urgency rank descending, relevance score descending within equal
/// urgency; ties keep repository order. At most `MAX_RECOMMENDATIONS`.
pub fn rank_recommendations(
    tasks: &[SeasonalTask],
    context: &RecommendationContext,
) -> Vec<TaskRecommendation> {
    let mut recommendations: Vec<TaskRecommendation> = tasks
        .iter()
        .filter_map(|task| score_task(task, context))
        .collect();

    recommendations.sort_by(|a, b| {
        b.urgency
            .rank()
            .cmp(&a.urgency.rank())
            .then_with(|| b.relevance_score.cmp(&a.relevance_score))
    });
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
