//! Relevance Scorer - additive score and urgency for one task
//!
//! Score terms:
//!   - Timing:     same month +50, next month +30, last month +20, two months out +0
//!   - Priority:   high +30, medium +20, low +10
//!   - Plant match: +25 when the task is universal or shares a user plant type
//!   - Preference: +15 when the category is one the user focuses on
//!
//! Tasks more than two months ahead or more than one month behind are not
//! recommended, nor are low-priority tasks when the user skips them.

use crate::models::{Priority, RecommendationContext, SeasonalTask, TaskRecommendation, Urgency};

const SAME_MONTH_SCORE: i32 = 50;
const NEXT_MONTH_SCORE: i32 = 30;
const LAST_MONTH_SCORE: i32 = 20;
const PLANT_MATCH_SCORE: i32 = 25;
const FOCUS_CATEGORY_SCORE: i32 = 15;

/// Furthest month ahead still recommended
const MAX_MONTHS_AHEAD: i32 = 2;
/// Furthest month behind still recommended
const MAX_MONTHS_BEHIND: i32 = 1;

/// Signed distance from `current` to `target`, wrapped into [-6, 6]
///
/// `month_diff(12, 1) == 1` and `month_diff(1, 12) == -1`. Any pair of
/// `u32` values stays in range; a distance of exactly six months is +6.
pub fn month_diff(current: u32, target: u32) -> i32 {
    let diff = (i64::from(target) - i64::from(current)).rem_euclid(12) as i32;
    if diff > 6 {
        diff - 12
    } else {
        diff
    }
}

fn is_calendar_month(month: u32) -> bool {
    (1..=12).contains(&month)
}

fn priority_score(priority: Priority) -> i32 {
    match priority {
        Priority::High => 30,
        Priority::Medium => 20,
        Priority::Low => 10,
    }
}

/// Score a task for a user, or `None` if it should not be recommended
///
/// Months outside 1-12 on either side are never recommended.
pub fn score_task(
    task: &SeasonalTask,
    context: &RecommendationContext,
) -> Option<TaskRecommendation> {
    if !is_calendar_month(context.current_month) || !is_calendar_month(task.month) {
        return None;
    }

    let diff = month_diff(context.current_month, task.month);
    if diff > MAX_MONTHS_AHEAD || diff < -MAX_MONTHS_BEHIND {
        return None;
    }

    let preferences = context.user_preferences.as_ref();
    let skip_low = preferences.map(|p| p.skip_low_priority).unwrap_or(false);
    if task.priority == Priority::Low && skip_low {
        return None;
    }

    let mut score = 0;
    let mut urgency = Urgency::ThisMonth;

    match diff {
        0 => {
            score += SAME_MONTH_SCORE;
            urgency = if task.priority == Priority::High {
                Urgency::Immediate
            } else {
                Urgency::ThisWeek
            };
        }
        1 => score += NEXT_MONTH_SCORE,
        -1 => score += LAST_MONTH_SCORE,
        _ => {}
    }

    score += priority_score(task.priority);

    let user_plant_match = task.applies_to(&context.user_plants);
    if user_plant_match {
        score += PLANT_MATCH_SCORE;
    }

    let focused = preferences
        .and_then(|p| p.focus_categories.as_ref())
        .map(|cats| cats.contains(&task.category))
        .unwrap_or(false);
    if focused {
        score += FOCUS_CATEGORY_SCORE;
    }

    Some(TaskRecommendation {
        task: task.clone(),
        relevance_score: score,
        user_plant_match,
        urgency,
    })
}
