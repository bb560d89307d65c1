//! Plant-type filtering and text search over fetched task collections

use crate::models::SeasonalTask;

/// Keep tasks relevant to the plant types a user owns
///
/// An empty `user_plant_types` means the profile is unknown, not that the
/// user owns nothing, so the input is returned unchanged.
pub fn filter_by_plant_types(
    tasks: &[SeasonalTask],
    user_plant_types: &[String],
) -> Vec<SeasonalTask> {
    if user_plant_types.is_empty() {
        return tasks.to_vec();
    }
    tasks
        .iter()
        .filter(|t| t.applies_to(user_plant_types))
        .cloned()
        .collect()
}

/// Case-insensitive substring match against title and description
pub fn search_tasks(tasks: &[SeasonalTask], query: &str) -> Vec<SeasonalTask> {
    let needle = query.to_lowercase();
    tasks
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&needle)
                || t
                    .description
                    .as_ref()
                    .map(|d| d.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Priority};
    use chrono::Utc;

    fn task(
        id: &str,
        title: &str,
        description: Option<&str>,
        types: Option<&[&str]>,
    ) -> SeasonalTask {
        SeasonalTask {
            id: id.to_string(),
            title: title.to_string(),
            description: description.map(String::from),
            month: 4,
            priority: Priority::Medium,
            category: Category::Maintenance,
            climate_zone: Some("ireland".to_string()),
            plant_types: types.map(|t| t.iter().map(|s| s.to_string()).collect()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_profile_keeps_everything() {
        let tasks = vec![
            task("a", "Prune", None, Some(&["fruit"])),
            task("b", "Sow", None, Some(&["vegetable"])),
        ];
        assert_eq!(filter_by_plant_types(&tasks, &[]).len(), 2);
    }

    #[test]
    fn test_filter_keeps_universal_and_matching() {
        let tasks = vec![
            task("a", "Prune", None, Some(&["fruit"])),
            task("b", "Sow", None, Some(&["vegetable", "herb"])),
            task("c", "Weed", None, None),
            task("d", "Feed", None, Some(&["all"])),
        ];
        let kept = filter_by_plant_types(&tasks, &["herb".to_string()]);
        let ids: Vec<&str> = kept.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_search_matches_description_case_insensitively() {
        let tasks = vec![
            task("a", "Protect shrubs", Some("Apply mulch around base"), None),
            task("b", "Sow peas", Some("Direct sow outdoors"), None),
        ];
        let found = search_tasks(&tasks, "MULCH");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");

        assert_eq!(search_tasks(&tasks, "sow peas")[0].id, "b");
        assert!(search_tasks(&tasks, "compost").is_empty());
    }
}
