//! Seasonal Tip Generator
//!
//! Three fixed tips per season, optionally followed by plant-specific
//! tips. Only the first three are returned, so the season tips always win.

use serde::{Deserialize, Serialize};

/// Maximum number of tips returned
pub const MAX_TIPS: usize = 3;

const HERB_TIP: &str =
    "Harvest herbs little and often to keep plants bushy and stop them flowering early.";
const VEGETABLE_TIP: &str =
    "Rotate vegetable beds each year to keep soil-borne pests and diseases down.";

/// Northern-hemisphere meteorological seasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// March to May
    Spring,
    /// June to August
    Summer,
    /// September to November
    Autumn,
    /// December to February
    Winter,
}

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }

    fn tips(&self) -> [&'static str; 3] {
        match self {
            Season::Spring => [
                "Harden off seedlings for a week or two before planting them out.",
                "Keep horticultural fleece handy; late frosts are common until mid-May.",
                "Start slug patrols early, especially after rain and around young plants.",
            ],
            Season::Summer => [
                "Water in the early morning or evening so less is lost to evaporation.",
                "Deadhead flowers regularly to encourage a longer display.",
                "Check containers daily in warm spells; they dry out much faster than beds.",
            ],
            Season::Autumn => [
                "Collect fallen leaves to make leaf mould for next year's soil.",
                "Plant spring bulbs before the ground gets cold and wet.",
                "Bring tender plants indoors before the first frost.",
            ],
            Season::Winter => [
                "Protect outdoor pots from waterlogging by raising them on feet.",
                "Prune apple and pear trees while they are dormant.",
                "Plan next year's planting and order seeds early.",
            ],
        }
    }
}

/// Tips for `month`, at most `MAX_TIPS`
pub fn seasonal_tips(month: u32, user_plants: &[String]) -> Vec<String> {
    let mut tips: Vec<String> = Season::from_month(month)
        .tips()
        .iter()
        .map(|t| t.to_string())
        .collect();

    if user_plants.iter().any(|p| p == "herb") {
        tips.push(HERB_TIP.to_string());
    }
    if user_plants.iter().any(|p| p == "vegetable") {
        tips.push(VEGETABLE_TIP.to_string());
    }

    tips.truncate(MAX_TIPS);
    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_to_season() {
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(8), Season::Summer);
        assert_eq!(Season::from_month(11), Season::Autumn);
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(2), Season::Winter);
    }

    #[test]
    fn test_season_tips_take_priority() {
        let plants = vec!["herb".to_string(), "vegetable".to_string()];
        let tips = seasonal_tips(7, &plants);
        assert_eq!(tips.len(), MAX_TIPS);
        assert_eq!(tips[0], Season::Summer.tips()[0]);
        assert!(!tips.iter().any(|t| t == HERB_TIP || t == VEGETABLE_TIP));
    }

    #[test]
    fn test_tips_differ_by_season() {
        assert_ne!(seasonal_tips(4, &[]), seasonal_tips(10, &[]));
    }
}
