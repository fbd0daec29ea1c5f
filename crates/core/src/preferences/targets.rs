use serde::{Deserialize, Serialize};

use crate::domain::tags::TagSet;

/// Daily nutrition targets (grams, except calories in kcal and sodium in mg).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTargets {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub fiber: u32,
    pub sodium: u32,
}

impl Default for NutritionTargets {
    fn default() -> Self {
        Self { calories: 2000, protein: 50, carbs: 250, fat: 65, fiber: 25, sodium: 2300 }
    }
}

impl NutritionTargets {
    pub fn for_conditions(conditions: &TagSet) -> Self {
        let mut targets = Self::default();
        let has = |condition: &str| conditions.iter().any(|tag| tag.as_str() == condition);

        if has("diabetes-friendly") {
            targets.carbs = 180;
            targets.fiber = 35;
        }
        if has("heart-healthy") {
            targets.sodium = 1500;
        }
        if has("low-sodium") {
            targets.sodium = targets.sodium.min(1500);
        }
        if has("weight-loss") {
            targets.calories = 1500;
            targets.protein = 75;
        }

        targets
    }
}

#[cfg(test)]
mod tests {
    use super::NutritionTargets;
    use crate::domain::tags::{tag_set, TagSet};

    #[test]
    fn defaults_apply_without_conditions() {
        assert_eq!(NutritionTargets::for_conditions(&TagSet::new()), NutritionTargets::default());
    }

    #[test]
    fn conditions_adjust_targets() {
        let targets =
            NutritionTargets::for_conditions(&tag_set(["diabetes-friendly", "weight-loss"]));

        assert_eq!(targets.carbs, 180);
        assert_eq!(targets.fiber, 35);
        assert_eq!(targets.calories, 1500);
        assert_eq!(targets.protein, 75);
        assert_eq!(targets.sodium, 2300);

        let heart = NutritionTargets::for_conditions(&tag_set(["heart-healthy"]));
        assert_eq!(heart.sodium, 1500);
    }
}
