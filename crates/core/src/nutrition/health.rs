use std::collections::BTreeMap;

use crate::domain::nutrition::{
    NutritionRecord, CALORIES, CARBS, FAT, FIBER, PROTEIN, SATURATED_FAT, SODIUM, SUGAR,
};
use crate::domain::tags::{Tag, HEALTH_CONDITIONS};

const LOW_SODIUM_FLOOR_MG: f64 = 140.0;
const LOW_SODIUM_CEILING_MG: f64 = 600.0;

/// Suitability of a nutrition record for a health condition, 0.0..=100.0 with
/// one decimal. Conditions outside the vocabulary yield `None`.
pub fn health_score(record: &NutritionRecord, condition: &Tag) -> Option<f64> {
    let raw = match condition.as_str() {
        "diabetes-friendly" => diabetes_friendly(record),
        "heart-healthy" => heart_healthy(record),
        "weight-loss" => weight_loss(record),
        "low-sodium" => low_sodium(record),
        _ => return None,
    };
    Some(round1(raw.clamp(0.0, 100.0)))
}

/// Scores for every known health condition, keyed by tag.
pub fn health_scores(record: &NutritionRecord) -> BTreeMap<String, f64> {
    HEALTH_CONDITIONS
        .iter()
        .filter_map(|condition| {
            health_score(record, &Tag::new(condition)).map(|score| (condition.to_string(), score))
        })
        .collect()
}

/// Protein and fiber per calorie, capped at 100. Zero without calories.
pub fn nutrient_density(record: &NutritionRecord) -> f64 {
    let calories = record.amount_or_zero(CALORIES);
    if calories <= 0.0 {
        return 0.0;
    }
    let protein = record.amount_or_zero(PROTEIN);
    let fiber = record.amount_or_zero(FIBER);
    round1(((protein + fiber * 2.0) / calories * 100.0).min(100.0))
}

fn diabetes_friendly(record: &NutritionRecord) -> f64 {
    let carbs = record.amount_or_zero(CARBS);
    let sugar = record.amount_f64(SUGAR).unwrap_or(carbs * 0.2);
    let fiber = record.amount_or_zero(FIBER);

    let mut score = 100.0;
    if carbs > 30.0 {
        score -= (carbs - 30.0) * 2.0;
    }
    if sugar > 10.0 {
        score -= (sugar - 10.0) * 5.0;
    }
    score + fiber * 3.0
}

fn heart_healthy(record: &NutritionRecord) -> f64 {
    let sodium = record.amount_or_zero(SODIUM);
    let saturated_fat =
        record.amount_f64(SATURATED_FAT).unwrap_or(record.amount_or_zero(FAT) * 0.3);

    let mut score = 100.0;
    if sodium > 600.0 {
        score -= (sodium - 600.0) / 20.0;
    }
    if saturated_fat > 10.0 {
        score -= (saturated_fat - 10.0) * 5.0;
    }
    score
}

fn weight_loss(record: &NutritionRecord) -> f64 {
    let calories = record.amount_or_zero(CALORIES);
    let fiber_bonus = (record.amount_or_zero(FIBER) * 2.0).min(20.0);
    let protein_bonus = record.amount_or_zero(PROTEIN).min(30.0);
    100.0 - calories / 100.0 + fiber_bonus + protein_bonus - 50.0
}

fn low_sodium(record: &NutritionRecord) -> f64 {
    let sodium = record.amount_or_zero(SODIUM);
    if sodium <= LOW_SODIUM_FLOOR_MG {
        return 100.0;
    }
    if sodium >= LOW_SODIUM_CEILING_MG {
        return 0.0;
    }
    100.0 * (LOW_SODIUM_CEILING_MG - sodium) / (LOW_SODIUM_CEILING_MG - LOW_SODIUM_FLOOR_MG)
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{health_score, health_scores, nutrient_density};
    use crate::catalog::RecipeStore;
    use crate::domain::nutrition::NutritionRecord;
    use crate::domain::tags::Tag;

    fn score(record: &NutritionRecord, condition: &str) -> f64 {
        health_score(record, &Tag::new(condition)).expect("known condition")
    }

    #[test]
    fn quinoa_bowl_scores() {
        let store = RecipeStore::bundled();
        let bowl = &store.get("Mediterranean Quinoa Bowl").expect("recipe").nutrition;

        assert_eq!(score(bowl, "diabetes-friendly"), 72.0);
        assert_eq!(score(bowl, "heart-healthy"), 100.0);
        assert_eq!(score(bowl, "weight-loss"), 83.8);
        assert_eq!(score(bowl, "low-sodium"), 47.8);
    }

    #[test]
    fn high_sodium_and_saturated_fat_reduce_heart_score() {
        let record = NutritionRecord::from_amounts([
            ("sodium", Decimal::from(1000)),
            ("saturated_fat", Decimal::from(14)),
        ]);

        // 100 - 400/20 - 4*5
        assert_eq!(score(&record, "heart-healthy"), 60.0);
        assert_eq!(score(&record, "low-sodium"), 0.0);
    }

    #[test]
    fn scores_are_clamped_to_range() {
        let sugary = NutritionRecord::from_amounts([
            ("carbs", Decimal::from(120)),
            ("sugar", Decimal::from(60)),
        ]);
        let fibrous = NutritionRecord::from_amounts([("fiber", Decimal::from(30))]);

        assert_eq!(score(&sugary, "diabetes-friendly"), 0.0);
        assert_eq!(score(&fibrous, "diabetes-friendly"), 100.0);
    }

    #[test]
    fn unknown_condition_is_none() {
        let record = NutritionRecord::from_amounts([("calories", Decimal::from(400))]);

        assert_eq!(health_score(&record, &Tag::new("gout-friendly")), None);
        assert_eq!(health_scores(&record).len(), 4);
    }

    #[test]
    fn nutrient_density_handles_missing_calories() {
        let record = NutritionRecord::from_amounts([
            ("calories", Decimal::from(120)),
            ("protein", Decimal::from(5)),
            ("fiber", Decimal::from(6)),
        ]);

        assert_eq!(nutrient_density(&record), 14.2);
        assert_eq!(nutrient_density(&NutritionRecord::new()), 0.0);
    }
}
