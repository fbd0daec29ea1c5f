use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::recipe::Recipe;

const CUISINE_WEIGHT: f64 = 0.3;
const TAG_WEIGHT: f64 = 0.2;
const TIME_WEIGHT: f64 = 0.15;
const INGREDIENT_WEIGHT: f64 = 0.1;
const CONDITION_WEIGHT: f64 = 0.2;
const SPICE_WEIGHT: f64 = 0.05;

/// Only the leading ingredients of a recipe feed the ingredient tally.
const TRACKED_INGREDIENTS: usize = 5;
/// Tallies at or below these values do not produce explanations.
const CUISINE_EXPLAIN_THRESHOLD: f64 = 2.0;
const EXPLAIN_THRESHOLD: f64 = 1.0;
/// Absolute tally above which a preference counts as strong.
const STRONG_PREFERENCE: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBucket {
    Quick,
    Medium,
    Long,
}

impl TimeBucket {
    pub fn from_minutes(minutes: u32) -> Self {
        match minutes {
            0..=20 => Self::Quick,
            21..=45 => Self::Medium,
            _ => Self::Long,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn spice_bucket(recipe: &Recipe) -> &'static str {
    if recipe.is_spicy() {
        "spicy"
    } else {
        "mild"
    }
}

/// Weighted interaction tallies learned from a session's history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnedPreferences {
    pub cuisines: BTreeMap<String, f64>,
    pub dietary_tags: BTreeMap<String, f64>,
    pub cooking_times: BTreeMap<TimeBucket, f64>,
    pub ingredients: BTreeMap<String, f64>,
    pub health_conditions: BTreeMap<String, f64>,
    pub spice_levels: BTreeMap<String, f64>,
}

impl LearnedPreferences {
    pub fn is_empty(&self) -> bool {
        self.cuisines.is_empty()
            && self.dietary_tags.is_empty()
            && self.cooking_times.is_empty()
            && self.ingredients.is_empty()
            && self.health_conditions.is_empty()
            && self.spice_levels.is_empty()
    }

    /// Adds `weight` to every tally the recipe touches.
    pub fn observe(&mut self, recipe: &Recipe, weight: f64) {
        *self.cuisines.entry(key(&recipe.cuisine)).or_default() += weight;
        for tag in &recipe.dietary_tags {
            *self.dietary_tags.entry(tag.to_string()).or_default() += weight;
        }
        *self
            .cooking_times
            .entry(TimeBucket::from_minutes(recipe.cooking_time_minutes))
            .or_default() += weight;
        for ingredient in recipe.ingredients.iter().take(TRACKED_INGREDIENTS) {
            *self.ingredients.entry(key(ingredient)).or_default() += weight;
        }
        for condition in &recipe.health_conditions {
            *self.health_conditions.entry(condition.to_string()).or_default() += weight;
        }
        *self.spice_levels.entry(spice_bucket(recipe).to_string()).or_default() += weight;
    }

    /// Personalization score, never negative.
    pub fn score(&self, recipe: &Recipe) -> f64 {
        let cuisine = tally(&self.cuisines, &key(&recipe.cuisine));
        let tags: f64 =
            recipe.dietary_tags.iter().map(|tag| tally(&self.dietary_tags, tag.as_str())).sum();
        let time = self
            .cooking_times
            .get(&TimeBucket::from_minutes(recipe.cooking_time_minutes))
            .copied()
            .unwrap_or(0.0);
        let ingredients: f64 = recipe
            .ingredients
            .iter()
            .map(|ingredient| tally(&self.ingredients, &key(ingredient)))
            .sum();
        let conditions: f64 = recipe
            .health_conditions
            .iter()
            .map(|condition| tally(&self.health_conditions, condition.as_str()))
            .sum();
        let spice = tally(&self.spice_levels, spice_bucket(recipe));

        let score = CUISINE_WEIGHT * cuisine
            + TAG_WEIGHT * tags
            + TIME_WEIGHT * time
            + INGREDIENT_WEIGHT * ingredients
            + CONDITION_WEIGHT * conditions
            + SPICE_WEIGHT * spice;
        score.max(0.0)
    }

    /// Human-readable reasons the recipe fits the learned tallies.
    pub fn explain(&self, recipe: &Recipe) -> Vec<String> {
        if self.is_empty() {
            return vec!["Recommended as a popular recipe".to_string()];
        }

        let mut reasons = Vec::new();

        if tally(&self.cuisines, &key(&recipe.cuisine)) > CUISINE_EXPLAIN_THRESHOLD {
            reasons.push(format!("You seem to enjoy {} cuisine", recipe.cuisine));
        }

        let tags: Vec<&str> = recipe
            .dietary_tags
            .iter()
            .filter(|tag| tally(&self.dietary_tags, tag.as_str()) > EXPLAIN_THRESHOLD)
            .map(|tag| tag.as_str())
            .collect();
        if !tags.is_empty() {
            reasons.push(format!("Matches your preferences: {}", tags.join(", ")));
        }

        let bucket = TimeBucket::from_minutes(recipe.cooking_time_minutes);
        if self.cooking_times.get(&bucket).copied().unwrap_or(0.0) > EXPLAIN_THRESHOLD {
            reasons.push(format!("Fits your preferred cooking time ({bucket})"));
        }

        let liked: Vec<&str> = recipe
            .ingredients
            .iter()
            .filter(|ingredient| tally(&self.ingredients, &key(ingredient)) > EXPLAIN_THRESHOLD)
            .take(3)
            .map(String::as_str)
            .collect();
        if !liked.is_empty() {
            reasons.push(format!("Contains ingredients you like: {}", liked.join(", ")));
        }

        let goals: Vec<String> = recipe
            .health_conditions
            .iter()
            .filter(|condition| {
                tally(&self.health_conditions, condition.as_str()) > EXPLAIN_THRESHOLD
            })
            .map(|condition| condition.label())
            .collect();
        if !goals.is_empty() {
            reasons.push(format!("Aligns with your health goals: {}", goals.join(", ")));
        }

        if reasons.is_empty() {
            reasons.push("Recommended based on overall preferences".to_string());
        }
        reasons
    }

    /// Share of tallies whose magnitude marks a strong preference, 0.0..=1.0.
    pub fn strength(&self) -> f64 {
        let values: Vec<f64> = self
            .cuisines
            .values()
            .chain(self.dietary_tags.values())
            .chain(self.cooking_times.values())
            .chain(self.ingredients.values())
            .chain(self.health_conditions.values())
            .chain(self.spice_levels.values())
            .copied()
            .collect();
        if values.is_empty() {
            return 0.0;
        }
        let strong = values.iter().filter(|value| value.abs() > STRONG_PREFERENCE).count();
        strong as f64 / values.len() as f64
    }

    /// Highest-tallied cuisine, if any tally is positive.
    pub fn top_cuisine(&self) -> Option<&str> {
        self.cuisines
            .iter()
            .filter(|(_, score)| **score > 0.0)
            .max_by(|left, right| left.1.total_cmp(right.1))
            .map(|(cuisine, _)| cuisine.as_str())
    }
}

fn key(value: &str) -> String {
    value.trim().to_lowercase()
}

fn tally(map: &BTreeMap<String, f64>, key: &str) -> f64 {
    map.get(key).copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::{LearnedPreferences, TimeBucket};
    use crate::catalog::RecipeStore;

    #[test]
    fn time_buckets_have_inclusive_upper_bounds() {
        assert_eq!(TimeBucket::from_minutes(20), TimeBucket::Quick);
        assert_eq!(TimeBucket::from_minutes(21), TimeBucket::Medium);
        assert_eq!(TimeBucket::from_minutes(45), TimeBucket::Medium);
        assert_eq!(TimeBucket::from_minutes(46), TimeBucket::Long);
    }

    #[test]
    fn observing_a_recipe_updates_every_tally() {
        let store = RecipeStore::bundled();
        let curry = store.get("Spicy Lentil Curry").expect("recipe");
        let mut learned = LearnedPreferences::default();

        learned.observe(curry, 3.0);

        assert_eq!(learned.cuisines.get("indian"), Some(&3.0));
        assert_eq!(learned.dietary_tags.get("spicy"), Some(&3.0));
        assert_eq!(learned.cooking_times.get(&TimeBucket::Medium), Some(&3.0));
        assert_eq!(learned.ingredients.len(), 5);
        assert!(!learned.ingredients.contains_key("coriander"));
        assert_eq!(learned.health_conditions.get("heart-healthy"), Some(&3.0));
        assert_eq!(learned.spice_levels.get("spicy"), Some(&3.0));
    }

    #[test]
    fn score_weights_each_dimension() {
        let store = RecipeStore::bundled();
        let salad = store.get("Greek Salad").expect("recipe");
        let mut learned = LearnedPreferences::default();
        learned.observe(salad, 1.0);

        // cuisine 0.3 + 4 tags * 0.2 + time 0.15 + 5 ingredients * 0.1
        // + 2 conditions * 0.2 + mild 0.05
        let expected = 0.3 + 0.8 + 0.15 + 0.5 + 0.4 + 0.05;
        assert!((learned.score(salad) - expected).abs() < 1e-9);
    }

    #[test]
    fn negative_tallies_floor_at_zero() {
        let store = RecipeStore::bundled();
        let tacos = store.get("Black Bean Tacos").expect("recipe");
        let mut learned = LearnedPreferences::default();
        learned.observe(tacos, -2.0);

        assert_eq!(learned.score(tacos), 0.0);
    }

    #[test]
    fn explanations_respect_thresholds() {
        let store = RecipeStore::bundled();
        let curry = store.get("Thai Green Curry").expect("recipe");
        let mut learned = LearnedPreferences::default();

        assert_eq!(learned.explain(curry), vec!["Recommended as a popular recipe".to_string()]);

        learned.observe(curry, 1.0);
        assert_eq!(
            learned.explain(curry),
            vec!["Recommended based on overall preferences".to_string()]
        );

        learned.observe(curry, 5.0);
        let reasons = learned.explain(curry);
        assert_eq!(reasons[0], "You seem to enjoy Thai cuisine");
        assert!(reasons.iter().any(|reason| reason == "Fits your preferred cooking time (medium)"));
        assert!(reasons
            .iter()
            .any(|reason| reason == "Contains ingredients you like: chicken breast, green curry paste, coconut milk"));
        assert!(reasons.iter().any(|reason| reason == "Aligns with your health goals: diabetes friendly"));
    }

    #[test]
    fn strength_and_top_cuisine_track_history() {
        let store = RecipeStore::bundled();
        let mut learned = LearnedPreferences::default();
        assert_eq!(learned.strength(), 0.0);
        assert_eq!(learned.top_cuisine(), None);

        learned.observe(store.get("Greek Salad").expect("recipe"), 1.0);
        learned.observe(store.get("Thai Green Curry").expect("recipe"), 5.0);

        assert_eq!(learned.top_cuisine(), Some("thai"));
        assert!(learned.strength() > 0.0 && learned.strength() < 1.0);
    }
}
