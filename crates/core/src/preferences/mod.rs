//! Per-session user profile: explicit dietary and health preferences plus an
//! interaction history that feeds the learned tallies.
//!
//! A profile is a plain value owned by its session. Nothing here is global;
//! callers pass the profile into search and record calls explicitly.

pub mod adaptation;
pub mod learning;
pub mod targets;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::recipe::{Recipe, RecipeId};
use crate::domain::tags::{Tag, TagSet};
use crate::errors::DomainError;
use crate::search::{RecipeMatch, RecipeQuery};

pub use adaptation::{adapt_recipe, AdaptedRecipe, AllergenWarning, IngredientSwap};
pub use learning::{LearnedPreferences, TimeBucket};
pub use targets::NutritionTargets;

/// Nudge applied to spicy recipes when the profile states a spice level.
const SPICE_NUDGE: f64 = 1.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiceLevel {
    Mild,
    #[default]
    Medium,
    Hot,
}

impl SpiceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Medium => "medium",
            Self::Hot => "hot",
        }
    }
}

impl fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpiceLevel {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mild" => Ok(Self::Mild),
            "medium" => Ok(Self::Medium),
            "hot" => Ok(Self::Hot),
            other => Err(DomainError::InvalidArgument(format!(
                "unsupported spice level `{other}` (expected mild|medium|hot)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookingSkill {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl CookingSkill {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for CookingSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CookingSkill {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(DomainError::InvalidArgument(format!(
                "unsupported cooking skill `{other}` (expected beginner|intermediate|advanced)"
            ))),
        }
    }
}

/// Lowercases an allergen and folds common aliases onto the allergen groups
/// recipe adaptation knows about.
pub fn normalize_allergen(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    match lower.as_str() {
        "egg" => "eggs".to_string(),
        "nut" | "tree nuts" | "peanuts" => "nuts".to_string(),
        "milk" | "lactose" => "dairy".to_string(),
        "wheat" => "gluten".to_string(),
        _ => lower,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InteractionAction {
    View,
    Cook,
    Favorite,
    Rate { rating: u8 },
    Skip,
}

impl InteractionAction {
    /// Tally weight of the action.
    pub fn weight(self) -> f64 {
        match self {
            Self::View => 1.0,
            Self::Cook => 3.0,
            Self::Favorite => 5.0,
            Self::Rate { rating } if rating >= 4 => 7.0,
            Self::Rate { rating } if rating < 3 => -2.0,
            Self::Rate { .. } => 1.0,
            Self::Skip => -1.0,
        }
    }

    pub fn validate(self) -> Result<Self, DomainError> {
        match self {
            Self::Rate { rating } if !(1..=5).contains(&rating) => {
                Err(DomainError::InvalidArgument(format!(
                    "rating must be between 1 and 5, got {rating}"
                )))
            }
            action => Ok(action),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Cook => "cook",
            Self::Favorite => "favorite",
            Self::Rate { .. } => "rate",
            Self::Skip => "skip",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub recipe_id: RecipeId,
    #[serde(flatten)]
    pub action: InteractionAction,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileInsights {
    pub total_interactions: usize,
    pub favorites: usize,
    pub cooked: usize,
    pub average_rating: Option<f64>,
    pub most_active: Option<DayPeriod>,
    pub top_cuisine: Option<String>,
    pub preference_strength: f64,
}

/// Partial update of the explicit preferences; `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceUpdate {
    pub dietary_restrictions: Option<TagSet>,
    pub health_conditions: Option<TagSet>,
    pub spice_level: Option<SpiceLevel>,
    pub allergens: Option<BTreeSet<String>>,
    pub cooking_skill: Option<CookingSkill>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub dietary_restrictions: TagSet,
    pub health_conditions: TagSet,
    pub spice_level: SpiceLevel,
    pub allergens: BTreeSet<String>,
    pub cooking_skill: CookingSkill,
    pub history: Vec<Interaction>,
    pub learned: LearnedPreferences,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dietary_restriction(mut self, tag: impl Into<Tag>) -> Self {
        self.dietary_restrictions.insert(tag.into());
        self
    }

    pub fn with_health_condition(mut self, condition: impl Into<Tag>) -> Self {
        self.health_conditions.insert(condition.into());
        self
    }

    pub fn with_spice_level(mut self, spice_level: SpiceLevel) -> Self {
        self.spice_level = spice_level;
        self
    }

    pub fn with_allergen(mut self, allergen: &str) -> Self {
        self.allergens.insert(normalize_allergen(allergen));
        self
    }

    pub fn with_cooking_skill(mut self, cooking_skill: CookingSkill) -> Self {
        self.cooking_skill = cooking_skill;
        self
    }

    pub fn apply(&mut self, update: PreferenceUpdate) {
        if let Some(dietary_restrictions) = update.dietary_restrictions {
            self.dietary_restrictions = dietary_restrictions;
        }
        if let Some(health_conditions) = update.health_conditions {
            self.health_conditions = health_conditions;
        }
        if let Some(spice_level) = update.spice_level {
            self.spice_level = spice_level;
        }
        if let Some(allergens) = update.allergens {
            self.allergens =
                allergens.iter().map(|allergen| normalize_allergen(allergen)).collect();
        }
        if let Some(cooking_skill) = update.cooking_skill {
            self.cooking_skill = cooking_skill;
        }
    }

    /// Appends an interaction stamped with the current UTC time.
    pub fn record_interaction(
        &mut self,
        recipe: &Recipe,
        action: InteractionAction,
    ) -> Result<&Interaction, DomainError> {
        self.record_interaction_at(recipe, action, Utc::now())
    }

    pub fn record_interaction_at(
        &mut self,
        recipe: &Recipe,
        action: InteractionAction,
        recorded_at: DateTime<Utc>,
    ) -> Result<&Interaction, DomainError> {
        let action = action.validate()?;
        self.learned.observe(recipe, action.weight());
        self.history.push(Interaction { recipe_id: recipe.id(), action, recorded_at });
        self.history.last().ok_or_else(|| {
            DomainError::InvariantViolation("interaction history is empty after append".to_string())
        })
    }

    /// The profile's explicit restrictions as a query: dietary tags and
    /// health conditions set, every other predicate empty.
    pub fn matches_filters(&self) -> RecipeQuery {
        RecipeQuery {
            dietary_tags: self.dietary_restrictions.clone(),
            health_conditions: self.health_conditions.clone(),
            ..RecipeQuery::default()
        }
    }

    /// Learned score adjusted for the stated spice level, never negative.
    pub fn personalization_score(&self, recipe: &Recipe) -> f64 {
        let learned = self.learned.score(recipe);
        let nudge = match (self.spice_level, recipe.is_spicy()) {
            (SpiceLevel::Mild, true) => -SPICE_NUDGE,
            (SpiceLevel::Hot, true) => SPICE_NUDGE,
            _ => 0.0,
        };
        (learned + nudge).max(0.0)
    }

    /// Stable re-rank by personalization score, descending.
    pub fn personalize<'a>(&self, matches: Vec<RecipeMatch<'a>>) -> Vec<RecipeMatch<'a>> {
        let mut scored: Vec<RecipeMatch<'a>> = matches
            .into_iter()
            .map(|candidate| RecipeMatch {
                personalization: Some(self.personalization_score(candidate.recipe)),
                ..candidate
            })
            .collect();
        scored.sort_by(|left, right| {
            let left = left.personalization.unwrap_or(0.0);
            let right = right.personalization.unwrap_or(0.0);
            right.total_cmp(&left)
        });
        scored
    }

    pub fn explain(&self, recipe: &Recipe) -> Vec<String> {
        self.learned.explain(recipe)
    }

    pub fn insights(&self) -> ProfileInsights {
        let count =
            |name: &str| self.history.iter().filter(|item| item.action.name() == name).count();

        let ratings: Vec<f64> = self
            .history
            .iter()
            .filter_map(|item| match item.action {
                InteractionAction::Rate { rating } => Some(f64::from(rating)),
                _ => None,
            })
            .collect();
        let average_rating =
            (!ratings.is_empty()).then(|| ratings.iter().sum::<f64>() / ratings.len() as f64);

        let mut per_period = [0usize; 4];
        for item in &self.history {
            let index = match DayPeriod::from_hour(item.recorded_at.hour()) {
                DayPeriod::Morning => 0,
                DayPeriod::Afternoon => 1,
                DayPeriod::Evening => 2,
                DayPeriod::Night => 3,
            };
            per_period[index] += 1;
        }
        let periods =
            [DayPeriod::Morning, DayPeriod::Afternoon, DayPeriod::Evening, DayPeriod::Night];
        let most_active = per_period
            .iter()
            .zip(periods)
            .filter(|(count, _)| **count > 0)
            .fold(None::<(usize, DayPeriod)>, |best, (count, period)| match best {
                Some((top, _)) if top >= *count => best,
                _ => Some((*count, period)),
            })
            .map(|(_, period)| period);

        ProfileInsights {
            total_interactions: self.history.len(),
            favorites: count("favorite"),
            cooked: count("cook"),
            average_rating,
            most_active,
            top_cuisine: self.learned.top_cuisine().map(str::to_string),
            preference_strength: self.learned.strength(),
        }
    }

    pub fn nutrition_targets(&self) -> NutritionTargets {
        NutritionTargets::for_conditions(&self.health_conditions)
    }

    /// General eating advice for the stated health conditions, then for the
    /// dietary restrictions.
    pub fn dietary_recommendations(&self) -> Vec<String> {
        const ADVICE: &[(&str, &[&str])] = &[
            (
                "diabetes-friendly",
                &[
                    "Focus on low-glycemic index foods",
                    "Limit simple carbohydrates and sugars",
                    "Include high-fiber foods",
                ],
            ),
            (
                "heart-healthy",
                &["Reduce sodium intake", "Choose lean proteins", "Include omega-3 rich foods"],
            ),
            (
                "weight-loss",
                &[
                    "Focus on high-protein, low-calorie foods",
                    "Increase vegetable intake",
                    "Control portion sizes",
                ],
            ),
            ("vegetarian", &["Ensure adequate protein from plant sources"]),
            (
                "vegan",
                &[
                    "Monitor B12 intake",
                    "Include variety of plant proteins",
                    "Consider calcium-rich foods",
                ],
            ),
        ];

        ADVICE
            .iter()
            .filter(|(tag, _)| {
                let tag = Tag::new(tag);
                self.health_conditions.contains(&tag) || self.dietary_restrictions.contains(&tag)
            })
            .flat_map(|(_, lines)| lines.iter().map(|line| line.to_string()))
            .collect()
    }
}
