use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::nutrition::NutritionRecord;
use crate::domain::tags::{Tag, TagSet};
use crate::errors::DomainError;

/// Recipe identity. Recipes are keyed by their (unique) name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecipeId(pub String);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(DomainError::InvalidArgument(format!(
                "unsupported difficulty `{other}` (expected easy|medium|hard)"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub cuisine: String,
    pub difficulty: Difficulty,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub nutrition: NutritionRecord,
    #[serde(default)]
    pub dietary_tags: TagSet,
    #[serde(default)]
    pub health_conditions: TagSet,
    pub servings: u32,
    pub cooking_time_minutes: u32,
}

impl Recipe {
    pub fn id(&self) -> RecipeId {
        RecipeId(self.name.clone())
    }

    pub fn has_dietary_tag(&self, tag: &Tag) -> bool {
        self.dietary_tags.contains(tag)
    }

    pub fn has_health_condition(&self, condition: &Tag) -> bool {
        self.health_conditions.contains(condition)
    }

    pub fn is_spicy(&self) -> bool {
        self.dietary_tags.contains(&Tag::new("spicy"))
    }

    /// Case-insensitive substring match against every ingredient.
    pub fn uses_ingredient(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.ingredients.iter().any(|ingredient| ingredient.to_lowercase().contains(&needle))
    }

    /// Every tag on the recipe that is outside the shared vocabularies.
    pub fn unknown_tags(&self) -> Vec<&Tag> {
        self.dietary_tags
            .iter()
            .filter(|tag| !tag.is_dietary())
            .chain(self.health_conditions.iter().filter(|tag| !tag.is_health_condition()))
            .collect()
    }
}
