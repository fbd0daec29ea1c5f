pub mod catalog;
pub mod config;
pub mod cookbook;
pub mod domain;
pub mod errors;
pub mod nutrition;
pub mod preferences;
pub mod search;
pub mod substitution;

pub use catalog::{DatasetError, RecipeStore};
pub use cookbook::{Cookbook, RecipeNutrition};
pub use domain::nutrition::{NutrientValue, NutritionRecord};
pub use domain::recipe::{Difficulty, Recipe, RecipeId};
pub use domain::substitution::{SubstitutionConstraints, SubstitutionRule};
pub use domain::tags::{tag_set, Tag, TagSet, DIETARY_TAGS, HEALTH_CONDITIONS};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use nutrition::{
    analyze, compare, health_score, health_scores, nutrient_density, scale, suggest_modifications,
    total, Modification, ModificationGoal, NutritionAnalysis, NutritionComparison,
    NutritionRankings, ReferenceCategory,
};
pub use preferences::{
    adapt_recipe, AdaptedRecipe, AllergenWarning, CookingSkill, IngredientSwap, Interaction,
    InteractionAction, LearnedPreferences, NutritionTargets, PreferenceUpdate, ProfileInsights,
    SpiceLevel, UserProfile,
};
pub use search::{filter, RecipeMatch, RecipeQuery};
pub use substitution::{IngredientSubstitutes, SubstitutionTable};
