//! Read-only service bundling the recipe store and the substitution table.
//!
//! A `Cookbook` is cheap to clone and safe to share between sessions. Anything
//! mutable (the user profile) is passed in by the caller.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::{load_store, RecipeStore};
use crate::config::{AppConfig, SearchConfig};
use crate::domain::nutrition::NutritionRecord;
use crate::domain::recipe::Recipe;
use crate::domain::substitution::{SubstitutionConstraints, SubstitutionRule};
use crate::domain::tags::TagSet;
use crate::errors::{ApplicationError, DomainError};
use crate::nutrition::{
    analyze, compare, scale, suggest_modifications, Modification, ModificationGoal,
    NutritionAnalysis, NutritionComparison, ReferenceCategory,
};
use crate::preferences::{adapt_recipe, AdaptedRecipe, Interaction, InteractionAction, UserProfile};
use crate::search::{filter, truncate, RecipeMatch, RecipeQuery};
use crate::substitution::{IngredientSubstitutes, SubstitutionTable};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecipeNutrition {
    pub recipe: String,
    pub base_servings: u32,
    pub servings: Decimal,
    pub nutrition: NutritionRecord,
    pub analysis: NutritionAnalysis,
}

#[derive(Clone, Debug)]
pub struct Cookbook {
    store: Arc<RecipeStore>,
    substitutions: Arc<SubstitutionTable>,
    search: SearchConfig,
    reference: ReferenceCategory,
}

impl Cookbook {
    pub fn new(
        store: RecipeStore,
        substitutions: SubstitutionTable,
        search: SearchConfig,
        reference: ReferenceCategory,
    ) -> Self {
        Self {
            store: Arc::new(store),
            substitutions: Arc::new(substitutions),
            search,
            reference,
        }
    }

    /// Bundled recipes and rules with default search and nutrition settings.
    pub fn bundled() -> Self {
        let defaults = AppConfig::default();
        Self::new(
            RecipeStore::bundled(),
            SubstitutionTable::bundled(),
            defaults.search,
            defaults.nutrition.reference,
        )
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApplicationError> {
        let store = load_store(&config.catalog)?;
        Ok(Self::new(
            store,
            SubstitutionTable::bundled(),
            config.search.clone(),
            config.nutrition.reference,
        ))
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    pub fn substitutions(&self) -> &SubstitutionTable {
        &self.substitutions
    }

    pub fn reference(&self) -> ReferenceCategory {
        self.reference
    }

    pub fn recipe(&self, name: &str) -> Result<&Recipe, DomainError> {
        self.store.get(name)
    }

    /// Filters the store and applies the configured result cap.
    pub fn search(&self, query: &RecipeQuery) -> Vec<RecipeMatch<'_>> {
        truncate(filter(self.store.list_all(), query), self.search.max_results)
    }

    /// Like [`Cookbook::search`], with the profile's restrictions added to the
    /// query. Results without free text are re-ranked by learned preference
    /// when personalization is enabled.
    pub fn search_for_profile(
        &self,
        query: RecipeQuery,
        profile: &UserProfile,
    ) -> Vec<RecipeMatch<'_>> {
        let query = query.merge(profile.matches_filters());
        let matches = filter(self.store.list_all(), &query);
        let matches = if self.search.personalize && !query.has_text() {
            profile.personalize(matches)
        } else {
            matches
        };
        truncate(matches, self.search.max_results)
    }

    pub fn substitute(
        &self,
        ingredient: &str,
        constraints: &SubstitutionConstraints,
    ) -> Vec<&SubstitutionRule> {
        self.substitutions.find(ingredient, constraints)
    }

    pub fn substitute_all<S: AsRef<str>>(
        &self,
        ingredients: &[S],
        constraints: &SubstitutionConstraints,
    ) -> Vec<IngredientSubstitutes<'_>> {
        self.substitutions.find_batch(ingredients, constraints)
    }

    /// Nutrition of a recipe scaled to `servings` (its base count when
    /// `None`), analysed against the configured reference category.
    pub fn nutrition(
        &self,
        name: &str,
        servings: Option<Decimal>,
        goals: &TagSet,
    ) -> Result<RecipeNutrition, DomainError> {
        let recipe = self.store.get(name)?;
        let servings = servings.unwrap_or_else(|| Decimal::from(recipe.servings));
        let nutrition = scale(&recipe.nutrition, recipe.servings, servings)?;
        let analysis = analyze(&nutrition, self.reference, goals);

        Ok(RecipeNutrition {
            recipe: recipe.name.clone(),
            base_servings: recipe.servings,
            servings,
            nutrition,
            analysis,
        })
    }

    /// Side-by-side nutrition for two or more recipes at their base servings.
    pub fn compare<S: AsRef<str>>(&self, names: &[S]) -> Result<NutritionComparison, DomainError> {
        if names.len() < 2 {
            return Err(DomainError::InvalidArgument(
                "comparison needs at least two recipes".to_string(),
            ));
        }
        let recipes = names
            .iter()
            .map(|name| self.store.get(name.as_ref()))
            .collect::<Result<Vec<&Recipe>, DomainError>>()?;
        Ok(compare(recipes.iter().map(|recipe| (recipe.name.as_str(), &recipe.nutrition))))
    }

    pub fn suggest_modifications(
        &self,
        name: &str,
        goals: &[ModificationGoal],
    ) -> Result<Vec<Modification>, DomainError> {
        let recipe = self.store.get(name)?;
        Ok(suggest_modifications(&recipe.nutrition, goals))
    }

    /// The recipe rewritten for the profile's restrictions, allergens, spice
    /// level and skill.
    pub fn adapt(&self, name: &str, profile: &UserProfile) -> Result<AdaptedRecipe, DomainError> {
        let recipe = self.store.get(name)?;
        Ok(adapt_recipe(recipe, profile, &self.substitutions))
    }

    pub fn record_interaction(
        &self,
        profile: &mut UserProfile,
        recipe: &str,
        action: InteractionAction,
    ) -> Result<Interaction, DomainError> {
        let recipe = self.store.get(recipe)?;
        profile.record_interaction(recipe, action).cloned()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::Cookbook;
    use crate::catalog::RecipeStore;
    use crate::config::SearchConfig;
    use crate::domain::nutrition::CALORIES;
    use crate::domain::substitution::SubstitutionConstraints;
    use crate::domain::tags::{Tag, TagSet};
    use crate::errors::DomainError;
    use crate::nutrition::{ModificationGoal, ReferenceCategory};
    use crate::preferences::{InteractionAction, SpiceLevel, UserProfile};
    use crate::search::RecipeQuery;
    use crate::substitution::SubstitutionTable;

    fn capped(max_results: usize, personalize: bool) -> Cookbook {
        Cookbook::new(
            RecipeStore::bundled(),
            SubstitutionTable::bundled(),
            SearchConfig { max_results, personalize },
            ReferenceCategory::AdultFemale,
        )
    }

    #[test]
    fn search_applies_result_cap() {
        let cookbook = capped(3, true);

        let hits = cookbook.search(&RecipeQuery::new());

        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].recipe.name, "Mediterranean Quinoa Bowl");
    }

    #[test]
    fn profile_restrictions_narrow_search() {
        let cookbook = Cookbook::bundled();
        let profile = UserProfile::new().with_dietary_restriction("vegan");

        let hits = cookbook.search_for_profile(RecipeQuery::new(), &profile);

        assert!(!hits.is_empty());
        assert!(hits.iter().all(|hit| hit.recipe.dietary_tags.contains(&Tag::new("vegan"))));
    }

    #[test]
    fn personalization_can_be_disabled() {
        let mut profile = UserProfile::new();
        let enabled = Cookbook::bundled();
        enabled
            .record_interaction(&mut profile, "black bean tacos", InteractionAction::Favorite)
            .expect("known recipe");

        let ranked = enabled.search_for_profile(RecipeQuery::new(), &profile);
        assert_eq!(ranked[0].recipe.name, "Black Bean Tacos");

        let unpersonalized = capped(0, false);
        let plain = unpersonalized.search_for_profile(RecipeQuery::new(), &profile);
        assert_eq!(plain[0].recipe.name, "Mediterranean Quinoa Bowl");
        assert!(plain.iter().all(|hit| hit.personalization.is_none()));
    }

    #[test]
    fn text_search_keeps_lexical_order_for_profiles() {
        let cookbook = Cookbook::bundled();
        let mut profile = UserProfile::new();
        cookbook
            .record_interaction(&mut profile, "Spicy Lentil Curry", InteractionAction::Favorite)
            .expect("known recipe");

        let hits = cookbook.search_for_profile(RecipeQuery::new().text("curry"), &profile);

        assert_eq!(hits[0].recipe.name, "Thai Green Curry");
    }

    #[test]
    fn nutrition_scales_and_analyses() {
        let cookbook = capped(0, true);
        let base = cookbook.nutrition("Greek Salad", None, &TagSet::new()).expect("recipe");
        let doubled = cookbook
            .nutrition("greek salad", Some(Decimal::from(base.base_servings * 2)), &TagSet::new())
            .expect("recipe");

        let base_calories = base.nutrition.amount(CALORIES).expect("calories");
        assert_eq!(doubled.nutrition.amount(CALORIES), Some(base_calories * Decimal::from(2)));
        assert_eq!(doubled.analysis.reference, ReferenceCategory::AdultFemale);
    }

    #[test]
    fn nutrition_rejects_zero_servings_and_unknown_recipes() {
        let cookbook = Cookbook::bundled();

        assert!(matches!(
            cookbook.nutrition("Greek Salad", Some(Decimal::ZERO), &TagSet::new()),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            cookbook.nutrition("Beef Wellington", None, &TagSet::new()),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn substitutions_delegate_to_table() {
        let cookbook = Cookbook::bundled();
        let vegan = SubstitutionConstraints::new().with_dietary_tag("vegan");

        let rules = cookbook.substitute("unsalted butter", &vegan);
        assert!(rules.iter().all(|rule| rule.serves(&Tag::new("vegan"))));
        assert!(cookbook.substitute("unobtainium", &vegan).is_empty());

        let batch = cookbook.substitute_all(&["milk", "eggs"], &SubstitutionConstraints::new());
        assert_eq!(batch.len(), 2);
        assert!(batch.iter().all(|entry| !entry.rules.is_empty()));
    }

    #[test]
    fn recording_unknown_recipe_leaves_profile_untouched() {
        let cookbook = Cookbook::bundled();
        let mut profile = UserProfile::new();

        let result = cookbook.record_interaction(&mut profile, "Nope", InteractionAction::View);

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert!(profile.history.is_empty());
    }

    #[test]
    fn compare_needs_two_known_recipes() {
        let cookbook = Cookbook::bundled();

        let comparison =
            cookbook.compare(&["greek salad", "Baked Salmon with Dill"]).expect("known recipes");
        assert_eq!(comparison.recipes, vec!["Greek Salad", "Baked Salmon with Dill"]);
        assert_eq!(comparison.rankings.lowest_calorie[0], "Greek Salad");

        assert!(matches!(
            cookbook.compare(&["Greek Salad"]),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            cookbook.compare(&["Greek Salad", "Beef Wellington"]),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn modifications_use_base_nutrition() {
        let cookbook = Cookbook::bundled();

        let changes = cookbook
            .suggest_modifications("Greek Salad", &[ModificationGoal::ReduceSodium])
            .expect("known recipe");

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].current, "420mg");
        assert!(cookbook.suggest_modifications("Nope", &[]).is_err());
    }

    #[test]
    fn adapt_rewrites_for_profile() {
        let cookbook = Cookbook::bundled();
        let profile = UserProfile::new()
            .with_dietary_restriction("vegetarian")
            .with_spice_level(SpiceLevel::Hot);

        let curry = cookbook.adapt("thai green curry", &profile).expect("known recipe");

        assert_eq!(curry.recipe.name, "Thai Green Curry");
        assert_eq!(curry.swaps[0].replacement, "firm tofu");
        assert_eq!(curry.notes, vec!["Spice level increased for hot preference"]);
        assert!(cookbook.adapt("Nope", &profile).is_err());
    }
}
