//! Predicate filtering and free-text ranking over the recipe store.

pub mod scoring;

use serde::{Deserialize, Serialize};

use crate::domain::recipe::{Difficulty, Recipe};
use crate::domain::tags::{Tag, TagSet};

pub use scoring::lexical_score;

/// Conjunction of recipe predicates. Empty fields impose no constraint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeQuery {
    pub cuisine: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub dietary_tags: TagSet,
    pub health_conditions: TagSet,
    pub max_cooking_time: Option<u32>,
    pub required_ingredients: Vec<String>,
    pub text: Option<String>,
}

impl RecipeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// `any` and `all` are accepted as explicit "no cuisine filter" values.
    pub fn cuisine(mut self, cuisine: impl Into<String>) -> Self {
        let cuisine = cuisine.into();
        let trimmed = cuisine.trim();
        self.cuisine = if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("any")
            || trimmed.eq_ignore_ascii_case("all")
        {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn dietary_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.dietary_tags.insert(tag.into());
        self
    }

    pub fn health_condition(mut self, condition: impl Into<Tag>) -> Self {
        self.health_conditions.insert(condition.into());
        self
    }

    pub fn max_cooking_time(mut self, minutes: u32) -> Self {
        self.max_cooking_time = Some(minutes);
        self
    }

    pub fn required_ingredient(mut self, ingredient: impl Into<String>) -> Self {
        let ingredient = ingredient.into();
        if !ingredient.trim().is_empty() {
            self.required_ingredients.push(ingredient.trim().to_string());
        }
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = (!text.trim().is_empty()).then(|| text.trim().to_string());
        self
    }

    /// Adds another query's constraints. Tag sets are unioned; scalar
    /// predicates already set on `self` win.
    pub fn merge(mut self, other: RecipeQuery) -> Self {
        self.dietary_tags.extend(other.dietary_tags);
        self.health_conditions.extend(other.health_conditions);
        self.required_ingredients.extend(other.required_ingredients);
        self.cuisine = self.cuisine.or(other.cuisine);
        self.difficulty = self.difficulty.or(other.difficulty);
        self.max_cooking_time = self.max_cooking_time.or(other.max_cooking_time);
        self.text = self.text.or(other.text);
        self
    }

    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|text| !text.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.cuisine.is_none()
            && self.difficulty.is_none()
            && self.dietary_tags.is_empty()
            && self.health_conditions.is_empty()
            && self.max_cooking_time.is_none()
            && self.required_ingredients.is_empty()
            && !self.has_text()
    }

    /// Structured predicates only; free text is applied by [`filter`].
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(cuisine) = &self.cuisine {
            if !recipe.cuisine.eq_ignore_ascii_case(cuisine) {
                return false;
            }
        }

        if let Some(difficulty) = self.difficulty {
            if recipe.difficulty != difficulty {
                return false;
            }
        }

        if let Some(max) = self.max_cooking_time {
            if recipe.cooking_time_minutes > max {
                return false;
            }
        }

        self.dietary_tags.iter().all(|tag| recipe.has_dietary_tag(tag))
            && self.health_conditions.iter().all(|condition| recipe.has_health_condition(condition))
            && self.required_ingredients.iter().all(|ingredient| recipe.uses_ingredient(ingredient))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecipeMatch<'a> {
    pub recipe: &'a Recipe,
    /// Lexical score, 0.0 when no free text was given.
    pub relevance: f64,
    /// Learned-preference score, set when results are personalized.
    pub personalization: Option<f64>,
}

impl<'a> RecipeMatch<'a> {
    pub fn unranked(recipe: &'a Recipe) -> Self {
        Self { recipe, relevance: 0.0, personalization: None }
    }
}

/// Applies every predicate of `query` to `recipes` in order.
///
/// With free text present, zero-relevance recipes are dropped and the rest are
/// ranked by score, descending; the sort is stable so ties keep dataset order.
pub fn filter<'a>(recipes: &'a [Recipe], query: &RecipeQuery) -> Vec<RecipeMatch<'a>> {
    let candidates = recipes.iter().filter(|recipe| query.matches(recipe));

    let Some(text) = query.text.as_deref().filter(|text| !text.trim().is_empty()) else {
        return candidates.map(RecipeMatch::unranked).collect();
    };

    let mut ranked: Vec<RecipeMatch<'a>> = candidates
        .map(|recipe| RecipeMatch {
            relevance: lexical_score(recipe, text),
            ..RecipeMatch::unranked(recipe)
        })
        .filter(|candidate| candidate.relevance > 0.0)
        .collect();
    ranked.sort_by(|left, right| right.relevance.total_cmp(&left.relevance));
    ranked
}

/// Keeps the first `max_results` matches; 0 keeps everything.
pub fn truncate<T>(mut matches: Vec<T>, max_results: usize) -> Vec<T> {
    if max_results > 0 {
        matches.truncate(max_results);
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::{filter, truncate, RecipeQuery};
    use crate::catalog::RecipeStore;
    use crate::domain::recipe::{Difficulty, Recipe};

    fn names(recipes: &[Recipe], query: &RecipeQuery) -> Vec<String> {
        filter(recipes, query).into_iter().map(|hit| hit.recipe.name.clone()).collect()
    }

    fn italian(name: &str, minutes: u32) -> Recipe {
        let mut recipe = RecipeStore::bundled().get("Mushroom Risotto").cloned().expect("recipe");
        recipe.name = name.to_string();
        recipe.cooking_time_minutes = minutes;
        recipe
    }

    #[test]
    fn empty_query_returns_whole_store_in_order() {
        let store = RecipeStore::bundled();
        let hits = filter(store.list_all(), &RecipeQuery::new());

        assert_eq!(hits.len(), store.len());
        assert!(hits.iter().zip(store.list_all()).all(|(hit, recipe)| hit.recipe == recipe));
        assert!(hits.iter().all(|hit| hit.relevance == 0.0));
    }

    #[test]
    fn cuisine_and_time_limit_select_the_quick_recipe() {
        let recipes = vec![italian("Quick Pasta", 25), italian("Slow Lasagna", 45)];
        let query = RecipeQuery::new().cuisine("italian").max_cooking_time(30);

        assert_eq!(names(&recipes, &query), vec!["Quick Pasta".to_string()]);
    }

    #[test]
    fn adding_predicates_never_grows_the_result() {
        let store = RecipeStore::bundled();
        let steps = [
            RecipeQuery::new(),
            RecipeQuery::new().dietary_tag("vegetarian"),
            RecipeQuery::new().dietary_tag("vegetarian").health_condition("heart-healthy"),
            RecipeQuery::new()
                .dietary_tag("vegetarian")
                .health_condition("heart-healthy")
                .max_cooking_time(20),
            RecipeQuery::new()
                .dietary_tag("vegetarian")
                .health_condition("heart-healthy")
                .max_cooking_time(20)
                .required_ingredient("avocado"),
        ];

        let results: Vec<Vec<String>> =
            steps.iter().map(|query| names(store.list_all(), query)).collect();
        for pair in results.windows(2) {
            assert!(pair[1].iter().all(|name| pair[0].contains(name)), "{pair:?}");
        }
        assert_eq!(
            results.last(),
            Some(&vec!["Avocado Toast with Egg".to_string(), "Black Bean Tacos".to_string()])
        );
    }

    #[test]
    fn dietary_tags_require_all() {
        let store = RecipeStore::bundled();
        let query = RecipeQuery::new().dietary_tag("vegan").dietary_tag("high-protein");

        assert_eq!(names(store.list_all(), &query), vec!["Spicy Lentil Curry".to_string()]);
    }

    #[test]
    fn unknown_tag_yields_empty_result() {
        let store = RecipeStore::bundled();
        let query = RecipeQuery::new().dietary_tag("paleo");

        assert!(filter(store.list_all(), &query).is_empty());
    }

    #[test]
    fn any_cuisine_means_no_cuisine_filter() {
        let store = RecipeStore::bundled();

        assert_eq!(RecipeQuery::new().cuisine("Any").cuisine, None);
        assert_eq!(filter(store.list_all(), &RecipeQuery::new().cuisine("all")).len(), store.len());
    }

    #[test]
    fn difficulty_filter_is_exact() {
        let store = RecipeStore::bundled();
        let query = RecipeQuery::new().difficulty(Difficulty::Hard);

        assert_eq!(names(store.list_all(), &query), vec!["Mushroom Risotto".to_string()]);
    }

    #[test]
    fn free_text_drops_non_matches_and_ranks_name_hits_first() {
        let store = RecipeStore::bundled();
        let query = RecipeQuery::new().text("curry");

        let hits = filter(store.list_all(), &query);
        let hit_names: Vec<&str> = hits.iter().map(|hit| hit.recipe.name.as_str()).collect();

        // Thai Green Curry also lists "green curry paste", lifting it above
        // the earlier Spicy Lentil Curry.
        assert_eq!(hit_names, vec!["Thai Green Curry", "Spicy Lentil Curry"]);
        assert!(hits[0].relevance > hits[1].relevance);
    }

    #[test]
    fn name_match_outranks_ingredient_only_match() {
        let store = RecipeStore::bundled();
        let query = RecipeQuery::new().text("salmon");

        let hits = filter(store.list_all(), &query);
        assert_eq!(hits.first().map(|hit| hit.recipe.name.as_str()), Some("Baked Salmon with Dill"));

        let query = RecipeQuery::new().text("avocado");
        assert_eq!(
            names(store.list_all(), &query),
            vec!["Avocado Toast with Egg".to_string(), "Black Bean Tacos".to_string()]
        );
    }

    #[test]
    fn merge_unions_tags_and_keeps_own_scalars() {
        let query = RecipeQuery::new().cuisine("Thai").dietary_tag("spicy");
        let profile = RecipeQuery::new().cuisine("Greek").dietary_tag("gluten-free");

        let merged = query.merge(profile);
        assert_eq!(merged.cuisine.as_deref(), Some("Thai"));
        assert_eq!(merged.dietary_tags.len(), 2);
    }

    #[test]
    fn truncate_zero_keeps_everything() {
        assert_eq!(truncate(vec![1, 2, 3], 0), vec![1, 2, 3]);
        assert_eq!(truncate(vec![1, 2, 3], 2), vec![1, 2]);
    }
}
