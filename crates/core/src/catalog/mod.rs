//! Read-only recipe store.
//!
//! The store is built once (bundled seed or a JSON dataset file) and never
//! mutated afterwards, so it is shared across sessions without locking.

mod seed;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::CatalogConfig;
use crate::domain::recipe::Recipe;
use crate::errors::{ApplicationError, DomainError};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("could not read recipe dataset `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse recipe dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("recipe dataset is invalid: {0}")]
    Invalid(#[from] DomainError),
}

impl From<DatasetError> for ApplicationError {
    fn from(value: DatasetError) -> Self {
        Self::Dataset(value.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    /// Builds a store, rejecting duplicate names and non-positive serving counts.
    pub fn new(recipes: Vec<Recipe>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(recipes.len());
        for recipe in &recipes {
            let key = lookup_key(&recipe.name);
            if key.is_empty() {
                return Err(DomainError::InvariantViolation(
                    "recipe name must not be empty".to_string(),
                ));
            }
            if recipe.servings == 0 {
                return Err(DomainError::InvariantViolation(format!(
                    "recipe `{}` must serve at least one person",
                    recipe.name
                )));
            }
            if !seen.insert(key) {
                return Err(DomainError::InvariantViolation(format!(
                    "duplicate recipe name `{}`",
                    recipe.name
                )));
            }
        }

        Ok(Self { recipes })
    }

    pub fn bundled() -> Self {
        Self { recipes: seed::BUNDLED_RECIPES.iter().map(|seed| seed.to_recipe()).collect() }
    }

    pub fn from_json(raw: &str) -> Result<Self, DatasetError> {
        let recipes: Vec<Recipe> = serde_json::from_str(raw)?;
        Ok(Self::new(recipes)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| DatasetError::Read { path: path.to_path_buf(), source })?;
        Self::from_json(&raw)
    }

    /// All recipes in insertion order.
    pub fn list_all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, name: &str) -> Result<&Recipe, DomainError> {
        let key = lookup_key(name);
        self.recipes
            .iter()
            .find(|recipe| lookup_key(&recipe.name) == key)
            .ok_or_else(|| DomainError::recipe_not_found(name.trim()))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// Loads the configured dataset, falling back to the bundled recipes.
pub fn load_store(config: &CatalogConfig) -> Result<RecipeStore, DatasetError> {
    match &config.dataset_path {
        Some(path) => RecipeStore::from_path(path),
        None => Ok(RecipeStore::bundled()),
    }
}

fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::{load_store, DatasetError, RecipeStore};
    use crate::config::CatalogConfig;
    use crate::domain::recipe::Recipe;
    use crate::errors::DomainError;

    fn named(store: &RecipeStore, name: &str) -> Recipe {
        store.get(name).cloned().expect("bundled recipe should exist")
    }

    #[test]
    fn bundled_store_lists_recipes_in_insertion_order() {
        let store = RecipeStore::bundled();
        let names: Vec<&str> = store.list_all().iter().map(|recipe| recipe.name.as_str()).collect();

        assert_eq!(store.len(), 10);
        assert_eq!(names.first(), Some(&"Mediterranean Quinoa Bowl"));
        assert_eq!(names.last(), Some(&"Black Bean Tacos"));
    }

    #[test]
    fn bundled_recipes_satisfy_store_invariants() {
        let store = RecipeStore::bundled();
        let rebuilt = RecipeStore::new(store.list_all().to_vec());

        assert_eq!(rebuilt, Ok(store.clone()));
        for recipe in store.list_all() {
            assert!(recipe.unknown_tags().is_empty(), "{} carries unknown tags", recipe.name);
        }
    }

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        let store = RecipeStore::bundled();
        let recipe = named(&store, "  greek salad ");

        assert_eq!(recipe.name, "Greek Salad");
        assert_eq!(recipe.servings, 4);
    }

    #[test]
    fn unknown_recipe_is_not_found() {
        let store = RecipeStore::bundled();

        assert_eq!(
            store.get("Beef Wellington"),
            Err(DomainError::NotFound { entity: "recipe", key: "Beef Wellington".to_string() })
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let store = RecipeStore::bundled();
        let mut duplicate = named(&store, "Greek Salad");
        duplicate.name = "GREEK SALAD".to_string();
        let mut recipes = store.list_all().to_vec();
        recipes.push(duplicate);

        assert!(matches!(RecipeStore::new(recipes), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn zero_servings_are_rejected() {
        let store = RecipeStore::bundled();
        let mut recipe = named(&store, "Greek Salad");
        recipe.servings = 0;

        let result = RecipeStore::new(vec![recipe]);
        assert!(
            matches!(result, Err(DomainError::InvariantViolation(ref message)) if message.contains("Greek Salad"))
        );
    }

    #[test]
    fn json_dataset_replaces_bundled_recipes() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("recipes.json");
        fs::write(
            &path,
            r#"[
  {
    "name": "Pasta Primavera",
    "cuisine": "Italian",
    "difficulty": "easy",
    "ingredients": ["pasta", "zucchini", "parmesan"],
    "instructions": ["Boil pasta", "Toss with vegetables"],
    "nutrition": {"calories": 510, "protein": 17.5, "note": "per plate"},
    "dietary_tags": ["vegetarian"],
    "servings": 2,
    "cooking_time_minutes": 25
  }
]"#,
        )
        .expect("write dataset");

        let store = load_store(&CatalogConfig { dataset_path: Some(path) }).expect("dataset loads");
        let recipe = store.get("pasta primavera").expect("recipe present");

        assert_eq!(store.len(), 1);
        assert!(recipe.health_conditions.is_empty());
        assert_eq!(recipe.nutrition.len(), 3);
    }

    #[test]
    fn missing_dataset_file_reports_path() {
        let result =
            load_store(&CatalogConfig { dataset_path: Some(PathBuf::from("/nonexistent/r.json")) });

        assert!(matches!(result, Err(DatasetError::Read { .. })));
    }

    #[test]
    fn malformed_dataset_is_a_parse_error() {
        assert!(matches!(RecipeStore::from_json("{\"name\": 1}"), Err(DatasetError::Parse(_))));
    }
}
