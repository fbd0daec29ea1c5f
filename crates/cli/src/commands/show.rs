use std::collections::BTreeMap;

use savora_core::config::ConfigOverrides;
use savora_core::{health_scores, ApplicationError, Recipe};
use serde::Serialize;

use crate::commands::{finish, load_cookbook, CommandResult};

#[derive(Debug, Serialize)]
struct RecipeDetail<'a> {
    #[serde(flatten)]
    recipe: &'a Recipe,
    health_scores: BTreeMap<String, f64>,
}

pub fn run(name: &str) -> CommandResult {
    finish("show", execute(name))
}

fn execute(name: &str) -> Result<CommandResult, ApplicationError> {
    let cookbook = load_cookbook(ConfigOverrides::default())?;
    let recipe = cookbook.recipe(name)?;

    let detail = RecipeDetail { recipe, health_scores: health_scores(&recipe.nutrition) };
    Ok(CommandResult::success_with_data("show", format!("recipe `{}`", recipe.name), detail))
}
