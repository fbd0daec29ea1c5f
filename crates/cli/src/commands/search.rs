use clap::Args;
use savora_core::config::ConfigOverrides;
use savora_core::{ApplicationError, Difficulty, RecipeMatch, RecipeQuery, TagSet};
use serde::Serialize;

use crate::commands::{finish, load_cookbook, CommandResult};

#[derive(Args, Clone, Debug, Default)]
pub struct SearchArgs {
    #[arg(help = "Free-text query ranked against recipe names and ingredients")]
    pub text: Option<String>,
    #[arg(long, help = "Cuisine to match (`any` or `all` disables the filter)")]
    pub cuisine: Option<String>,
    #[arg(long, help = "Difficulty: easy, medium or hard")]
    pub difficulty: Option<String>,
    #[arg(long = "diet", value_delimiter = ',', help = "Required dietary tags")]
    pub dietary_tags: Vec<String>,
    #[arg(long = "health", value_delimiter = ',', help = "Required health conditions")]
    pub health_conditions: Vec<String>,
    #[arg(long = "max-time", help = "Maximum cooking time in minutes (inclusive)")]
    pub max_cooking_time: Option<u32>,
    #[arg(long = "ingredient", value_delimiter = ',', help = "Ingredients the recipe must use")]
    pub ingredients: Vec<String>,
    #[arg(long, help = "Maximum number of results (0 = unlimited)")]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct RecipeHit<'a> {
    name: &'a str,
    cuisine: &'a str,
    difficulty: Difficulty,
    cooking_time_minutes: u32,
    servings: u32,
    dietary_tags: &'a TagSet,
    health_conditions: &'a TagSet,
    relevance: f64,
}

impl<'a> From<&RecipeMatch<'a>> for RecipeHit<'a> {
    fn from(hit: &RecipeMatch<'a>) -> Self {
        Self {
            name: &hit.recipe.name,
            cuisine: &hit.recipe.cuisine,
            difficulty: hit.recipe.difficulty,
            cooking_time_minutes: hit.recipe.cooking_time_minutes,
            servings: hit.recipe.servings,
            dietary_tags: &hit.recipe.dietary_tags,
            health_conditions: &hit.recipe.health_conditions,
            relevance: hit.relevance,
        }
    }
}

pub fn run(args: &SearchArgs) -> CommandResult {
    finish("search", execute(args))
}

fn execute(args: &SearchArgs) -> Result<CommandResult, ApplicationError> {
    let query = build_query(args)?;
    let cookbook = load_cookbook(ConfigOverrides {
        max_results: args.limit,
        ..ConfigOverrides::default()
    })?;

    let matches = cookbook.search(&query);
    let hits: Vec<RecipeHit<'_>> = matches.iter().map(RecipeHit::from).collect();
    let message = match hits.len() {
        1 => "found 1 recipe".to_string(),
        count => format!("found {count} recipes"),
    };
    Ok(CommandResult::success_with_data("search", message, hits))
}

fn build_query(args: &SearchArgs) -> Result<RecipeQuery, ApplicationError> {
    let mut query = RecipeQuery::new();
    if let Some(cuisine) = &args.cuisine {
        query = query.cuisine(cuisine.as_str());
    }
    if let Some(difficulty) = &args.difficulty {
        query = query.difficulty(difficulty.parse::<Difficulty>()?);
    }
    if let Some(minutes) = args.max_cooking_time {
        query = query.max_cooking_time(minutes);
    }
    if let Some(text) = &args.text {
        query = query.text(text.as_str());
    }
    for tag in args.dietary_tags.iter().filter(|tag| !tag.trim().is_empty()) {
        query = query.dietary_tag(tag.as_str());
    }
    for condition in args.health_conditions.iter().filter(|tag| !tag.trim().is_empty()) {
        query = query.health_condition(condition.as_str());
    }
    for ingredient in &args.ingredients {
        query = query.required_ingredient(ingredient.as_str());
    }
    Ok(query)
}
