use clap::Args;
use savora_core::config::ConfigOverrides;
use savora_core::{tag_set, ApplicationError, CookingSkill, SpiceLevel, UserProfile};

use crate::commands::{finish, load_cookbook, CommandResult};

#[derive(Args, Clone, Debug, Default)]
pub struct PersonalizeArgs {
    #[arg(help = "Recipe name (case-insensitive)")]
    pub name: String,
    #[arg(long = "diet", value_delimiter = ',', help = "Dietary restrictions to adapt for")]
    pub dietary_restrictions: Vec<String>,
    #[arg(long = "health", value_delimiter = ',', help = "Health conditions")]
    pub health_conditions: Vec<String>,
    #[arg(long = "allergen", value_delimiter = ',', help = "Allergens to warn about")]
    pub allergens: Vec<String>,
    #[arg(long, help = "Cooking skill: beginner, intermediate or advanced")]
    pub skill: Option<String>,
    #[arg(long, help = "Spice level: mild, medium or hot")]
    pub spice: Option<String>,
}

pub fn run(args: &PersonalizeArgs) -> CommandResult {
    finish("personalize", execute(args))
}

fn execute(args: &PersonalizeArgs) -> Result<CommandResult, ApplicationError> {
    let profile = profile_from(args)?;
    let cookbook = load_cookbook(ConfigOverrides::default())?;

    let adapted = cookbook.adapt(&args.name, &profile)?;
    let message = format!(
        "`{}` adapted with {} swap(s) and {} allergen warning(s)",
        adapted.recipe.name,
        adapted.swaps.len(),
        adapted.allergen_warnings.len()
    );
    Ok(CommandResult::success_with_data("personalize", message, adapted))
}

fn profile_from(args: &PersonalizeArgs) -> Result<UserProfile, ApplicationError> {
    let mut profile = UserProfile {
        dietary_restrictions: tag_set(&args.dietary_restrictions),
        health_conditions: tag_set(&args.health_conditions),
        ..UserProfile::default()
    };
    for allergen in &args.allergens {
        profile = profile.with_allergen(allergen);
    }
    if let Some(skill) = &args.skill {
        profile.cooking_skill = skill.parse::<CookingSkill>()?;
    }
    if let Some(spice) = &args.spice {
        profile.spice_level = spice.parse::<SpiceLevel>()?;
    }
    Ok(profile)
}
