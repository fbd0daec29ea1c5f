use clap::Args;
use rust_decimal::Decimal;
use savora_core::config::ConfigOverrides;
use savora_core::{
    tag_set, ApplicationError, Modification, ModificationGoal, NutritionTargets, RecipeNutrition,
    ReferenceCategory,
};
use serde::Serialize;

use crate::commands::{finish, load_cookbook, CommandResult};

#[derive(Args, Clone, Debug, Default)]
pub struct NutritionArgs {
    #[arg(help = "Recipe name (case-insensitive)")]
    pub name: String,
    #[arg(long, allow_negative_numbers = true, help = "Target serving count")]
    pub servings: Option<i64>,
    #[arg(long, help = "Reference category: adult_male, adult_female or child")]
    pub reference: Option<String>,
    #[arg(long = "goal", value_delimiter = ',', help = "Health goals for tailored advice")]
    pub goals: Vec<String>,
    #[arg(
        long = "improve",
        value_delimiter = ',',
        help = "Modification goals: reduce-sodium, increase-protein, reduce-calories, increase-fiber"
    )]
    pub improve: Vec<String>,
}

#[derive(Debug, Serialize)]
struct NutritionReport {
    #[serde(flatten)]
    nutrition: RecipeNutrition,
    daily_targets: NutritionTargets,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    modifications: Vec<Modification>,
}

pub fn run(args: &NutritionArgs) -> CommandResult {
    finish("nutrition", execute(args))
}

fn execute(args: &NutritionArgs) -> Result<CommandResult, ApplicationError> {
    let reference = args.reference.as_deref().map(str::parse::<ReferenceCategory>).transpose()?;
    let goals = tag_set(&args.goals);
    let improve = args
        .improve
        .iter()
        .map(|goal| goal.parse::<ModificationGoal>())
        .collect::<Result<Vec<_>, _>>()?;
    let cookbook = load_cookbook(ConfigOverrides { reference, ..ConfigOverrides::default() })?;

    let nutrition = cookbook.nutrition(&args.name, args.servings.map(Decimal::from), &goals)?;
    let message = format!(
        "nutrition for `{}` scaled from {} to {} serving(s)",
        nutrition.recipe, nutrition.base_servings, nutrition.servings
    );
    let modifications = cookbook.suggest_modifications(&args.name, &improve)?;
    let report = NutritionReport {
        nutrition,
        daily_targets: NutritionTargets::for_conditions(&goals),
        modifications,
    };

    Ok(CommandResult::success_with_data("nutrition", message, report))
}
