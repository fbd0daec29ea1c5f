pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::compare::CompareArgs;
use commands::nutrition::NutritionArgs;
use commands::personalize::PersonalizeArgs;
use commands::search::SearchArgs;
use commands::substitute::SubstituteArgs;

#[derive(Debug, Parser)]
#[command(
    name = "savora",
    about = "Savora recipe recommendation CLI",
    long_about = "Search the recipe catalog, inspect scaled nutrition, look up ingredient substitutions, adapt recipes to a profile, and check configuration.",
    after_help = "Examples:\n  savora search --cuisine italian --max-time 30\n  savora substitute butter --diet vegan\n  savora nutrition \"Greek Salad\" --servings 4 --improve reduce-sodium\n  savora personalize \"Mushroom Risotto\" --diet vegan --spice mild\n  savora compare \"Greek Salad\" \"Black Bean Tacos\"\n  savora doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Filter and rank recipes; prints a JSON result document")]
    Search(SearchArgs),
    #[command(about = "Show one recipe with its health scores")]
    Show {
        #[arg(help = "Recipe name (case-insensitive)")]
        name: String,
    },
    #[command(about = "List substitutes for an ingredient, best constraint match first")]
    Substitute(SubstituteArgs),
    #[command(about = "Scale a recipe's nutrition and analyse it against daily values")]
    Nutrition(NutritionArgs),
    #[command(about = "Adapt a recipe to dietary restrictions, allergens, spice level and skill")]
    Personalize(PersonalizeArgs),
    #[command(about = "Compare nutrition of two or more recipes side by side")]
    Compare(CompareArgs),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, dataset loading, and tag vocabularies")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Search(args) => commands::search::run(&args),
        Command::Show { name } => commands::show::run(&name),
        Command::Substitute(args) => commands::substitute::run(&args),
        Command::Nutrition(args) => commands::nutrition::run(&args),
        Command::Personalize(args) => commands::personalize::run(&args),
        Command::Compare(args) => commands::compare::run(&args),
        Command::Config => commands::config::run(),
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
