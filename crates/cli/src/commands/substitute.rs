use clap::Args;
use rust_decimal::Decimal;
use savora_core::config::ConfigOverrides;
use savora_core::{tag_set, ApplicationError, DomainError, SubstitutionConstraints, TagSet};
use serde::Serialize;

use crate::commands::{finish, load_cookbook, CommandResult};

#[derive(Args, Clone, Debug, Default)]
pub struct SubstituteArgs {
    #[arg(help = "Ingredient to replace, e.g. `butter` or `unsalted butter`")]
    pub ingredient: String,
    #[arg(long = "diet", value_delimiter = ',', help = "Dietary tags the substitute should serve")]
    pub dietary_tags: Vec<String>,
    #[arg(long = "health", value_delimiter = ',', help = "Health conditions to favour")]
    pub health_conditions: Vec<String>,
    #[arg(long, help = "Source quantity to convert with each rule's ratio")]
    pub quantity: Option<String>,
}

#[derive(Debug, Serialize)]
struct Substitute<'a> {
    target: &'a str,
    ratio: Decimal,
    tags: &'a TagSet,
    rationale: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<Decimal>,
}

#[derive(Debug, Serialize)]
struct SubstituteReport<'a> {
    ingredient: &'a str,
    matched: Option<&'a str>,
    substitutes: Vec<Substitute<'a>>,
}

pub fn run(args: &SubstituteArgs) -> CommandResult {
    finish("substitute", execute(args))
}

fn execute(args: &SubstituteArgs) -> Result<CommandResult, ApplicationError> {
    let quantity = args.quantity.as_deref().map(parse_quantity).transpose()?;
    let constraints = SubstitutionConstraints {
        dietary_tags: tag_set(&args.dietary_tags),
        health_conditions: tag_set(&args.health_conditions),
    };
    let cookbook = load_cookbook(ConfigOverrides::default())?;

    let ingredient = args.ingredient.trim();
    let substitutes = cookbook
        .substitute(ingredient, &constraints)
        .into_iter()
        .map(|rule| Substitute {
            target: &rule.target,
            ratio: rule.ratio,
            tags: &rule.tags,
            rationale: &rule.rationale,
            quantity: quantity.and_then(|quantity| rule.convert(quantity)),
        })
        .collect::<Vec<_>>();

    let message = format!("{} substitute(s) for `{ingredient}`", substitutes.len());
    let report = SubstituteReport {
        ingredient,
        matched: cookbook.substitutions().resolve(ingredient),
        substitutes,
    };
    Ok(CommandResult::success_with_data("substitute", message, report))
}

fn parse_quantity(raw: &str) -> Result<Decimal, DomainError> {
    let quantity = raw.trim().parse::<Decimal>().map_err(|error| {
        DomainError::InvalidArgument(format!("quantity `{raw}` is not a number: {error}"))
    })?;
    if quantity <= Decimal::ZERO {
        return Err(DomainError::InvalidArgument(format!(
            "quantity must be greater than zero, got {quantity}"
        )));
    }
    Ok(quantity)
}
