//! Serving-size scaling, meal totals and health scoring.

pub mod analysis;
pub mod compare;
pub mod health;
pub mod modifications;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::nutrition::{NutrientValue, NutritionRecord};
use crate::errors::DomainError;

pub use analysis::{analyze, MacroDistribution, NutritionAnalysis, ReferenceCategory};
pub use compare::{compare, NutritionComparison, NutritionRankings};
pub use health::{health_score, health_scores, nutrient_density};
pub use modifications::{suggest_modifications, Modification, ModificationGoal};

/// Decimal places kept by [`scale`].
pub const SCALE_PRECISION: u32 = 1;

/// Rescales a record from `original_servings` to `target_servings`.
///
/// Every amount is multiplied by the same factor and rounded to one decimal
/// place (midpoint away from zero). Notes are copied unchanged.
pub fn scale(
    record: &NutritionRecord,
    original_servings: impl Into<Decimal>,
    target_servings: impl Into<Decimal>,
) -> Result<NutritionRecord, DomainError> {
    let original = original_servings.into();
    let target = target_servings.into();

    if original <= Decimal::ZERO {
        return Err(DomainError::InvalidArgument(format!(
            "original servings must be greater than zero, got {original}"
        )));
    }
    if target <= Decimal::ZERO {
        return Err(DomainError::InvalidArgument(format!(
            "target servings must be greater than zero, got {target}"
        )));
    }

    let mut scaled = NutritionRecord::new();
    for (name, value) in record.iter() {
        let value = match value {
            NutrientValue::Amount(amount) => {
                NutrientValue::Amount(scale_amount(name, *amount, original, target)?)
            }
            NutrientValue::Note(note) => NutrientValue::Note(note.clone()),
        };
        scaled.insert(name.clone(), value);
    }

    Ok(scaled)
}

fn scale_amount(
    name: &str,
    amount: Decimal,
    original: Decimal,
    target: Decimal,
) -> Result<Decimal, DomainError> {
    amount
        .checked_mul(target)
        .and_then(|value| value.checked_div(original))
        .map(|value| {
            value.round_dp_with_strategy(SCALE_PRECISION, RoundingStrategy::MidpointAwayFromZero)
        })
        .ok_or_else(|| {
            DomainError::InvalidArgument(format!("scaling `{name}` overflows the decimal range"))
        })
}

/// Sums the numeric amounts of several records, e.g. the dishes of one meal.
/// Notes are not carried into the total.
pub fn total<'a, I>(records: I) -> Result<NutritionRecord, DomainError>
where
    I: IntoIterator<Item = &'a NutritionRecord>,
{
    let mut sum = NutritionRecord::new();
    for record in records {
        for (name, amount) in record.amounts() {
            let running = sum.amount(name).unwrap_or(Decimal::ZERO);
            let next = running.checked_add(amount).ok_or_else(|| {
                DomainError::InvalidArgument(format!("total `{name}` overflows the decimal range"))
            })?;
            sum.insert(name, NutrientValue::Amount(next));
        }
    }
    Ok(sum)
}
