use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::nutrition::{NutritionRecord, CALORIES, FIBER, PROTEIN, SODIUM};
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModificationGoal {
    ReduceSodium,
    IncreaseProtein,
    ReduceCalories,
    IncreaseFiber,
}

impl ModificationGoal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReduceSodium => "reduce-sodium",
            Self::IncreaseProtein => "increase-protein",
            Self::ReduceCalories => "reduce-calories",
            Self::IncreaseFiber => "increase-fiber",
        }
    }
}

impl fmt::Display for ModificationGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModificationGoal {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "reduce-sodium" => Ok(Self::ReduceSodium),
            "increase-protein" => Ok(Self::IncreaseProtein),
            "reduce-calories" => Ok(Self::ReduceCalories),
            "increase-fiber" => Ok(Self::IncreaseFiber),
            other => Err(DomainError::InvalidArgument(format!(
                "unsupported modification goal `{other}` \
                 (expected reduce-sodium|increase-protein|reduce-calories|increase-fiber)"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    pub goal: ModificationGoal,
    pub current: String,
    pub suggestion: String,
    pub impact: String,
}

struct Rule {
    goal: ModificationGoal,
    nutrient: &'static str,
    unit: &'static str,
    /// Suggest when the amount is above (`true`) or below the threshold.
    above: bool,
    threshold: i64,
    suggestion: &'static str,
    impact: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        goal: ModificationGoal::ReduceSodium,
        nutrient: SODIUM,
        unit: "mg",
        above: true,
        threshold: 400,
        suggestion: "Use herbs and spices instead of salt, rinse canned ingredients",
        impact: "Reduces sodium by 30-50%",
    },
    Rule {
        goal: ModificationGoal::IncreaseProtein,
        nutrient: PROTEIN,
        unit: "g",
        above: false,
        threshold: 15,
        suggestion: "Add beans, nuts, Greek yogurt, or lean meat",
        impact: "Can add 10-20g protein",
    },
    Rule {
        goal: ModificationGoal::ReduceCalories,
        nutrient: CALORIES,
        unit: " cal",
        above: true,
        threshold: 400,
        suggestion: "Reduce oil, use cooking spray, increase vegetables",
        impact: "Can reduce by 100-200 calories",
    },
    Rule {
        goal: ModificationGoal::IncreaseFiber,
        nutrient: FIBER,
        unit: "g",
        above: false,
        threshold: 5,
        suggestion: "Add vegetables, switch to whole grains, include beans",
        impact: "Can add 5-10g fiber",
    },
];

/// Concrete changes for each goal the record does not already meet, in goal
/// order. Missing amounts count as zero.
pub fn suggest_modifications(
    record: &NutritionRecord,
    goals: &[ModificationGoal],
) -> Vec<Modification> {
    goals
        .iter()
        .filter_map(|goal| RULES.iter().find(|rule| rule.goal == *goal))
        .filter_map(|rule| {
            let amount = record.amount(rule.nutrient).unwrap_or(Decimal::ZERO);
            let threshold = Decimal::from(rule.threshold);
            let applies = if rule.above { amount > threshold } else { amount < threshold };
            applies.then(|| Modification {
                goal: rule.goal,
                current: format!("{}{}", amount.normalize(), rule.unit),
                suggestion: rule.suggestion.to_string(),
                impact: rule.impact.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{suggest_modifications, ModificationGoal};
    use crate::domain::nutrition::{NutritionRecord, CALORIES, FIBER, PROTEIN, SODIUM};
    use crate::errors::DomainError;

    #[test]
    fn suggestions_only_for_unmet_goals() {
        let curry = NutritionRecord::from_amounts([
            (CALORIES, Decimal::from(380)),
            (PROTEIN, Decimal::from(28)),
            (FIBER, Decimal::from(4)),
            (SODIUM, Decimal::from(720)),
        ]);
        let goals = [
            ModificationGoal::ReduceSodium,
            ModificationGoal::IncreaseProtein,
            ModificationGoal::ReduceCalories,
            ModificationGoal::IncreaseFiber,
        ];

        let modifications = suggest_modifications(&curry, &goals);

        let suggested: Vec<ModificationGoal> = modifications.iter().map(|item| item.goal).collect();
        assert_eq!(suggested, vec![ModificationGoal::ReduceSodium, ModificationGoal::IncreaseFiber]);
        assert_eq!(modifications[0].current, "720mg");
        assert_eq!(modifications[1].current, "4g");
    }

    #[test]
    fn thresholds_are_exclusive_and_missing_amounts_are_zero() {
        let record = NutritionRecord::from_amounts([(SODIUM, Decimal::from(400))]);

        assert!(suggest_modifications(&record, &[ModificationGoal::ReduceSodium]).is_empty());

        let protein = suggest_modifications(&record, &[ModificationGoal::IncreaseProtein]);
        assert_eq!(protein.len(), 1);
        assert_eq!(protein[0].current, "0g");
    }

    #[test]
    fn goals_parse_from_either_separator() {
        assert_eq!("reduce_sodium".parse(), Ok(ModificationGoal::ReduceSodium));
        assert_eq!(" Increase-Fiber ".parse(), Ok(ModificationGoal::IncreaseFiber));
        assert!(matches!(
            "eat-less".parse::<ModificationGoal>(),
            Err(DomainError::InvalidArgument(_))
        ));
    }
}
