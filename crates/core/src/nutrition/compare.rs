use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::nutrition::{NutritionRecord, CALORIES, FIBER, PROTEIN, SODIUM};

/// Recipe names ordered by one nutrient; ties keep input order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionRankings {
    pub lowest_calorie: Vec<String>,
    pub highest_protein: Vec<String>,
    pub highest_fiber: Vec<String>,
    pub lowest_sodium: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionComparison {
    pub recipes: Vec<String>,
    /// One value per recipe, aligned with `recipes`; absent amounts are zero.
    pub nutrients: BTreeMap<String, Vec<Decimal>>,
    pub rankings: NutritionRankings,
}

/// Side-by-side amounts for every nutrient any record carries, plus rankings.
pub fn compare<'a, I>(entries: I) -> NutritionComparison
where
    I: IntoIterator<Item = (&'a str, &'a NutritionRecord)>,
{
    let entries: Vec<(&str, &NutritionRecord)> = entries.into_iter().collect();

    let names: BTreeSet<&str> =
        entries.iter().flat_map(|(_, record)| record.amounts().map(|(name, _)| name)).collect();
    let nutrients: BTreeMap<String, Vec<Decimal>> = names
        .into_iter()
        .map(|nutrient| {
            let values: Vec<Decimal> = entries
                .iter()
                .map(|(_, record)| record.amount(nutrient).unwrap_or(Decimal::ZERO))
                .collect();
            (nutrient.to_string(), values)
        })
        .collect();

    NutritionComparison {
        recipes: entries.iter().map(|(name, _)| name.to_string()).collect(),
        nutrients,
        rankings: NutritionRankings {
            lowest_calorie: rank(&entries, CALORIES, Order::Ascending),
            highest_protein: rank(&entries, PROTEIN, Order::Descending),
            highest_fiber: rank(&entries, FIBER, Order::Descending),
            lowest_sodium: rank(&entries, SODIUM, Order::Ascending),
        },
    }
}

#[derive(Clone, Copy)]
enum Order {
    Ascending,
    Descending,
}

fn rank(entries: &[(&str, &NutritionRecord)], nutrient: &str, order: Order) -> Vec<String> {
    let mut ranked: Vec<(&str, Decimal)> = entries
        .iter()
        .map(|(name, record)| (*name, record.amount(nutrient).unwrap_or(Decimal::ZERO)))
        .collect();
    ranked.sort_by(|left, right| match order {
        Order::Ascending => left.1.cmp(&right.1),
        Order::Descending => right.1.cmp(&left.1),
    });
    ranked.into_iter().map(|(name, _)| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::compare;
    use crate::domain::nutrition::{NutritionRecord, CALORIES, FIBER, PROTEIN, SODIUM};

    fn record(calories: i64, protein: i64, fiber: i64, sodium: i64) -> NutritionRecord {
        NutritionRecord::from_amounts([
            (CALORIES, Decimal::from(calories)),
            (PROTEIN, Decimal::from(protein)),
            (FIBER, Decimal::from(fiber)),
            (SODIUM, Decimal::from(sodium)),
        ])
    }

    #[test]
    fn rankings_order_each_criterion() {
        let curry = record(245, 12, 14, 240);
        let salmon = record(367, 39, 0, 180);
        let salad = record(180, 6, 4, 420);

        let comparison = compare([("Curry", &curry), ("Salmon", &salmon), ("Salad", &salad)]);

        assert_eq!(comparison.recipes, vec!["Curry", "Salmon", "Salad"]);
        assert_eq!(comparison.rankings.lowest_calorie, vec!["Salad", "Curry", "Salmon"]);
        assert_eq!(comparison.rankings.highest_protein, vec!["Salmon", "Curry", "Salad"]);
        assert_eq!(comparison.rankings.highest_fiber, vec!["Curry", "Salad", "Salmon"]);
        assert_eq!(comparison.rankings.lowest_sodium, vec!["Salmon", "Curry", "Salad"]);
        assert_eq!(
            comparison.nutrients.get(CALORIES),
            Some(&vec![Decimal::from(245), Decimal::from(367), Decimal::from(180)])
        );
    }

    #[test]
    fn missing_amounts_count_as_zero_and_ties_keep_input_order() {
        let plain = NutritionRecord::from_amounts([(CALORIES, Decimal::from(100))]);
        let sugary = NutritionRecord::from_amounts([
            (CALORIES, Decimal::from(100)),
            ("sugar", Decimal::from(12)),
        ]);

        let comparison = compare([("Plain", &plain), ("Sugary", &sugary)]);

        assert_eq!(
            comparison.nutrients.get("sugar"),
            Some(&vec![Decimal::ZERO, Decimal::from(12)])
        );
        assert_eq!(comparison.rankings.lowest_calorie, vec!["Plain", "Sugary"]);
        assert_eq!(comparison.rankings.highest_fiber, vec!["Plain", "Sugary"]);
    }
}
