//! Static ingredient substitution lookup.

mod seed;

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::substitution::{SubstitutionConstraints, SubstitutionRule};
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    ingredient: String,
    rules: Vec<SubstitutionRule>,
}

/// Ingredient -> ordered substitution rules. Read-only after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubstitutionTable {
    entries: Vec<Entry>,
}

/// Substitutes found for one requested ingredient of a batch lookup.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IngredientSubstitutes<'a> {
    pub ingredient: String,
    /// Table key the request resolved to, if any.
    pub matched: Option<&'a str>,
    pub rules: Vec<&'a SubstitutionRule>,
}

impl SubstitutionTable {
    /// Groups rules by source ingredient, keeping first-seen order.
    pub fn new(rules: Vec<SubstitutionRule>) -> Result<Self, DomainError> {
        let mut pairs = HashSet::with_capacity(rules.len());
        let mut entries: Vec<Entry> = Vec::new();

        for mut rule in rules {
            let key = normalize(&rule.source);
            if key.is_empty() || rule.target.trim().is_empty() {
                return Err(DomainError::InvariantViolation(
                    "substitution source and target must not be empty".to_string(),
                ));
            }
            if rule.ratio <= rust_decimal::Decimal::ZERO {
                return Err(DomainError::InvariantViolation(format!(
                    "substitution `{}` -> `{}` must have a positive ratio",
                    rule.source, rule.target
                )));
            }
            if !pairs.insert((key.clone(), normalize(&rule.target))) {
                return Err(DomainError::InvariantViolation(format!(
                    "duplicate substitution `{}` -> `{}`",
                    rule.source, rule.target
                )));
            }

            rule.source = key.clone();
            match entries.iter_mut().find(|entry| entry.ingredient == key) {
                Some(entry) => entry.rules.push(rule),
                None => entries.push(Entry { ingredient: key, rules: vec![rule] }),
            }
        }

        Ok(Self { entries })
    }

    pub fn bundled() -> Self {
        let mut entries: Vec<Entry> = Vec::new();
        for rule in seed::BUNDLED_RULES.iter().map(|seed| seed.to_rule()) {
            match entries.iter_mut().find(|entry| entry.ingredient == rule.source) {
                Some(entry) => entry.rules.push(rule),
                None => entries.push(Entry { ingredient: rule.source.clone(), rules: vec![rule] }),
            }
        }
        Self { entries }
    }

    /// Table keys in insertion order.
    pub fn ingredients(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.ingredient.as_str())
    }

    pub fn rules(&self) -> impl Iterator<Item = &SubstitutionRule> {
        self.entries.iter().flat_map(|entry| entry.rules.iter())
    }

    /// Resolves a free-form ingredient name to a table key.
    ///
    /// Exact match first, then the longest key contained in the name
    /// ("unsalted butter" -> "butter"), then the shortest key containing the
    /// name ("egg" -> "eggs").
    pub fn resolve(&self, ingredient: &str) -> Option<&str> {
        let wanted = normalize(ingredient);
        if wanted.is_empty() {
            return None;
        }

        if let Some(entry) = self.entries.iter().find(|entry| entry.ingredient == wanted) {
            return Some(entry.ingredient.as_str());
        }

        let contained = self
            .entries
            .iter()
            .filter(|entry| wanted.contains(entry.ingredient.as_str()))
            .fold(None::<&Entry>, |best, entry| match best {
                Some(current) if current.ingredient.len() >= entry.ingredient.len() => {
                    Some(current)
                }
                _ => Some(entry),
            });
        if let Some(entry) = contained {
            return Some(entry.ingredient.as_str());
        }

        self.entries
            .iter()
            .filter(|entry| entry.ingredient.contains(wanted.as_str()))
            .fold(None::<&Entry>, |best, entry| match best {
                Some(current) if current.ingredient.len() <= entry.ingredient.len() => {
                    Some(current)
                }
                _ => Some(entry),
            })
            .map(|entry| entry.ingredient.as_str())
    }

    /// Rules for `ingredient` whose tags intersect `constraints`, most matched
    /// tags first; ties keep table order. Empty constraints return every rule
    /// for the ingredient. Unknown ingredients yield an empty vector.
    pub fn find(
        &self,
        ingredient: &str,
        constraints: &SubstitutionConstraints,
    ) -> Vec<&SubstitutionRule> {
        let Some(key) = self.resolve(ingredient) else {
            return Vec::new();
        };
        let Some(entry) = self.entries.iter().find(|entry| entry.ingredient == key) else {
            return Vec::new();
        };

        if constraints.is_empty() {
            return entry.rules.iter().collect();
        }

        let mut scored: Vec<(usize, &SubstitutionRule)> = entry
            .rules
            .iter()
            .map(|rule| (constraints.matched_by(rule), rule))
            .filter(|(matched, _)| *matched > 0)
            .collect();
        scored.sort_by(|left, right| right.0.cmp(&left.0));
        scored.into_iter().map(|(_, rule)| rule).collect()
    }

    pub fn find_batch<'a, S: AsRef<str>>(
        &'a self,
        ingredients: &[S],
        constraints: &SubstitutionConstraints,
    ) -> Vec<IngredientSubstitutes<'a>> {
        ingredients
            .iter()
            .map(|ingredient| {
                let ingredient = ingredient.as_ref();
                IngredientSubstitutes {
                    ingredient: ingredient.trim().to_string(),
                    matched: self.resolve(ingredient),
                    rules: self.find(ingredient, constraints),
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(ingredient: &str) -> String {
    ingredient.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::SubstitutionTable;
    use crate::domain::substitution::{SubstitutionConstraints, SubstitutionRule};
    use crate::domain::tags::{tag_set, Tag};
    use crate::errors::DomainError;

    fn targets(rules: &[&SubstitutionRule]) -> Vec<String> {
        rules.iter().map(|rule| rule.target.clone()).collect()
    }

    fn rule(source: &str, target: &str, tags: &[&str]) -> SubstitutionRule {
        SubstitutionRule {
            source: source.to_string(),
            target: target.to_string(),
            ratio: Decimal::ONE,
            tags: tag_set(tags),
            rationale: String::new(),
        }
    }

    #[test]
    fn vegan_butter_lookup_returns_only_vegan_rules() {
        let table = SubstitutionTable::bundled();
        let constraints = SubstitutionConstraints::new().with_dietary_tag("vegan");

        let rules = table.find("butter", &constraints);

        assert!(!rules.is_empty());
        assert!(rules.iter().all(|rule| rule.serves(&Tag::new("vegan"))));
        assert_eq!(targets(&rules), vec!["olive oil", "coconut oil", "vegan butter"]);
        assert_eq!(rules[0].ratio, Decimal::new(75, 2));
    }

    #[test]
    fn more_matched_tags_rank_first() {
        let table = SubstitutionTable::bundled();
        let constraints = SubstitutionConstraints::new()
            .with_dietary_tag("vegan")
            .with_health_condition("heart-healthy");

        let rules = table.find("butter", &constraints);

        // olive oil serves both; coconut oil and vegan butter serve one.
        assert_eq!(targets(&rules), vec!["olive oil", "coconut oil", "vegan butter"]);

        let rules = table.find("milk", &constraints);
        assert_eq!(targets(&rules), vec!["oat milk", "almond milk", "soy milk"]);
    }

    #[test]
    fn unknown_ingredient_yields_empty() {
        let table = SubstitutionTable::bundled();

        assert!(table.find("dragonfruit", &SubstitutionConstraints::new()).is_empty());
        assert!(table.find("   ", &SubstitutionConstraints::new()).is_empty());
    }

    #[test]
    fn empty_constraints_return_all_rules_in_order() {
        let table = SubstitutionTable::bundled();
        let rules = table.find("Garlic", &SubstitutionConstraints::new());

        assert_eq!(
            targets(&rules),
            vec!["garlic powder", "garlic-infused oil", "asafoetida", "ginger"]
        );
    }

    #[test]
    fn lookup_is_deterministic() {
        let table = SubstitutionTable::bundled();
        let constraints = SubstitutionConstraints::new().with_dietary_tag("gluten-free");

        let first = targets(&table.find("pasta", &constraints));
        let second = targets(&table.find("pasta", &constraints));
        assert_eq!(first, second);
    }

    #[test]
    fn resolution_prefers_exact_then_longest_contained_key() {
        let table = SubstitutionTable::bundled();

        assert_eq!(table.resolve("Olive Oil"), Some("olive oil"));
        assert_eq!(table.resolve("unsalted butter"), Some("butter"));
        assert_eq!(table.resolve("red lentils"), Some("lentils"));
        assert_eq!(table.resolve("whole milk"), Some("milk"));
        assert_eq!(table.resolve("coconut milk"), Some("coconut milk"));
        assert_eq!(table.resolve("egg"), Some("eggs"));
        assert_eq!(table.resolve("saffron"), None);
    }

    #[test]
    fn batch_lookup_keeps_request_order() {
        let table = SubstitutionTable::bundled();
        let constraints = SubstitutionConstraints::new().with_dietary_tag("vegan");

        let batch = table.find_batch(&["butter", "milk", "saffron"], &constraints);

        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].matched, Some("butter"));
        assert_eq!(batch[1].ingredient, "milk");
        assert!(batch[2].rules.is_empty());
        assert_eq!(batch[2].matched, None);
    }

    #[test]
    fn table_construction_rejects_duplicate_pairs() {
        let result = SubstitutionTable::new(vec![
            rule("Butter", "olive oil", &["vegan"]),
            rule("butter", "Olive Oil", &["heart-healthy"]),
        ]);

        assert!(matches!(result, Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn table_construction_groups_by_source() {
        let table = SubstitutionTable::new(vec![
            rule("butter", "olive oil", &["vegan"]),
            rule("milk", "oat milk", &["vegan"]),
            rule("Butter", "ghee", &[]),
        ])
        .expect("valid table");

        assert_eq!(table.ingredients().collect::<Vec<_>>(), vec!["butter", "milk"]);
        assert_eq!(
            targets(&table.find("butter", &SubstitutionConstraints::new())),
            vec!["olive oil", "ghee"]
        );
    }

    #[test]
    fn bundled_rules_use_known_vocabulary() {
        let table = SubstitutionTable::bundled();

        assert!(table.len() >= 20);
        for rule in table.rules() {
            assert!(rule.tags.iter().all(Tag::is_known), "{} -> {}", rule.source, rule.target);
            assert!(rule.ratio > Decimal::ZERO);
        }
        assert_eq!(SubstitutionTable::new(table.rules().cloned().collect()), Ok(table.clone()));
    }
}
