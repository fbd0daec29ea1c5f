use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const CALORIES: &str = "calories";
pub const PROTEIN: &str = "protein";
pub const CARBS: &str = "carbs";
pub const FAT: &str = "fat";
pub const FIBER: &str = "fiber";
pub const SUGAR: &str = "sugar";
pub const SODIUM: &str = "sodium";
pub const SATURATED_FAT: &str = "saturated_fat";

/// A single nutrition entry. Numeric amounts scale; notes pass through untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NutrientValue {
    Amount(Decimal),
    Note(String),
}

/// Nutrient name -> amount, always expressed for the owning recipe's base
/// serving count.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutritionRecord(BTreeMap<String, NutrientValue>);

impl NutritionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_amounts<I, S>(amounts: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        Self(
            amounts
                .into_iter()
                .map(|(name, amount)| (name.into(), NutrientValue::Amount(amount)))
                .collect(),
        )
    }

    pub fn with_amount(mut self, nutrient: impl Into<String>, amount: Decimal) -> Self {
        self.0.insert(nutrient.into(), NutrientValue::Amount(amount));
        self
    }

    pub fn with_note(mut self, key: impl Into<String>, note: impl Into<String>) -> Self {
        self.0.insert(key.into(), NutrientValue::Note(note.into()));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: NutrientValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&NutrientValue> {
        self.0.get(key)
    }

    pub fn amount(&self, nutrient: &str) -> Option<Decimal> {
        match self.0.get(nutrient) {
            Some(NutrientValue::Amount(amount)) => Some(*amount),
            _ => None,
        }
    }

    pub fn amount_f64(&self, nutrient: &str) -> Option<f64> {
        self.amount(nutrient).and_then(|amount| amount.to_f64())
    }

    pub fn amount_or_zero(&self, nutrient: &str) -> f64 {
        self.amount_f64(nutrient).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &NutrientValue)> {
        self.0.iter()
    }

    pub fn amounts(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().filter_map(|(name, value)| match value {
            NutrientValue::Amount(amount) => Some((name.as_str(), *amount)),
            NutrientValue::Note(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
