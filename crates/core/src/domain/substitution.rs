use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::tags::{Tag, TagSet};

/// One (source, target) substitution with its quantity ratio and the dietary
/// or health tags it serves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionRule {
    pub source: String,
    pub target: String,
    pub ratio: Decimal,
    pub tags: TagSet,
    pub rationale: String,
}

impl SubstitutionRule {
    /// Quantity of `target` equivalent to `quantity` of `source`.
    pub fn convert(&self, quantity: Decimal) -> Option<Decimal> {
        quantity
            .checked_mul(self.ratio)
            .map(|value| value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    pub fn serves(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }
}

/// Dietary and health requirements a substitute should satisfy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionConstraints {
    #[serde(default)]
    pub dietary_tags: TagSet,
    #[serde(default)]
    pub health_conditions: TagSet,
}

impl SubstitutionConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dietary_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.dietary_tags.insert(tag.into());
        self
    }

    pub fn with_health_condition(mut self, condition: impl Into<Tag>) -> Self {
        self.health_conditions.insert(condition.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.dietary_tags.is_empty() && self.health_conditions.is_empty()
    }

    /// Number of requested tags the rule serves.
    pub fn matched_by(&self, rule: &SubstitutionRule) -> usize {
        self.dietary_tags
            .iter()
            .chain(self.health_conditions.iter())
            .filter(|tag| rule.serves(tag))
            .count()
    }
}
