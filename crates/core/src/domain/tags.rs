//! Dietary and health-condition vocabularies.
//!
//! Recipes, substitution rules and user profiles all draw their tags from the
//! same two vocabularies, and tag equality is the only join between them. A
//! [`Tag`] outside the vocabulary is still representable so that a query for
//! an unknown tag simply matches nothing.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const DIETARY_TAGS: &[&str] = &[
    "vegetarian",
    "vegan",
    "gluten-free",
    "dairy-free",
    "low-carb",
    "low-fat",
    "low-calorie",
    "keto-friendly",
    "high-protein",
    "high-fiber",
    "omega-3-rich",
    "healthy-fats",
    "low-fodmap",
    "spicy",
    "mediterranean",
    "comfort-food",
];

pub const HEALTH_CONDITIONS: &[&str] =
    &["diabetes-friendly", "heart-healthy", "weight-loss", "low-sodium"];

pub type TagSet = BTreeSet<Tag>;

/// Normalized vocabulary label: trimmed, lowercase, kebab-case.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw
            .as_ref()
            .trim()
            .to_ascii_lowercase()
            .replace(['_', ' '], "-");
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_dietary(&self) -> bool {
        DIETARY_TAGS.contains(&self.0.as_str())
    }

    pub fn is_health_condition(&self) -> bool {
        HEALTH_CONDITIONS.contains(&self.0.as_str())
    }

    pub fn is_known(&self) -> bool {
        self.is_dietary() || self.is_health_condition()
    }

    /// Human label used in explanations, e.g. `heart-healthy` -> `heart healthy`.
    pub fn label(&self) -> String {
        self.0.replace('-', " ")
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Tag> for String {
    fn from(value: Tag) -> Self {
        value.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds a tag set from raw labels, dropping blanks.
pub fn tag_set<I, S>(labels: I) -> TagSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .filter(|label| !label.as_ref().trim().is_empty())
        .map(Tag::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{tag_set, Tag};

    #[test]
    fn tags_are_normalized_to_kebab_case() {
        assert_eq!(Tag::new(" Gluten_Free ").as_str(), "gluten-free");
        assert_eq!(Tag::new("heart healthy").as_str(), "heart-healthy");
    }

    #[test]
    fn vocabulary_membership_is_exact() {
        assert!(Tag::new("vegan").is_dietary());
        assert!(Tag::new("diabetes-friendly").is_health_condition());
        assert!(!Tag::new("paleo").is_known());
    }

    #[test]
    fn tag_set_skips_blank_labels() {
        let tags = tag_set(["vegan", "", "  ", "VEGAN", "low-carb"]);
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn tags_deserialize_through_normalization() {
        let tag: Tag = serde_json::from_str("\"Low_Sodium\"").expect("tag should parse");
        assert_eq!(tag, Tag::new("low-sodium"));
        assert_eq!(serde_json::to_string(&tag).expect("tag should serialize"), "\"low-sodium\"");
    }
}
