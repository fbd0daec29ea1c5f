use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::nutrition::{NutritionRecord, CALORIES, CARBS, FAT, FIBER, PROTEIN, SODIUM};
use crate::domain::tags::TagSet;
use crate::errors::DomainError;
use crate::nutrition::health::{health_scores, nutrient_density, round1};

/// Population whose recommended daily values are used for percentages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceCategory {
    #[default]
    AdultMale,
    AdultFemale,
    Child,
}

impl ReferenceCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AdultMale => "adult_male",
            Self::AdultFemale => "adult_female",
            Self::Child => "child",
        }
    }

    /// Recommended daily amount of `nutrient`, if one is defined.
    pub fn daily_value(self, nutrient: &str) -> Option<f64> {
        let (male, female, child) = match nutrient {
            "calories" => (2500.0, 2000.0, 1800.0),
            "protein" => (56.0, 46.0, 34.0),
            "carbs" => (325.0, 325.0, 260.0),
            "fat" => (78.0, 65.0, 62.0),
            "fiber" => (38.0, 25.0, 25.0),
            "sodium" => (2300.0, 2300.0, 1900.0),
            "sugar" => (36.0, 25.0, 25.0),
            "saturated_fat" => (20.0, 20.0, 18.0),
            _ => return None,
        };
        Some(match self {
            Self::AdultMale => male,
            Self::AdultFemale => female,
            Self::Child => child,
        })
    }
}

impl fmt::Display for ReferenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceCategory {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "adult_male" => Ok(Self::AdultMale),
            "adult_female" => Ok(Self::AdultFemale),
            "child" => Ok(Self::Child),
            other => Err(DomainError::InvalidArgument(format!(
                "unsupported reference category `{other}` (expected adult_male|adult_female|child)"
            ))),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroDistribution {
    pub protein_percent: f64,
    pub carbs_percent: f64,
    pub fat_percent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NutritionAnalysis {
    pub reference: ReferenceCategory,
    pub daily_value_percentages: BTreeMap<String, f64>,
    pub macronutrient_distribution: MacroDistribution,
    pub health_scores: BTreeMap<String, f64>,
    pub nutrient_density: f64,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

/// Full nutrition breakdown for one record.
///
/// `goals` are the reader's health conditions; they add condition-specific
/// advice on top of the general rules.
pub fn analyze(
    record: &NutritionRecord,
    reference: ReferenceCategory,
    goals: &TagSet,
) -> NutritionAnalysis {
    let daily_value_percentages: BTreeMap<String, f64> = record
        .amounts()
        .filter_map(|(name, _)| {
            let amount = record.amount_f64(name)?;
            let daily = reference.daily_value(name)?;
            Some((name.to_string(), round1(amount / daily * 100.0)))
        })
        .collect();

    let (recommendations, warnings) = advise(record, &daily_value_percentages, goals);

    NutritionAnalysis {
        reference,
        macronutrient_distribution: macro_distribution(record),
        health_scores: health_scores(record),
        nutrient_density: nutrient_density(record),
        daily_value_percentages,
        recommendations,
        warnings,
    }
}

/// Share of calories from protein and carbs (4 kcal/g) and fat (9 kcal/g).
pub fn macro_distribution(record: &NutritionRecord) -> MacroDistribution {
    let calories = record.amount_or_zero(CALORIES);
    if calories <= 0.0 {
        return MacroDistribution::default();
    }
    let share = |grams: f64, kcal_per_gram: f64| round1(grams * kcal_per_gram / calories * 100.0);
    MacroDistribution {
        protein_percent: share(record.amount_or_zero(PROTEIN), 4.0),
        carbs_percent: share(record.amount_or_zero(CARBS), 4.0),
        fat_percent: share(record.amount_or_zero(FAT), 9.0),
    }
}

fn advise(
    record: &NutritionRecord,
    daily: &BTreeMap<String, f64>,
    goals: &TagSet,
) -> (Vec<String>, Vec<String>) {
    let mut recommendations = Vec::new();
    let mut warnings = Vec::new();
    let percent_of = |nutrient: &str| daily.get(nutrient).copied().unwrap_or(0.0);

    let calories = record.amount_or_zero(CALORIES);
    if calories < 200.0 {
        recommendations.push(
            "Consider adding healthy fats or complex carbs to increase calorie content".to_string(),
        );
    } else if calories > 600.0 {
        recommendations.push(
            "High-calorie recipe: reduce the portion size or balance it with lighter meals"
                .to_string(),
        );
    }

    let protein_percent = percent_of(PROTEIN);
    if protein_percent > 30.0 {
        recommendations
            .push("Excellent protein source for muscle maintenance and satiety".to_string());
    } else if protein_percent < 10.0 {
        recommendations
            .push("Consider adding protein sources like beans, nuts, or lean meat".to_string());
    }

    let fiber = record.amount_or_zero(FIBER);
    if fiber > 10.0 {
        recommendations
            .push("High fiber content promotes digestive health and satiety".to_string());
    } else if fiber < 3.0 {
        recommendations.push(
            "Consider adding vegetables, fruits, or whole grains for more fiber".to_string(),
        );
    }

    if percent_of(SODIUM) > 25.0 {
        warnings.push(
            "High sodium content: reduce salt or season with herbs and spices".to_string(),
        );
    }

    if record.amount_or_zero(FAT) > 25.0 {
        warnings.push(
            "High fat content: favour healthy fats such as olive oil, nuts, or avocado"
                .to_string(),
        );
    }

    let has_goal = |goal: &str| goals.iter().any(|tag| tag.as_str() == goal);
    if has_goal("weight-loss") && calories > 400.0 {
        recommendations.push(
            "For weight loss, reduce the portion size or add more vegetables".to_string(),
        );
    }
    if has_goal("diabetes-friendly") && record.amount_or_zero(CARBS) > 45.0 {
        warnings.push("High carbohydrate content: monitor blood sugar".to_string());
    }
    if has_goal("heart-healthy") && record.amount_or_zero(SODIUM) > 400.0 {
        warnings.push("Reduce sodium for better heart health".to_string());
    }

    (recommendations, warnings)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{analyze, macro_distribution, ReferenceCategory};
    use crate::catalog::RecipeStore;
    use crate::domain::nutrition::NutritionRecord;
    use crate::domain::tags::{tag_set, TagSet};
    use crate::errors::DomainError;

    #[test]
    fn daily_values_follow_reference_category() {
        let record = NutritionRecord::from_amounts([
            ("calories", Decimal::from(500)),
            ("protein", Decimal::from(23)),
        ])
        .with_note("source", "estimated");

        let male = analyze(&record, ReferenceCategory::AdultMale, &TagSet::new());
        let female = analyze(&record, ReferenceCategory::AdultFemale, &TagSet::new());

        assert_eq!(male.daily_value_percentages.get("calories"), Some(&20.0));
        assert_eq!(female.daily_value_percentages.get("calories"), Some(&25.0));
        assert_eq!(female.daily_value_percentages.get("protein"), Some(&50.0));
        assert!(!male.daily_value_percentages.contains_key("source"));
    }

    #[test]
    fn macro_split_uses_calorie_factors() {
        let record = NutritionRecord::from_amounts([
            ("calories", Decimal::from(400)),
            ("protein", Decimal::from(20)),
            ("carbs", Decimal::from(50)),
            ("fat", Decimal::from(10)),
        ]);

        let split = macro_distribution(&record);
        assert_eq!(split.protein_percent, 20.0);
        assert_eq!(split.carbs_percent, 50.0);
        assert_eq!(split.fat_percent, 22.5);

        assert_eq!(macro_distribution(&NutritionRecord::new()).fat_percent, 0.0);
    }

    #[test]
    fn thai_curry_warns_about_sodium_and_fat() {
        let store = RecipeStore::bundled();
        let curry = &store.get("Thai Green Curry").expect("recipe").nutrition;

        let analysis = analyze(curry, ReferenceCategory::AdultMale, &tag_set(["heart-healthy"]));

        assert_eq!(analysis.warnings.len(), 3);
        assert!(analysis.warnings.iter().any(|warning| warning.contains("sodium")));
        assert!(analysis.warnings.iter().any(|warning| warning.contains("fat")));
        assert_eq!(analysis.health_scores.get("heart-healthy"), Some(&94.0));
    }

    #[test]
    fn goals_add_condition_specific_advice() {
        let store = RecipeStore::bundled();
        let risotto = &store.get("Mushroom Risotto").expect("recipe").nutrition;

        let plain = analyze(risotto, ReferenceCategory::Child, &TagSet::new());
        let goals = tag_set(["weight-loss", "diabetes-friendly"]);
        let tailored = analyze(risotto, ReferenceCategory::Child, &goals);

        assert_eq!(tailored.recommendations.len(), plain.recommendations.len() + 1);
        assert_eq!(tailored.warnings.len(), plain.warnings.len() + 1);
    }

    #[test]
    fn reference_category_parses_both_spellings() {
        assert_eq!("adult-female".parse::<ReferenceCategory>(), Ok(ReferenceCategory::AdultFemale));
        assert_eq!(" CHILD ".parse::<ReferenceCategory>(), Ok(ReferenceCategory::Child));
        assert!(matches!(
            "teen".parse::<ReferenceCategory>(),
            Err(DomainError::InvalidArgument(_))
        ));
    }
}
