//! Rewrites a recipe for one profile: dietary swaps, spice level, allergen
//! warnings and skill-level tips.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{normalize_allergen, CookingSkill, SpiceLevel, UserProfile};
use crate::domain::recipe::Recipe;
use crate::domain::substitution::SubstitutionConstraints;
use crate::domain::tags::{Tag, TagSet};
use crate::substitution::SubstitutionTable;

const PLANT_QUALIFIERS: &[&str] = &[
    "coconut", "almond", "oat", "soy", "rice", "cashew", "vegan", "plant", "peanut", "nutritional",
];
const GLUTEN_FREE_QUALIFIERS: &[&str] = &["rice", "almond", "coconut", "corn", "gluten-free"];
const EGG_FREE_QUALIFIERS: &[&str] = &["flax", "chia", "vegan"];

const SPICY_TERMS: &[&str] =
    &["chili", "chilli", "pepper", "hot sauce", "cayenne", "paprika", "jalapeno", "curry paste"];
const EXTRA_SPICE: &str = "extra chili flakes (to taste)";

const BEGINNER_TIPS: &[&str] = &[
    "Take your time with each step",
    "Prep all ingredients before starting",
    "Don't hesitate to taste and adjust seasoning",
];
const ADVANCED_TIPS: &[&str] = &[
    "Consider making your own spice blends",
    "Try different cooking techniques for variation",
    "Experiment with ingredient ratios to taste",
];

/// An ingredient family that breaks some dietary restrictions.
struct Conflict {
    term: &'static str,
    restrictions: &'static [&'static str],
    fallback: &'static str,
    exempt: &'static [&'static str],
}

const MEAT: &[&str] = &["vegetarian", "vegan"];
const DAIRY: &[&str] = &["vegan", "dairy-free"];
const ANIMAL: &[&str] = &["vegan"];
const GLUTEN: &[&str] = &["gluten-free"];

const CONFLICTS: &[Conflict] = &[
    Conflict { term: "chicken", restrictions: MEAT, fallback: "firm tofu", exempt: &[] },
    Conflict { term: "beef", restrictions: MEAT, fallback: "lentils", exempt: &[] },
    Conflict { term: "pork", restrictions: MEAT, fallback: "jackfruit", exempt: &[] },
    Conflict { term: "bacon", restrictions: MEAT, fallback: "smoked tempeh", exempt: &[] },
    Conflict { term: "salmon", restrictions: MEAT, fallback: "firm tofu", exempt: &[] },
    Conflict { term: "fish", restrictions: MEAT, fallback: "soy sauce with seaweed", exempt: &[] },
    Conflict { term: "shrimp", restrictions: MEAT, fallback: "king oyster mushrooms", exempt: &[] },
    Conflict { term: "milk", restrictions: DAIRY, fallback: "oat milk", exempt: PLANT_QUALIFIERS },
    Conflict {
        term: "cheese",
        restrictions: DAIRY,
        fallback: "nutritional yeast",
        exempt: PLANT_QUALIFIERS,
    },
    Conflict {
        term: "parmesan",
        restrictions: DAIRY,
        fallback: "nutritional yeast",
        exempt: PLANT_QUALIFIERS,
    },
    Conflict {
        term: "butter",
        restrictions: DAIRY,
        fallback: "olive oil",
        exempt: PLANT_QUALIFIERS,
    },
    Conflict {
        term: "cream",
        restrictions: DAIRY,
        fallback: "coconut cream",
        exempt: PLANT_QUALIFIERS,
    },
    Conflict {
        term: "yogurt",
        restrictions: DAIRY,
        fallback: "coconut yogurt",
        exempt: PLANT_QUALIFIERS,
    },
    Conflict {
        term: "egg",
        restrictions: ANIMAL,
        fallback: "egg replacer",
        exempt: EGG_FREE_QUALIFIERS,
    },
    Conflict { term: "honey", restrictions: ANIMAL, fallback: "maple syrup", exempt: &[] },
    Conflict {
        term: "flour",
        restrictions: GLUTEN,
        fallback: "gluten-free flour blend",
        exempt: GLUTEN_FREE_QUALIFIERS,
    },
    Conflict {
        term: "pasta",
        restrictions: GLUTEN,
        fallback: "rice noodles",
        exempt: GLUTEN_FREE_QUALIFIERS,
    },
    Conflict {
        term: "bread",
        restrictions: GLUTEN,
        fallback: "gluten-free bread",
        exempt: GLUTEN_FREE_QUALIFIERS,
    },
    Conflict {
        term: "soy sauce",
        restrictions: GLUTEN,
        fallback: "tamari",
        exempt: &["gluten-free"],
    },
    Conflict { term: "couscous", restrictions: GLUTEN, fallback: "quinoa", exempt: &[] },
];

/// Ingredient families checked for each known allergen.
struct Allergen {
    name: &'static str,
    terms: &'static [&'static str],
    exempt: &'static [&'static str],
    advice: &'static str,
}

const ALLERGENS: &[Allergen] = &[
    Allergen {
        name: "nuts",
        terms: &[
            "nut", "almond", "cashew", "walnut", "pecan", "peanut", "hazelnut", "pistachio",
        ],
        exempt: &[],
        advice: "use seeds or leave out",
    },
    Allergen {
        name: "dairy",
        terms: &["milk", "cheese", "parmesan", "feta", "butter", "cream", "yogurt"],
        exempt: PLANT_QUALIFIERS,
        advice: "use dairy-free alternatives",
    },
    Allergen {
        name: "gluten",
        terms: &["flour", "pasta", "bread", "soy sauce", "couscous", "wheat"],
        exempt: GLUTEN_FREE_QUALIFIERS,
        advice: "use gluten-free alternatives",
    },
    Allergen {
        name: "soy",
        terms: &["soy", "tofu", "tempeh", "edamame", "miso"],
        exempt: &[],
        advice: "use soy-free alternatives",
    },
    Allergen {
        name: "eggs",
        terms: &["egg"],
        exempt: EGG_FREE_QUALIFIERS,
        advice: "use an egg replacer",
    },
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IngredientSwap {
    pub original: String,
    pub replacement: String,
    /// Profile restrictions the original ingredient broke.
    pub restrictions: TagSet,
    /// Quantity ratio when the replacement came from the substitution table.
    pub ratio: Option<Decimal>,
    pub rationale: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AllergenWarning {
    pub allergen: String,
    pub ingredients: Vec<String>,
    pub advice: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AdaptedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub swaps: Vec<IngredientSwap>,
    pub allergen_warnings: Vec<AllergenWarning>,
    pub notes: Vec<String>,
    pub tips: Vec<String>,
}

/// Copy of `recipe` rewritten for `profile`. Dietary swaps run first so that
/// allergen warnings reflect the adapted ingredient list.
pub fn adapt_recipe(
    recipe: &Recipe,
    profile: &UserProfile,
    table: &SubstitutionTable,
) -> AdaptedRecipe {
    let mut adapted = recipe.clone();
    let mut notes = Vec::new();

    let swaps = apply_swaps(&mut adapted.ingredients, &profile.dietary_restrictions, table);

    match profile.spice_level {
        SpiceLevel::Mild => {
            let mut reduced = false;
            for ingredient in adapted.ingredients.iter_mut() {
                let lower = ingredient.to_lowercase();
                let spicy = SPICY_TERMS.iter().any(|term| mentions(&lower, term));
                if spicy && !mentions(&lower, "bell") {
                    *ingredient = format!("{ingredient} (reduced)");
                    reduced = true;
                }
            }
            if reduced {
                notes.push("Spice level reduced for mild preference".to_string());
            }
        }
        SpiceLevel::Hot => {
            adapted.ingredients.push(EXTRA_SPICE.to_string());
            notes.push("Spice level increased for hot preference".to_string());
        }
        SpiceLevel::Medium => {}
    }

    let allergen_warnings = profile
        .allergens
        .iter()
        .filter_map(|allergen| allergen_warning(&adapted.ingredients, allergen))
        .collect();

    let tips: &[&str] = match profile.cooking_skill {
        CookingSkill::Beginner => BEGINNER_TIPS,
        CookingSkill::Intermediate => &[],
        CookingSkill::Advanced => ADVANCED_TIPS,
    };

    AdaptedRecipe {
        recipe: adapted,
        swaps,
        allergen_warnings,
        notes,
        tips: tips.iter().map(|tip| tip.to_string()).collect(),
    }
}

fn apply_swaps(
    ingredients: &mut [String],
    restrictions: &TagSet,
    table: &SubstitutionTable,
) -> Vec<IngredientSwap> {
    if restrictions.is_empty() {
        return Vec::new();
    }

    let mut swaps = Vec::new();
    for ingredient in ingredients.iter_mut() {
        let lower = ingredient.to_lowercase();
        let conflicts: Vec<(&Conflict, TagSet)> = CONFLICTS
            .iter()
            .filter(|conflict| mentions(&lower, conflict.term))
            .filter(|conflict| !conflict.exempt.iter().any(|word| mentions(&lower, word)))
            .map(|conflict| {
                let broken: TagSet = conflict
                    .restrictions
                    .iter()
                    .map(|tag| Tag::new(tag))
                    .filter(|tag| restrictions.contains(tag))
                    .collect();
                (conflict, broken)
            })
            .filter(|(_, broken)| !broken.is_empty())
            .collect();
        let Some((first, _)) = conflicts.first() else {
            continue;
        };
        let fallback = first.fallback;
        let broken: TagSet = conflicts.iter().flat_map(|(_, tags)| tags.iter().cloned()).collect();

        let constraints =
            SubstitutionConstraints { dietary_tags: broken.clone(), ..Default::default() };
        let rule = table
            .find(&lower, &constraints)
            .into_iter()
            .find(|rule| broken.iter().all(|tag| rule.serves(tag)));

        let swap = match rule {
            Some(rule) => IngredientSwap {
                original: ingredient.clone(),
                replacement: rule.target.clone(),
                restrictions: broken,
                ratio: Some(rule.ratio),
                rationale: Some(rule.rationale.clone()),
            },
            None => IngredientSwap {
                original: ingredient.clone(),
                replacement: fallback.to_string(),
                restrictions: broken,
                ratio: None,
                rationale: None,
            },
        };
        *ingredient = swap.replacement.clone();
        swaps.push(swap);
    }
    swaps
}

fn allergen_warning(ingredients: &[String], allergen: &str) -> Option<AllergenWarning> {
    let allergen = normalize_allergen(allergen);
    let known = ALLERGENS.iter().find(|entry| entry.name == allergen);
    let (terms, exempt, advice) = match known {
        Some(entry) => (entry.terms.to_vec(), entry.exempt, entry.advice.to_string()),
        None => (vec![allergen.as_str()], &[][..], format!("leave out or replace the {allergen}")),
    };

    let found: Vec<String> = ingredients
        .iter()
        .filter(|ingredient| {
            let lower = ingredient.to_lowercase();
            terms.iter().any(|term| mentions(&lower, term))
                && !exempt.iter().any(|word| mentions(&lower, word))
        })
        .cloned()
        .collect();

    (!found.is_empty()).then(|| AllergenWarning {
        allergen: allergen.clone(),
        ingredients: found,
        advice,
    })
}

/// Whole-word match of `term` in a lowercase ingredient. Single words also
/// match their plural; terms with a space or hyphen match as substrings.
fn mentions(ingredient: &str, term: &str) -> bool {
    if term.contains([' ', '-']) {
        return ingredient.contains(term);
    }
    ingredient
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| {
            word == term
                || word.strip_suffix('s') == Some(term)
                || word.strip_suffix("es") == Some(term)
        })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{adapt_recipe, mentions};
    use crate::catalog::RecipeStore;
    use crate::domain::tags::Tag;
    use crate::preferences::{CookingSkill, SpiceLevel, UserProfile};
    use crate::substitution::SubstitutionTable;

    fn adapt(name: &str, profile: &UserProfile) -> super::AdaptedRecipe {
        let store = RecipeStore::bundled();
        let recipe = store.get(name).expect("bundled recipe");
        adapt_recipe(recipe, profile, &SubstitutionTable::bundled())
    }

    #[test]
    fn vegan_swaps_prefer_table_rules_then_fallbacks() {
        let profile = UserProfile::new().with_dietary_restriction("vegan");

        let risotto = adapt("Mushroom Risotto", &profile);

        let butter = risotto.swaps.iter().find(|swap| swap.original == "butter").expect("swap");
        assert_eq!(butter.replacement, "olive oil");
        assert_eq!(butter.ratio, Some(Decimal::new(75, 2)));
        let parmesan =
            risotto.swaps.iter().find(|swap| swap.original == "parmesan").expect("swap");
        assert_eq!(parmesan.replacement, "nutritional yeast");
        assert_eq!(parmesan.ratio, None);
        assert!(risotto.recipe.ingredients.contains(&"olive oil".to_string()));
        assert!(!risotto.recipe.ingredients.contains(&"butter".to_string()));
    }

    #[test]
    fn vegetarian_swaps_keep_plant_ingredients() {
        let profile = UserProfile::new().with_dietary_restriction("vegetarian");

        let curry = adapt("Thai Green Curry", &profile);

        let originals: Vec<&str> = curry.swaps.iter().map(|swap| swap.original.as_str()).collect();
        assert_eq!(originals, vec!["chicken breast", "fish sauce"]);
        assert_eq!(curry.swaps[0].replacement, "firm tofu");
        assert!(curry.swaps[0].restrictions.contains(&Tag::new("vegetarian")));
        assert!(curry.recipe.ingredients.contains(&"coconut milk".to_string()));
    }

    #[test]
    fn eggs_resolve_through_the_table() {
        let profile = UserProfile::new().with_dietary_restriction("vegan");

        let toast = adapt("Avocado Toast with Egg", &profile);

        assert_eq!(toast.swaps.len(), 1);
        assert_eq!(toast.swaps[0].replacement, "flax eggs");
    }

    #[test]
    fn allergen_warnings_follow_adapted_ingredients() {
        let dairy = UserProfile::new().with_allergen("milk");
        let salad = adapt("Greek Salad", &dairy);
        assert_eq!(salad.allergen_warnings.len(), 1);
        assert_eq!(salad.allergen_warnings[0].allergen, "dairy");
        assert_eq!(salad.allergen_warnings[0].ingredients, vec!["feta cheese"]);

        let vegan_dairy =
            UserProfile::new().with_dietary_restriction("vegan").with_allergen("dairy");
        assert!(adapt("Mushroom Risotto", &vegan_dairy).allergen_warnings.is_empty());

        let eggs = UserProfile::new().with_allergen("eggs");
        assert!(adapt("Thai Green Curry", &eggs).allergen_warnings.is_empty());
    }

    #[test]
    fn spice_level_adjusts_ingredients() {
        let mild = UserProfile::new().with_spice_level(SpiceLevel::Mild);
        let stir_fry = adapt("Vegetable Stir Fry", &mild);
        assert!(stir_fry.notes.is_empty());
        assert!(stir_fry.recipe.ingredients.contains(&"bell peppers".to_string()));

        let curry = adapt("Spicy Lentil Curry", &mild);
        assert!(curry.recipe.ingredients.contains(&"chili (reduced)".to_string()));
        assert_eq!(curry.notes, vec!["Spice level reduced for mild preference"]);

        let hot = adapt("Greek Salad", &UserProfile::new().with_spice_level(SpiceLevel::Hot));
        assert_eq!(
            hot.recipe.ingredients.last().map(String::as_str),
            Some("extra chili flakes (to taste)")
        );
        assert_eq!(hot.notes, vec!["Spice level increased for hot preference"]);
    }

    #[test]
    fn tips_depend_on_cooking_skill() {
        let beginner = adapt("Greek Salad", &UserProfile::new());
        assert_eq!(beginner.tips.len(), 3);

        let intermediate = UserProfile::new().with_cooking_skill(CookingSkill::Intermediate);
        assert!(adapt("Greek Salad", &intermediate).tips.is_empty());

        let advanced = UserProfile::new().with_cooking_skill(CookingSkill::Advanced);
        let tips = adapt("Greek Salad", &advanced).tips;
        assert_eq!(tips[0], "Consider making your own spice blends");
    }

    #[test]
    fn mentions_matches_whole_words_and_plurals() {
        assert!(mentions("chicken breast", "chicken"));
        assert!(mentions("eggs", "egg"));
        assert!(!mentions("eggplant", "egg"));
        assert!(!mentions("coconut milk", "nut"));
        assert!(mentions("light soy sauce", "soy sauce"));
        assert!(mentions("tomatoes", "tomato"));
    }
}
