use crate::domain::recipe::Recipe;

const WHOLE_NAME_BONUS: f64 = 2.0;
const INGREDIENT_WEIGHT: f64 = 0.5;

/// Lexical relevance of `recipe` for a free-text query.
///
/// A whole-query match in the name scores at least 2.0, while partial term
/// matches top out at 1.5, so name hits always outrank ingredient-only hits.
/// Adding matched terms never lowers the score.
pub fn lexical_score(recipe: &Recipe, query: &str) -> f64 {
    let query = query.trim().to_lowercase();
    let terms: Vec<&str> = query.split_whitespace().collect();
    if terms.is_empty() {
        return 0.0;
    }

    let name = recipe.name.to_lowercase();
    let ingredients: Vec<String> =
        recipe.ingredients.iter().map(|ingredient| ingredient.to_lowercase()).collect();

    let term_count = terms.len() as f64;
    let in_name = terms.iter().filter(|term| name.contains(*term)).count() as f64;
    let in_ingredients = terms
        .iter()
        .filter(|term| ingredients.iter().any(|ingredient| ingredient.contains(*term)))
        .count() as f64;

    let phrase = terms.join(" ");
    let whole = if name.contains(phrase.as_str()) { WHOLE_NAME_BONUS } else { 0.0 };
    whole + in_name / term_count + INGREDIENT_WEIGHT * in_ingredients / term_count
}
