use rust_decimal::Decimal;

use crate::domain::substitution::SubstitutionRule;
use crate::domain::tags::tag_set;

pub(crate) struct RuleSeed {
    source: &'static str,
    target: &'static str,
    /// (mantissa, scale) for `Decimal::new`.
    ratio: (i64, u32),
    tags: &'static [&'static str],
    rationale: &'static str,
}

impl RuleSeed {
    pub(crate) fn to_rule(&self) -> SubstitutionRule {
        SubstitutionRule {
            source: self.source.to_string(),
            target: self.target.to_string(),
            ratio: Decimal::new(self.ratio.0, self.ratio.1),
            tags: tag_set(self.tags),
            rationale: self.rationale.to_string(),
        }
    }
}

const ONE: (i64, u32) = (1, 0);
const THREE_QUARTERS: (i64, u32) = (75, 2);
const HALF: (i64, u32) = (5, 1);
const QUARTER: (i64, u32) = (25, 2);
const EIGHTH: (i64, u32) = (125, 3);

macro_rules! rule {
    ($source:literal => $target:literal, $ratio:expr, [$($tag:literal),* $(,)?], $why:literal) => {
        RuleSeed {
            source: $source,
            target: $target,
            ratio: $ratio,
            tags: &[$($tag),*],
            rationale: $why,
        }
    };
}

pub(crate) const BUNDLED_RULES: &[RuleSeed] = &[
    // proteins
    rule!("chicken breast" => "turkey breast", ONE, ["high-protein", "low-fat", "weight-loss"],
        "Lean poultry with the same cooking time"),
    rule!("chicken breast" => "firm tofu", ONE, ["vegan", "vegetarian", "dairy-free", "heart-healthy"],
        "Press well before cooking so it browns"),
    rule!("chicken breast" => "tempeh", ONE, ["vegan", "vegetarian", "high-protein", "high-fiber"],
        "Fermented soy with a firm, nutty bite"),
    rule!("chicken breast" => "seitan", ONE, ["vegan", "vegetarian", "high-protein"],
        "Wheat gluten; not suitable for gluten-free diets"),
    rule!("ground beef" => "ground turkey", ONE, ["low-fat", "high-protein", "heart-healthy"],
        "Choose 93/7 for the leanest result"),
    rule!("ground beef" => "lentils", ONE,
        ["vegan", "vegetarian", "high-fiber", "low-fat", "heart-healthy", "diabetes-friendly"],
        "Cooked lentils hold sauce like crumbled mince"),
    rule!("ground beef" => "mushrooms", ONE, ["vegan", "vegetarian", "low-calorie", "weight-loss"],
        "Finely chopped and browned for umami"),
    rule!("ground beef" => "black beans", ONE, ["vegan", "vegetarian", "high-fiber"],
        "Mash lightly for burgers and tacos"),
    rule!("salmon" => "trout", ONE, ["omega-3-rich", "high-protein", "heart-healthy"],
        "Similar oily fish, cooks slightly faster"),
    rule!("salmon" => "mackerel", ONE, ["omega-3-rich", "high-protein"],
        "Stronger flavour, rich in omega-3"),
    rule!("salmon" => "firm tofu", ONE, ["vegan", "vegetarian", "dairy-free"],
        "Marinate with lemon and dill"),
    rule!("salmon" => "canned tuna", ONE, ["high-protein", "low-fat"],
        "Budget option for salads and bowls"),
    // dairy
    rule!("milk" => "almond milk", ONE, ["vegan", "dairy-free", "low-calorie", "weight-loss"],
        "Use unsweetened for savoury dishes"),
    rule!("milk" => "oat milk", ONE, ["vegan", "dairy-free", "heart-healthy"],
        "Creamy texture, good for sauces"),
    rule!("milk" => "soy milk", ONE, ["vegan", "dairy-free", "high-protein"],
        "Closest protein content to dairy milk"),
    rule!("milk" => "skim milk", ONE, ["vegetarian", "low-fat"],
        "Same flavour with less fat"),
    rule!("butter" => "olive oil", THREE_QUARTERS,
        ["vegan", "dairy-free", "heart-healthy", "healthy-fats"],
        "Use three quarters of the butter quantity"),
    rule!("butter" => "coconut oil", THREE_QUARTERS, ["vegan", "dairy-free", "keto-friendly"],
        "Solid when cool, works in baking"),
    rule!("butter" => "vegan butter", ONE, ["vegan", "dairy-free"],
        "Drop-in replacement for spreading and baking"),
    rule!("butter" => "applesauce", HALF, ["low-fat", "low-calorie", "weight-loss"],
        "Baking only; adds moisture and sweetness"),
    rule!("butter" => "greek yogurt", HALF, ["vegetarian", "low-fat", "high-protein"],
        "Baking only; adds tang"),
    rule!("heavy cream" => "coconut cream", ONE, ["vegan", "dairy-free", "keto-friendly"],
        "Rich and thick, with a mild coconut note"),
    rule!("heavy cream" => "cashew cream", ONE, ["vegan", "dairy-free"],
        "Blend soaked cashews with water"),
    rule!("heavy cream" => "silken tofu", ONE, ["vegan", "dairy-free", "low-fat", "high-protein"],
        "Blend until smooth for soups"),
    rule!("heavy cream" => "evaporated skim milk", ONE, ["vegetarian", "low-fat", "weight-loss"],
        "Does not whip"),
    // grains and starches
    rule!("white rice" => "brown rice", ONE,
        ["vegan", "gluten-free", "high-fiber", "diabetes-friendly"],
        "Longer cooking time, lower glycemic load"),
    rule!("white rice" => "quinoa", ONE, ["vegan", "gluten-free", "high-protein", "high-fiber"],
        "Complete protein, cooks in 15 minutes"),
    rule!("white rice" => "cauliflower rice", ONE,
        ["vegan", "low-carb", "keto-friendly", "low-calorie", "diabetes-friendly", "weight-loss"],
        "Saute briefly; do not boil"),
    rule!("white rice" => "shirataki rice", ONE, ["vegan", "low-carb", "keto-friendly", "low-calorie"],
        "Rinse well before cooking"),
    rule!("pasta" => "whole wheat pasta", ONE, ["vegan", "high-fiber"],
        "Nuttier taste, more fiber"),
    rule!("pasta" => "rice pasta", ONE, ["vegan", "gluten-free"],
        "Cook al dente; softens quickly"),
    rule!("pasta" => "zucchini noodles", ONE,
        ["vegan", "gluten-free", "low-carb", "keto-friendly", "low-calorie", "weight-loss",
            "diabetes-friendly"],
        "Toss raw or warm for one minute"),
    rule!("pasta" => "spaghetti squash", ONE, ["vegan", "gluten-free", "low-carb", "low-calorie"],
        "Roast and shred with a fork"),
    rule!("bread" => "whole grain bread", ONE, ["vegan", "high-fiber", "diabetes-friendly"],
        "Lower glycemic impact than white bread"),
    rule!("bread" => "rice bread", ONE, ["gluten-free"],
        "Best toasted"),
    rule!("bread" => "corn tortillas", ONE, ["vegan", "gluten-free"],
        "Warm in a dry pan"),
    rule!("bread" => "lettuce wraps", ONE, ["vegan", "low-carb", "keto-friendly", "low-calorie", "weight-loss"],
        "Use large butter lettuce leaves"),
    rule!("quinoa" => "brown rice", ONE, ["vegan", "gluten-free"],
        "Milder flavour, longer cooking time"),
    rule!("quinoa" => "bulgur wheat", ONE, ["vegan", "high-fiber"],
        "Soaks rather than simmers; contains gluten"),
    rule!("quinoa" => "cauliflower rice", ONE, ["vegan", "low-carb", "keto-friendly", "low-calorie", "weight-loss"],
        "Much lower in carbs and calories"),
    rule!("quinoa" => "farro", ONE, ["vegan", "high-fiber", "high-protein"],
        "Chewy ancient grain; contains gluten"),
    rule!("flour" => "almond flour", ONE, ["gluten-free", "low-carb", "keto-friendly"],
        "Denser crumb; add an extra egg for structure"),
    rule!("flour" => "coconut flour", QUARTER, ["gluten-free", "low-carb", "keto-friendly", "high-fiber"],
        "Very absorbent; use a quarter of the quantity"),
    rule!("flour" => "oat flour", ONE, ["vegan", "high-fiber", "heart-healthy"],
        "Certified oats are needed for gluten-free diets"),
    rule!("flour" => "rice flour", ONE, ["vegan", "gluten-free"],
        "Best blended with a starch"),
    // sweeteners
    rule!("sugar" => "honey", THREE_QUARTERS, ["vegetarian"],
        "Liquid sweetener; reduce other liquids slightly"),
    rule!("sugar" => "maple syrup", THREE_QUARTERS, ["vegan"],
        "Liquid sweetener; reduce other liquids slightly"),
    rule!("sugar" => "stevia", (2, 2),
        ["vegan", "diabetes-friendly", "low-calorie", "keto-friendly", "weight-loss"],
        "Zero calories; far sweeter than sugar"),
    rule!("sugar" => "monk fruit", ONE, ["vegan", "diabetes-friendly", "keto-friendly", "low-calorie"],
        "Granulated blends measure one to one"),
    // fats and oils
    rule!("olive oil" => "avocado oil", ONE, ["vegan", "healthy-fats", "heart-healthy"],
        "Higher smoke point for searing"),
    rule!("olive oil" => "canola oil", ONE, ["vegan", "heart-healthy"],
        "Neutral flavour"),
    rule!("olive oil" => "grapeseed oil", ONE, ["vegan"],
        "Neutral flavour, high smoke point"),
    // vegetables and aromatics
    rule!("onion" => "shallots", ONE, ["vegan"],
        "Milder and sweeter"),
    rule!("onion" => "leeks", ONE, ["vegan"],
        "Use the white and light green parts"),
    rule!("onion" => "green onion tops", ONE, ["vegan", "low-fodmap"],
        "Green parts only for low-FODMAP diets"),
    rule!("onion" => "chives", ONE, ["vegan", "low-fodmap"],
        "Add at the end of cooking"),
    rule!("garlic" => "garlic powder", EIGHTH, ["vegan"],
        "One clove equals an eighth teaspoon of powder"),
    rule!("garlic" => "garlic-infused oil", ONE, ["vegan", "low-fodmap"],
        "Carries the flavour without the fructans"),
    rule!("garlic" => "asafoetida", EIGHTH, ["vegan", "low-fodmap", "gluten-free"],
        "A pinch goes a long way"),
    rule!("garlic" => "ginger", ONE, ["vegan", "low-fodmap"],
        "Different flavour, similar warmth"),
    // seasonings and sauces
    rule!("salt" => "herbs and spices", ONE, ["vegan", "low-sodium", "heart-healthy"],
        "Build flavour without sodium"),
    rule!("salt" => "lemon juice", ONE, ["vegan", "low-sodium", "heart-healthy"],
        "Acid brightens flavours like salt does"),
    rule!("salt" => "potassium salt", ONE, ["low-sodium"],
        "Check with a doctor if on potassium-restricted diets"),
    rule!("soy sauce" => "tamari", ONE, ["vegan", "gluten-free"],
        "Brewed without wheat"),
    rule!("soy sauce" => "coconut aminos", ONE, ["vegan", "gluten-free", "low-sodium", "heart-healthy"],
        "Sweeter, with far less sodium"),
    rule!("soy sauce" => "low-sodium soy sauce", ONE, ["vegan", "low-sodium", "heart-healthy"],
        "Same flavour with less sodium"),
    rule!("coconut milk" => "cashew cream", ONE, ["vegan", "dairy-free"],
        "Neutral, rich body"),
    rule!("coconut milk" => "light coconut milk", ONE, ["vegan", "low-fat", "low-calorie", "weight-loss"],
        "Same flavour, roughly half the fat"),
    rule!("coconut milk" => "oat milk", ONE, ["vegan", "dairy-free", "low-fat"],
        "Thinner; simmer to reduce"),
    rule!("coconut milk" => "greek yogurt", ONE, ["vegetarian", "high-protein"],
        "Stir in off the heat to avoid curdling"),
    rule!("feta cheese" => "goat cheese", ONE, ["vegetarian", "gluten-free"],
        "Similar tang, softer texture"),
    rule!("feta cheese" => "cottage cheese", ONE, ["vegetarian", "high-protein", "low-fat"],
        "Milder; season with extra salt-free herbs"),
    rule!("feta cheese" => "nutritional yeast", QUARTER, ["vegan", "dairy-free"],
        "Sprinkle for a cheesy flavour"),
    rule!("eggs" => "flax eggs", ONE, ["vegan", "dairy-free", "high-fiber", "heart-healthy"],
        "One tablespoon ground flax plus three of water per egg"),
    rule!("eggs" => "chia eggs", ONE, ["vegan", "high-fiber", "omega-3-rich"],
        "Let the gel rest for five minutes"),
    rule!("eggs" => "egg whites", (2, 0), ["vegetarian", "low-fat", "high-protein", "heart-healthy"],
        "Two whites per whole egg"),
    rule!("lentils" => "chickpeas", ONE, ["vegan", "high-fiber", "high-protein"],
        "Holds shape in curries"),
    rule!("lentils" => "black beans", ONE, ["vegan", "high-fiber"],
        "Earthier flavour"),
    rule!("lentils" => "split peas", ONE, ["vegan", "high-fiber", "low-fat"],
        "Cooks down similarly to red lentils"),
    rule!("lentils" => "quinoa", ONE, ["vegan", "gluten-free", "high-protein"],
        "Lighter texture"),
];
