use rust_decimal::Decimal;

use crate::domain::nutrition::NutritionRecord;
use crate::domain::recipe::{Difficulty, Recipe};
use crate::domain::tags::tag_set;

pub(crate) struct RecipeSeed {
    name: &'static str,
    cuisine: &'static str,
    difficulty: Difficulty,
    ingredients: &'static [&'static str],
    instructions: &'static [&'static str],
    nutrition: &'static [(&'static str, i64)],
    dietary_tags: &'static [&'static str],
    health_conditions: &'static [&'static str],
    servings: u32,
    cooking_time_minutes: u32,
}

impl RecipeSeed {
    pub(crate) fn to_recipe(&self) -> Recipe {
        Recipe {
            name: self.name.to_string(),
            cuisine: self.cuisine.to_string(),
            difficulty: self.difficulty,
            ingredients: self.ingredients.iter().map(|value| value.to_string()).collect(),
            instructions: self.instructions.iter().map(|value| value.to_string()).collect(),
            nutrition: NutritionRecord::from_amounts(
                self.nutrition.iter().map(|(name, amount)| (*name, Decimal::from(*amount))),
            ),
            dietary_tags: tag_set(self.dietary_tags),
            health_conditions: tag_set(self.health_conditions),
            servings: self.servings,
            cooking_time_minutes: self.cooking_time_minutes,
        }
    }
}

pub(crate) const BUNDLED_RECIPES: &[RecipeSeed] = &[
    RecipeSeed {
        name: "Mediterranean Quinoa Bowl",
        cuisine: "Mediterranean",
        difficulty: Difficulty::Easy,
        ingredients: &[
            "quinoa",
            "chickpeas",
            "cucumber",
            "tomatoes",
            "olives",
            "feta cheese",
            "olive oil",
            "lemon",
        ],
        instructions: &[
            "Cook quinoa according to package directions",
            "Drain and rinse chickpeas",
            "Chop cucumber and tomatoes",
            "Combine all ingredients in a bowl",
            "Drizzle with olive oil and lemon juice",
            "Season with salt and pepper",
        ],
        nutrition: &[
            ("calories", 420),
            ("protein", 18),
            ("carbs", 58),
            ("fat", 14),
            ("fiber", 12),
            ("sodium", 380),
        ],
        dietary_tags: &["vegetarian", "gluten-free", "high-protein"],
        health_conditions: &["diabetes-friendly", "heart-healthy", "weight-loss"],
        servings: 2,
        cooking_time_minutes: 25,
    },
    RecipeSeed {
        name: "Grilled Chicken with Herbs",
        cuisine: "American",
        difficulty: Difficulty::Medium,
        ingredients: &[
            "chicken breast",
            "rosemary",
            "thyme",
            "garlic",
            "olive oil",
            "lemon",
            "salt",
            "pepper",
        ],
        instructions: &[
            "Marinate chicken with herbs and olive oil for 30 minutes",
            "Preheat grill to medium-high heat",
            "Grill chicken for 6-7 minutes per side",
            "Check internal temperature reaches 165°F",
            "Let rest for 5 minutes before serving",
            "Garnish with fresh herbs",
        ],
        nutrition: &[
            ("calories", 285),
            ("protein", 35),
            ("carbs", 2),
            ("fat", 14),
            ("fiber", 0),
            ("sodium", 220),
        ],
        dietary_tags: &["high-protein", "low-carb", "keto-friendly"],
        health_conditions: &["diabetes-friendly", "weight-loss", "low-sodium"],
        servings: 4,
        cooking_time_minutes: 45,
    },
    RecipeSeed {
        name: "Vegetable Stir Fry",
        cuisine: "Asian",
        difficulty: Difficulty::Easy,
        ingredients: &[
            "broccoli",
            "bell peppers",
            "carrots",
            "snap peas",
            "ginger",
            "garlic",
            "soy sauce",
            "sesame oil",
        ],
        instructions: &[
            "Heat oil in a large wok or pan",
            "Add ginger and garlic, stir for 30 seconds",
            "Add harder vegetables first (carrots, broccoli)",
            "Stir-fry for 3-4 minutes",
            "Add softer vegetables (peppers, snap peas)",
            "Add soy sauce and sesame oil",
            "Stir-fry for 2-3 more minutes until tender-crisp",
        ],
        nutrition: &[
            ("calories", 120),
            ("protein", 5),
            ("carbs", 18),
            ("fat", 4),
            ("fiber", 6),
            ("sodium", 580),
        ],
        dietary_tags: &["vegetarian", "vegan", "low-calorie"],
        health_conditions: &["diabetes-friendly", "heart-healthy", "weight-loss"],
        servings: 3,
        cooking_time_minutes: 15,
    },
    RecipeSeed {
        name: "Spicy Lentil Curry",
        cuisine: "Indian",
        difficulty: Difficulty::Medium,
        ingredients: &[
            "red lentils",
            "onion",
            "tomatoes",
            "ginger",
            "garlic",
            "turmeric",
            "cumin",
            "coriander",
            "coconut milk",
            "chili",
        ],
        instructions: &[
            "Rinse lentils and set aside",
            "Heat oil and sauté onions until golden",
            "Add ginger, garlic, and spices",
            "Add tomatoes and cook until soft",
            "Add lentils and water, bring to boil",
            "Simmer for 20-25 minutes until lentils are soft",
            "Stir in coconut milk and chili, simmer 5 more minutes",
        ],
        nutrition: &[
            ("calories", 245),
            ("protein", 12),
            ("carbs", 35),
            ("fat", 8),
            ("fiber", 14),
            ("sodium", 240),
        ],
        dietary_tags: &["vegetarian", "vegan", "high-fiber", "high-protein", "spicy"],
        health_conditions: &["diabetes-friendly", "heart-healthy"],
        servings: 4,
        cooking_time_minutes: 40,
    },
    RecipeSeed {
        name: "Baked Salmon with Dill",
        cuisine: "Scandinavian",
        difficulty: Difficulty::Easy,
        ingredients: &["salmon fillet", "dill", "lemon", "olive oil", "garlic", "salt", "pepper"],
        instructions: &[
            "Preheat oven to 400°F",
            "Place salmon on parchment-lined baking sheet",
            "Drizzle with olive oil and lemon juice",
            "Season with salt, pepper, and minced garlic",
            "Top with fresh dill",
            "Bake for 12-15 minutes until fish flakes easily",
        ],
        nutrition: &[
            ("calories", 367),
            ("protein", 39),
            ("carbs", 1),
            ("fat", 22),
            ("fiber", 0),
            ("sodium", 180),
        ],
        dietary_tags: &["high-protein", "low-carb", "omega-3-rich", "keto-friendly"],
        health_conditions: &["heart-healthy", "low-sodium"],
        servings: 2,
        cooking_time_minutes: 20,
    },
    RecipeSeed {
        name: "Avocado Toast with Egg",
        cuisine: "American",
        difficulty: Difficulty::Easy,
        ingredients: &[
            "whole grain bread",
            "avocado",
            "egg",
            "lime",
            "salt",
            "pepper",
            "red pepper flakes",
        ],
        instructions: &[
            "Toast bread until golden brown",
            "Mash avocado with lime juice, salt, and pepper",
            "Fry or poach egg to desired doneness",
            "Spread avocado mixture on toast",
            "Top with egg",
            "Sprinkle with red pepper flakes",
        ],
        nutrition: &[
            ("calories", 340),
            ("protein", 14),
            ("carbs", 28),
            ("fat", 22),
            ("fiber", 12),
            ("sodium", 320),
        ],
        dietary_tags: &["vegetarian", "high-fiber", "healthy-fats"],
        health_conditions: &["heart-healthy", "weight-loss"],
        servings: 1,
        cooking_time_minutes: 10,
    },
    RecipeSeed {
        name: "Thai Green Curry",
        cuisine: "Thai",
        difficulty: Difficulty::Medium,
        ingredients: &[
            "chicken breast",
            "green curry paste",
            "coconut milk",
            "thai basil",
            "eggplant",
            "bamboo shoots",
            "fish sauce",
            "palm sugar",
        ],
        instructions: &[
            "Heat coconut milk in a wok until oil separates",
            "Add green curry paste and fry until fragrant",
            "Add chicken and cook until almost done",
            "Add vegetables and remaining coconut milk",
            "Season with fish sauce and palm sugar",
            "Simmer until vegetables are tender",
            "Garnish with thai basil",
        ],
        nutrition: &[
            ("calories", 380),
            ("protein", 28),
            ("carbs", 12),
            ("fat", 26),
            ("fiber", 4),
            ("sodium", 720),
        ],
        dietary_tags: &["spicy", "high-protein", "gluten-free"],
        health_conditions: &["diabetes-friendly"],
        servings: 4,
        cooking_time_minutes: 30,
    },
    RecipeSeed {
        name: "Greek Salad",
        cuisine: "Greek",
        difficulty: Difficulty::Easy,
        ingredients: &[
            "tomatoes",
            "cucumber",
            "red onion",
            "olives",
            "feta cheese",
            "olive oil",
            "oregano",
            "lemon juice",
        ],
        instructions: &[
            "Chop tomatoes, cucumber, and red onion",
            "Combine vegetables in a large bowl",
            "Add olives and crumbled feta cheese",
            "Drizzle with olive oil and lemon juice",
            "Season with oregano, salt, and pepper",
            "Toss gently and let marinate for 10 minutes",
        ],
        nutrition: &[
            ("calories", 180),
            ("protein", 6),
            ("carbs", 12),
            ("fat", 14),
            ("fiber", 4),
            ("sodium", 420),
        ],
        dietary_tags: &["vegetarian", "gluten-free", "low-calorie", "mediterranean"],
        health_conditions: &["heart-healthy", "weight-loss"],
        servings: 4,
        cooking_time_minutes: 15,
    },
    RecipeSeed {
        name: "Mushroom Risotto",
        cuisine: "Italian",
        difficulty: Difficulty::Hard,
        ingredients: &[
            "arborio rice",
            "mushrooms",
            "onion",
            "garlic",
            "white wine",
            "vegetable broth",
            "parmesan",
            "butter",
        ],
        instructions: &[
            "Sauté mushrooms and set aside",
            "Heat broth in a separate pan",
            "Sauté onion and garlic until soft",
            "Add rice and stir for 2 minutes",
            "Add wine and stir until absorbed",
            "Add warm broth one ladle at a time, stirring constantly",
            "Fold in mushrooms, butter, and parmesan",
        ],
        nutrition: &[
            ("calories", 420),
            ("protein", 12),
            ("carbs", 65),
            ("fat", 14),
            ("fiber", 3),
            ("sodium", 480),
        ],
        dietary_tags: &["vegetarian", "comfort-food"],
        health_conditions: &[],
        servings: 4,
        cooking_time_minutes: 45,
    },
    RecipeSeed {
        name: "Black Bean Tacos",
        cuisine: "Mexican",
        difficulty: Difficulty::Easy,
        ingredients: &[
            "black beans",
            "corn tortillas",
            "avocado",
            "lime",
            "cilantro",
            "red onion",
            "cumin",
            "chili powder",
        ],
        instructions: &[
            "Heat black beans with cumin and chili powder",
            "Warm tortillas in a dry pan",
            "Mash avocado with lime juice",
            "Dice red onion and chop cilantro",
            "Fill tortillas with beans",
            "Top with avocado, onion, and cilantro",
            "Serve with lime wedges",
        ],
        nutrition: &[
            ("calories", 320),
            ("protein", 14),
            ("carbs", 52),
            ("fat", 8),
            ("fiber", 16),
            ("sodium", 380),
        ],
        dietary_tags: &["vegetarian", "vegan", "high-fiber", "gluten-free"],
        health_conditions: &["diabetes-friendly", "heart-healthy", "weight-loss"],
        servings: 3,
        cooking_time_minutes: 20,
    },
];
