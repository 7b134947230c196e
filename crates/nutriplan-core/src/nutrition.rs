//! Per-serving nutrition of a recipe.

use crate::types::{Ingredient, NutritionFacts};

/// Sum the ingredients' nutrition and divide by `servings`, rounding each
/// field to the nearest whole number. `servings` below 1 counts as 1.
pub fn compute_nutrition(ingredients: &[Ingredient], servings: u32) -> NutritionFacts {
    let servings = f64::from(servings.max(1));

    let mut calories = 0.0;
    let mut protein = 0.0;
    let mut carbs = 0.0;
    let mut fat = 0.0;
    let mut fiber = 0.0;
    for ingredient in ingredients {
        calories += ingredient.calories;
        protein += ingredient.protein;
        carbs += ingredient.carbs;
        fat += ingredient.fat;
        fiber += ingredient.fiber;
    }

    NutritionFacts {
        calories: (calories / servings).round() as i64,
        protein: grams(protein / servings),
        carbs: grams(carbs / servings),
        fat: grams(fat / servings),
        fiber: grams(fiber / servings),
    }
}

fn grams(value: f64) -> String {
    format!("{}g", value.round() as i64)
}
