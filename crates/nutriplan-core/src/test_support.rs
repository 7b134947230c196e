//! Shared fixtures for unit tests.

use std::sync::Arc;

use crate::knowledge::KnowledgeBase;
use crate::types::{FoodItem, MealSlot};

/// A food item with the given macros (protein, carbs, fat).
pub fn food(
    name: &str,
    slot: MealSlot,
    calories: f64,
    macros: (f64, f64, f64),
    tags: &[&str],
) -> FoodItem {
    FoodItem {
        name: name.to_string(),
        description: format!("{} (fixture)", name),
        meal_slot: slot,
        calories,
        protein: macros.0,
        carbs: macros.1,
        fat: macros.2,
        ingredient_tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// Four balanced items per slot, near 500/800/700 kcal.
pub const PLAN_KB_YAML: &str = r#"
version: "1.0"
foods:
  - { name: "b_avena", meal_slot: breakfast, calories: 480, protein: 25, carbs: 60, fat: 15, ingredient_tags: ["avena", "plátano"] }
  - { name: "b_huevos", meal_slot: breakfast, calories: 500, protein: 30, carbs: 50, fat: 20, ingredient_tags: ["huevos", "pan integral"] }
  - { name: "b_yogurt", meal_slot: breakfast, calories: 520, protein: 25, carbs: 60, fat: 15, ingredient_tags: ["yogurt", "granola"] }
  - { name: "b_nueces", meal_slot: breakfast, calories: 540, protein: 20, carbs: 55, fat: 25, ingredient_tags: ["nueces", "miel"] }
  - { name: "l_pollo", meal_slot: lunch, calories: 760, protein: 30, carbs: 50, fat: 20, ingredient_tags: ["pollo", "arroz"] }
  - { name: "l_lentejas", meal_slot: lunch, calories: 800, protein: 25, carbs: 60, fat: 15, ingredient_tags: ["lentejas", "tomate"] }
  - { name: "l_salmon", meal_slot: lunch, calories: 840, protein: 35, carbs: 45, fat: 20, ingredient_tags: ["salmón", "quinoa"] }
  - { name: "l_pavo", meal_slot: lunch, calories: 780, protein: 30, carbs: 55, fat: 15, ingredient_tags: ["pavo", "pasta"] }
  - { name: "d_garbanzos", meal_slot: dinner, calories: 660, protein: 20, carbs: 60, fat: 20, ingredient_tags: ["garbanzos", "zanahoria"] }
  - { name: "d_pescado", meal_slot: dinner, calories: 700, protein: 35, carbs: 45, fat: 20, ingredient_tags: ["pescado", "lechuga"] }
  - { name: "d_tortilla", meal_slot: dinner, calories: 740, protein: 25, carbs: 50, fat: 25, ingredient_tags: ["huevos", "espinaca"] }
  - { name: "d_curry", meal_slot: dinner, calories: 720, protein: 30, carbs: 55, fat: 15, ingredient_tags: ["pollo", "curry"] }
ingredients: []
recipes: []
"#;

/// Exactly two admissible lunches, one lunch with nuts, and a single
/// breakfast and dinner.
pub const TWO_LUNCH_KB_YAML: &str = r#"
version: "1.0"
foods:
  - { name: "b_huevos", meal_slot: breakfast, calories: 500, protein: 30, carbs: 50, fat: 20, ingredient_tags: ["huevos"] }
  - { name: "l_pollo", meal_slot: lunch, calories: 800, protein: 30, carbs: 50, fat: 20, ingredient_tags: ["pollo", "arroz"] }
  - { name: "l_tofu", meal_slot: lunch, calories: 820, protein: 25, carbs: 60, fat: 15, ingredient_tags: ["tofu", "arroz"] }
  - { name: "l_nueces", meal_slot: lunch, calories: 790, protein: 20, carbs: 55, fat: 25, ingredient_tags: ["nueces", "pasta"] }
  - { name: "d_sopa", meal_slot: dinner, calories: 700, protein: 20, carbs: 60, fat: 20, ingredient_tags: ["garbanzos"] }
ingredients: []
recipes: []
"#;

/// A small catalog with protein, carb, vegetable, fat and dairy entries and
/// one template per slot/difficulty combination the tests need.
pub const RECIPE_KB_YAML: &str = r#"
version: "1.0"
foods: []
ingredients:
  - { key: "pollo", name: "pechuga de pollo", quantity_label: "150g", calories: 165, protein: 31, carbs: 0, fat: 3.6, category: protein, alternatives: ["pavo", "tofu"] }
  - { key: "pavo", name: "pechuga de pavo", quantity_label: "150g", calories: 135, protein: 30, carbs: 0, fat: 1, category: protein }
  - { key: "tofu", name: "tofu firme", quantity_label: "150g", calories: 144, protein: 15, carbs: 3, fat: 8, fiber: 2, category: protein }
  - { key: "huevo", name: "huevos", quantity_label: "2 unidades", calories: 140, protein: 12, carbs: 1, fat: 10, category: protein, alternatives: ["tofu"] }
  - { key: "arroz", name: "arroz integral", quantity_label: "1 taza", calories: 216, protein: 5, carbs: 45, fat: 1.8, fiber: 3.5, category: carb, alternatives: ["quinoa"] }
  - { key: "quinoa", name: "quinoa", quantity_label: "1 taza", calories: 222, protein: 8, carbs: 39, fat: 3.6, fiber: 5, category: carb }
  - { key: "brocoli", name: "brócoli", quantity_label: "1 taza", calories: 55, protein: 3.7, carbs: 11, fat: 0.6, fiber: 5, category: vegetable, alternatives: ["espinaca"] }
  - { key: "espinaca", name: "espinaca", quantity_label: "2 tazas", calories: 23, protein: 2.9, carbs: 3.6, fat: 0.4, fiber: 2.2, category: vegetable }
  - { key: "aceite", name: "aceite de oliva", quantity_label: "1 cucharada", calories: 119, protein: 0, carbs: 0, fat: 13.5, category: fat }
  - { key: "leche", name: "leche", quantity_label: "1 taza", calories: 83, protein: 8, carbs: 12, fat: 0.2, category: dairy, alternatives: ["bebida_avena"] }
  - { key: "bebida_avena", name: "bebida de avena", quantity_label: "1 taza", calories: 120, protein: 3, carbs: 16, fat: 5, fiber: 2, category: dairy }
recipes:
  - id: "alm_001"
    name: "Pollo con arroz y brócoli"
    description: "Plato completo y equilibrado"
    meal_slot: lunch
    difficulty: medium
    prep_time: "30 min"
    ingredients: ["pollo", "arroz", "brocoli", "aceite"]
    steps:
      - "Cocinar la pechuga de pollo a la plancha"
      - "Hervir el arroz integral"
      - "Saltear el brócoli con aceite de oliva"
      - "Servir la Pechuga de Pollo con el arroz integral"
    tags: ["alto en proteína"]
    tips: "Marinar el pollo la noche anterior"
    variations:
      - name: "Vegetariana"
        changes:
          - { original: "pechuga de pollo", replacement: "tofu firme" }
  - id: "alm_002"
    name: "Ensalada de quinoa"
    meal_slot: lunch
    difficulty: easy
    prep_time: "15 min"
    ingredients: ["quinoa", "espinaca", "aceite"]
    steps: ["Cocer la quinoa", "Mezclar con la espinaca y el aceite de oliva"]
    tags: ["vegano"]
  - id: "des_001"
    name: "Huevos con espinaca"
    meal_slot: breakfast
    difficulty: easy
    prep_time: "10 min"
    ingredients: ["huevo", "espinaca"]
    steps: ["Batir los huevos", "Cocinar los huevos con la espinaca"]
  - id: "des_002"
    name: "Avena con leche"
    meal_slot: breakfast
    difficulty: medium
    prep_time: "10 min"
    ingredients:
      - { name: "avena", quantity_label: "50g", calories: 190, protein: 7, carbs: 33, fat: 3.4, fiber: 5, category: carb }
      - "leche"
    steps: ["Calentar la leche en la lechera", "Añadir la avena y cocinar 5 minutos"]
  - id: "cen_001"
    name: "Tofu salteado"
    meal_slot: dinner
    difficulty: easy
    prep_time: "20 min"
    ingredients: ["tofu", "brocoli", "aceite"]
    steps: ["Dorar el tofu firme", "Añadir el brócoli"]
"#;

pub fn plan_kb() -> Arc<KnowledgeBase> {
    Arc::new(KnowledgeBase::from_yaml(PLAN_KB_YAML).unwrap())
}

pub fn two_lunch_kb() -> Arc<KnowledgeBase> {
    Arc::new(KnowledgeBase::from_yaml(TWO_LUNCH_KB_YAML).unwrap())
}

pub fn recipe_kb() -> Arc<KnowledgeBase> {
    Arc::new(KnowledgeBase::from_yaml(RECIPE_KB_YAML).unwrap())
}
