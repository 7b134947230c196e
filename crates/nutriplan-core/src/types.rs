//! Core types for nutriplan.
//!
//! Knowledge-base facts (`FoodItem`, `Ingredient`, `RecipeTemplate`) use
//! snake_case field names, matching the YAML data files. Engine outputs
//! (`DayPlan`, `Recipe`, `EngineStats`) serialize in camelCase for API
//! consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string does not name a known enum variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// The meal a food item or recipe is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    /// The slots a day plan is made of, in serving order.
    pub const PLAN_SLOTS: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snack => "snack",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = ParseEnumError;

    /// Accepts the English names and the Spanish names used by the
    /// mobile client (`desayuno`, `almuerzo`, `cena`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" | "desayuno" => Ok(MealSlot::Breakfast),
            "lunch" | "almuerzo" => Ok(MealSlot::Lunch),
            "dinner" | "cena" => Ok(MealSlot::Dinner),
            "snack" => Ok(MealSlot::Snack),
            _ => Err(ParseEnumError::new("meal slot", s)),
        }
    }
}

/// How demanding a recipe is to prepare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "fácil" | "facil" => Ok(Difficulty::Easy),
            "medium" | "intermedio" => Ok(Difficulty::Medium),
            "hard" | "avanzado" => Ok(Difficulty::Hard),
            _ => Err(ParseEnumError::new("difficulty", s)),
        }
    }
}

/// Broad grouping of ingredients, used for same-category substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    Protein,
    Carb,
    Vegetable,
    Fat,
    Condiment,
    Dairy,
}

impl IngredientCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Protein => "protein",
            IngredientCategory::Carb => "carb",
            IngredientCategory::Vegetable => "vegetable",
            IngredientCategory::Fat => "fat",
            IngredientCategory::Condiment => "condiment",
            IngredientCategory::Dairy => "dairy",
        }
    }
}

impl FromStr for IngredientCategory {
    type Err = ParseEnumError;

    /// Accepts the English names and the Spanish ones used in recipe data
    /// (`proteina`, `lacteo`, ...), with or without accents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "protein" | "proteina" | "proteína" => Ok(IngredientCategory::Protein),
            "carb" | "carbohidrato" => Ok(IngredientCategory::Carb),
            "vegetable" | "verdura" | "vegetal" => Ok(IngredientCategory::Vegetable),
            "fat" | "grasa" => Ok(IngredientCategory::Fat),
            "condiment" | "condimento" => Ok(IngredientCategory::Condiment),
            "dairy" | "lacteo" | "lácteo" => Ok(IngredientCategory::Dairy),
            _ => Err(ParseEnumError::new("ingredient category", s)),
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which filtering pass admitted a selected food item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptTier {
    /// All predicates at the strict calorie tolerance.
    Strict,
    /// Macro balance dropped and the calorie tolerance widened.
    Relaxed,
}

/// A user's weight goal, used to derive the daily calorie target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl FromStr for Goal {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lose" => Ok(Goal::Lose),
            "maintain" => Ok(Goal::Maintain),
            "gain" => Ok(Goal::Gain),
            _ => Err(ParseEnumError::new("goal", s)),
        }
    }
}

/// A dish that can fill a plan slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    /// Unique key (e.g., "avena_frutas_nueces")
    pub name: String,

    /// Human-readable name shown in plans
    #[serde(default)]
    pub description: String,

    pub meal_slot: MealSlot,

    /// kcal
    pub calories: f64,

    /// Grams of protein
    pub protein: f64,

    /// Grams of carbohydrate
    pub carbs: f64,

    /// Grams of fat
    pub fat: f64,

    /// Lowercase ingredient names, first tag is the main ingredient
    #[serde(default)]
    pub ingredient_tags: Vec<String>,
}

impl FoodItem {
    /// The description when present, the key otherwise.
    pub fn display_name(&self) -> &str {
        if self.description.trim().is_empty() {
            &self.name
        } else {
            &self.description
        }
    }
}

/// A recipe ingredient with its nutrition for the quantity given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub name: String,

    /// Free-form amount (e.g., "150g", "2 cucharadas")
    pub quantity_label: String,

    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,

    #[serde(default)]
    pub fiber: f64,

    pub category: IngredientCategory,

    /// Catalog keys of acceptable replacements, in preference order
    #[serde(default)]
    pub alternatives: Vec<String>,
}

/// An ingredient catalog entry: a lookup key plus the ingredient itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub key: String,

    #[serde(flatten)]
    pub ingredient: Ingredient,
}

/// A single ingredient swap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Substitution {
    pub original: String,
    pub replacement: String,
}

/// A named, optional set of swaps suggested alongside a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Variation {
    pub name: String,

    #[serde(default)]
    pub changes: Vec<Substitution>,
}

/// A fixed recipe from the knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeTemplate {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub meal_slot: MealSlot,
    pub difficulty: Difficulty,

    #[serde(default)]
    pub prep_time: String,

    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub tips: String,

    #[serde(default)]
    pub variations: Vec<Variation>,
}

/// What a user cannot or will not eat.
///
/// Allergies and unwanted foods filter identically. Preferences are carried
/// for callers but never filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RestrictionSet {
    pub allergies: BTreeSet<String>,
    pub unwanted_foods: BTreeSet<String>,
    pub preferences: BTreeSet<String>,
}

impl RestrictionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allergy(mut self, term: impl Into<String>) -> Self {
        self.allergies.insert(term.into());
        self
    }

    pub fn with_unwanted(mut self, term: impl Into<String>) -> Self {
        self.unwanted_foods.insert(term.into());
        self
    }

    pub fn with_preference(mut self, term: impl Into<String>) -> Self {
        self.preferences.insert(term.into());
        self
    }

    /// Allergies and unwanted foods, trimmed and lowercased.
    ///
    /// Blank entries are dropped: an empty term would otherwise match
    /// every ingredient by substring.
    pub fn active_terms(&self) -> Vec<String> {
        self.allergies
            .iter()
            .chain(self.unwanted_foods.iter())
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// True if nothing is filtered out.
    pub fn is_unrestricted(&self) -> bool {
        self.active_terms().is_empty()
    }
}

/// A food item chosen for a plan slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMeal {
    /// Fresh identifier, `<food>-<uuid>`
    pub id: String,

    /// Display name
    pub name: String,

    /// Key of the food item this meal was resolved from
    pub food: String,

    pub slot: MealSlot,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub ingredients: Vec<String>,
    pub tier: AttemptTier,
}

/// One day of a meal plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// 1-based day index
    pub day: u32,
    pub breakfast: ResolvedMeal,
    pub lunch: ResolvedMeal,
    pub dinner: ResolvedMeal,

    /// No meal repeated within the day
    pub variety_ok: bool,

    /// Enough distinct main ingredients within the day
    pub diversity_ok: bool,
}

impl DayPlan {
    pub fn meals(&self) -> [&ResolvedMeal; 3] {
        [&self.breakfast, &self.lunch, &self.dinner]
    }

    pub fn total_calories(&self) -> f64 {
        self.meals().iter().map(|m| m.calories).sum()
    }
}

/// A complete multi-day plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub generated_at: DateTime<Utc>,
    pub daily_calorie_target: f64,
    pub days: Vec<DayPlan>,
}

/// Per-serving nutrition of a generated recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NutritionFacts {
    pub calories: i64,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    pub fiber: String,
}

/// An ingredient line as presented in a generated recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: String,
}

/// A recipe generated for a request, adapted to its restrictions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub template_id: String,
    pub name: String,
    pub description: String,
    pub slot: MealSlot,
    pub prep_time: String,
    pub difficulty: Difficulty,
    pub servings: u32,
    pub ingredients: Vec<RecipeIngredient>,
    pub steps: Vec<String>,
    pub nutrition: NutritionFacts,
    pub tags: Vec<String>,
    pub tips: String,
    pub variations: Vec<Variation>,

    /// Swaps applied to fit the request's restrictions
    pub substitutions: Vec<Substitution>,
}

/// One day of a weekly recipe plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyRecipeDay {
    /// Day name (e.g., "Monday")
    pub day: String,
    pub breakfast: Recipe,
    pub lunch: Recipe,
    pub dinner: Recipe,
}

/// Counts describing a knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngineStats {
    pub total_recipes: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_difficulty: BTreeMap<String, usize>,
    pub total_ingredients: usize,
    pub total_foods: usize,
    pub foods_by_slot: BTreeMap<String, usize>,
}
