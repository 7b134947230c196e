//! Knowledge-base parsing from YAML/JSON.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::schema::validate_knowledge_base_schema;
use crate::types::{
    CatalogEntry, Difficulty, EngineStats, FoodItem, Ingredient, MealSlot, RecipeTemplate,
    Variation,
};

/// Errors that can occur when loading a knowledge base.
#[derive(Error, Debug)]
pub enum KnowledgeBaseError {
    #[error("Failed to read knowledge base file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Schema validation failed: {}", .0.join("; "))]
    SchemaError(Vec<String>),

    #[error("Knowledge base validation failed: {0}")]
    ValidationError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Recipe '{recipe}' references unknown ingredient '{key}'")]
    UnknownIngredient { recipe: String, key: String },
}

/// A recipe ingredient as written in a document: a catalog key or a
/// one-off inline ingredient.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IngredientRef {
    Key(String),
    Inline(Ingredient),
}

#[derive(Debug, Clone, Deserialize)]
struct RecipeDocument {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    meal_slot: MealSlot,
    difficulty: Difficulty,
    #[serde(default)]
    prep_time: String,
    ingredients: Vec<IngredientRef>,
    steps: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    tips: String,
    #[serde(default)]
    variations: Vec<Variation>,
}

#[derive(Debug, Clone, Deserialize)]
struct KnowledgeBaseDocument {
    version: String,
    #[serde(default)]
    foods: Vec<FoodItem>,
    #[serde(default)]
    ingredients: Vec<CatalogEntry>,
    #[serde(default)]
    recipes: Vec<RecipeDocument>,
}

/// The immutable facts the engine reasons over.
///
/// Share it between requests with `Arc<KnowledgeBase>`; nothing mutates it
/// after loading.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    version: String,
    foods: Vec<FoodItem>,
    catalog: Vec<CatalogEntry>,
    recipes: Vec<RecipeTemplate>,
    index: HashMap<String, usize>,
}

impl KnowledgeBase {
    /// Parse a knowledge base from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, KnowledgeBaseError> {
        let value: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }

    /// Parse a knowledge base from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, KnowledgeBaseError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse a knowledge base from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, KnowledgeBaseError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a knowledge base from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, KnowledgeBaseError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load a file, choosing the format by extension (`.json` is JSON,
    /// anything else YAML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, KnowledgeBaseError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path),
            _ => Self::from_yaml_file(path),
        }
    }

    /// Build a knowledge base from already-resolved parts.
    pub fn from_parts(
        version: impl Into<String>,
        foods: Vec<FoodItem>,
        catalog: Vec<CatalogEntry>,
        recipes: Vec<RecipeTemplate>,
    ) -> Result<Self, KnowledgeBaseError> {
        let index = catalog
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.key.clone(), i))
            .collect();

        let kb = Self {
            version: version.into(),
            foods,
            catalog,
            recipes,
            index,
        };
        kb.validate()?;
        Ok(kb)
    }

    fn from_value(value: serde_json::Value) -> Result<Self, KnowledgeBaseError> {
        validate_knowledge_base_schema(&value).map_err(KnowledgeBaseError::SchemaError)?;

        let document: KnowledgeBaseDocument = serde_json::from_value(value)?;
        Self::from_document(document)
    }

    fn from_document(document: KnowledgeBaseDocument) -> Result<Self, KnowledgeBaseError> {
        let catalog: HashMap<&str, &Ingredient> = document
            .ingredients
            .iter()
            .map(|entry| (entry.key.as_str(), &entry.ingredient))
            .collect();

        let mut recipes = Vec::with_capacity(document.recipes.len());
        for recipe in &document.recipes {
            let mut ingredients = Vec::with_capacity(recipe.ingredients.len());
            for reference in &recipe.ingredients {
                match reference {
                    IngredientRef::Key(key) => match catalog.get(key.as_str()) {
                        Some(ingredient) => ingredients.push((*ingredient).clone()),
                        None => {
                            return Err(KnowledgeBaseError::UnknownIngredient {
                                recipe: recipe.id.clone(),
                                key: key.clone(),
                            })
                        }
                    },
                    IngredientRef::Inline(ingredient) => ingredients.push(ingredient.clone()),
                }
            }

            recipes.push(RecipeTemplate {
                id: recipe.id.clone(),
                name: recipe.name.clone(),
                description: recipe.description.clone(),
                meal_slot: recipe.meal_slot,
                difficulty: recipe.difficulty,
                prep_time: recipe.prep_time.clone(),
                ingredients,
                steps: recipe.steps.clone(),
                tags: recipe.tags.clone(),
                tips: recipe.tips.clone(),
                variations: recipe.variations.clone(),
            });
        }

        Self::from_parts(document.version, document.foods, document.ingredients, recipes)
    }

    /// Validate names, uniqueness and nutrition values.
    fn validate(&self) -> Result<(), KnowledgeBaseError> {
        if self.version.trim().is_empty() {
            return Err(KnowledgeBaseError::MissingField("version".to_string()));
        }

        let mut seen = HashSet::new();
        for (i, food) in self.foods.iter().enumerate() {
            if food.name.trim().is_empty() {
                return Err(KnowledgeBaseError::MissingField(format!("foods[{}].name", i)));
            }
            if !seen.insert(food.name.as_str()) {
                return Err(KnowledgeBaseError::ValidationError(format!(
                    "Duplicate food name: {}",
                    food.name
                )));
            }
            check_amounts(
                &food.name,
                &[food.calories, food.protein, food.carbs, food.fat],
            )?;
        }

        if self.index.len() != self.catalog.len() {
            let mut keys = HashSet::new();
            for entry in &self.catalog {
                if !keys.insert(entry.key.as_str()) {
                    return Err(KnowledgeBaseError::ValidationError(format!(
                        "Duplicate ingredient key: {}",
                        entry.key
                    )));
                }
            }
        }
        for (i, entry) in self.catalog.iter().enumerate() {
            if entry.key.trim().is_empty() {
                return Err(KnowledgeBaseError::MissingField(format!("ingredients[{}].key", i)));
            }
            check_ingredient(&entry.key, &entry.ingredient)?;
        }

        let mut ids = HashSet::new();
        for (i, recipe) in self.recipes.iter().enumerate() {
            if recipe.id.trim().is_empty() {
                return Err(KnowledgeBaseError::MissingField(format!("recipes[{}].id", i)));
            }
            if recipe.name.trim().is_empty() {
                return Err(KnowledgeBaseError::MissingField(format!("recipes[{}].name", i)));
            }
            if !ids.insert(recipe.id.as_str()) {
                return Err(KnowledgeBaseError::ValidationError(format!(
                    "Duplicate recipe id: {}",
                    recipe.id
                )));
            }
            if recipe.ingredients.is_empty() {
                return Err(KnowledgeBaseError::ValidationError(format!(
                    "Recipe '{}' has no ingredients",
                    recipe.id
                )));
            }
            for ingredient in &recipe.ingredients {
                check_ingredient(&recipe.id, ingredient)?;
            }
        }

        Ok(())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    /// Look up a food item by name.
    pub fn food(&self, name: &str) -> Option<&FoodItem> {
        self.foods.iter().find(|f| f.name == name)
    }

    /// Catalog entries in knowledge-base order.
    pub fn ingredients(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    /// Look up a catalog ingredient by key.
    pub fn ingredient(&self, key: &str) -> Option<&Ingredient> {
        self.index.get(key).map(|&i| &self.catalog[i].ingredient)
    }

    pub fn recipes(&self) -> &[RecipeTemplate] {
        &self.recipes
    }

    /// Counts of recipes, ingredients and foods.
    pub fn stats(&self) -> EngineStats {
        let mut by_type = BTreeMap::new();
        for slot in MealSlot::ALL {
            let count = self.recipes.iter().filter(|r| r.meal_slot == slot).count();
            by_type.insert(slot.to_string(), count);
        }

        let mut by_difficulty = BTreeMap::new();
        for difficulty in Difficulty::ALL {
            let count = self
                .recipes
                .iter()
                .filter(|r| r.difficulty == difficulty)
                .count();
            by_difficulty.insert(difficulty.to_string(), count);
        }

        let mut foods_by_slot = BTreeMap::new();
        for slot in MealSlot::PLAN_SLOTS {
            let count = self.foods.iter().filter(|f| f.meal_slot == slot).count();
            foods_by_slot.insert(slot.to_string(), count);
        }

        EngineStats {
            total_recipes: self.recipes.len(),
            by_type,
            by_difficulty,
            total_ingredients: self.catalog.len(),
            total_foods: self.foods.len(),
            foods_by_slot,
        }
    }
}

fn check_ingredient(owner: &str, ingredient: &Ingredient) -> Result<(), KnowledgeBaseError> {
    if ingredient.name.trim().is_empty() {
        return Err(KnowledgeBaseError::MissingField(format!(
            "{}: ingredient name",
            owner
        )));
    }
    check_amounts(
        owner,
        &[
            ingredient.calories,
            ingredient.protein,
            ingredient.carbs,
            ingredient.fat,
            ingredient.fiber,
        ],
    )
}

fn check_amounts(owner: &str, amounts: &[f64]) -> Result<(), KnowledgeBaseError> {
    if amounts.iter().any(|a| !a.is_finite() || *a < 0.0) {
        return Err(KnowledgeBaseError::ValidationError(format!(
            "{}: nutrition values must be non-negative numbers",
            owner
        )));
    }
    Ok(())
}
