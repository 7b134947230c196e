//! Recipe generation from adapted templates.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::knowledge::KnowledgeBase;
use crate::nutrition::compute_nutrition;
use crate::substitution::{Adaptation, SubstitutionResolver};
use crate::types::{
    Difficulty, MealSlot, Recipe, RecipeIngredient, RestrictionSet, WeeklyRecipeDay,
};
use crate::EngineError;

pub const DEFAULT_SERVINGS: u32 = 2;

/// Day names of a weekly recipe plan, Monday first.
pub const WEEK_DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const NO_COMPATIBLE_RECIPE: &str =
    "No recipes are compatible with your restrictions. Try more flexible options.";

fn default_servings() -> u32 {
    DEFAULT_SERVINGS
}

/// Parameters of a recipe request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    pub slot: MealSlot,
    pub difficulty: Difficulty,

    /// Accepted and logged; does not filter templates
    #[serde(default)]
    pub cooking_time: Option<String>,

    #[serde(default = "default_servings")]
    pub servings: u32,

    /// Accepted and logged; does not filter templates
    #[serde(default)]
    pub available_ingredients: Vec<String>,

    #[serde(default)]
    pub restrictions: RestrictionSet,
}

impl RecipeRequest {
    pub fn new(slot: MealSlot, difficulty: Difficulty) -> Self {
        Self {
            slot,
            difficulty,
            cooking_time: None,
            servings: DEFAULT_SERVINGS,
            available_ingredients: Vec::new(),
            restrictions: RestrictionSet::default(),
        }
    }

    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }

    pub fn with_cooking_time(mut self, cooking_time: impl Into<String>) -> Self {
        self.cooking_time = Some(cooking_time.into());
        self
    }

    pub fn with_available_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.available_ingredients = ingredients;
        self
    }

    pub fn with_restrictions(mut self, restrictions: RestrictionSet) -> Self {
        self.restrictions = restrictions;
        self
    }
}

/// Generates recipes from the templates of a knowledge base.
pub struct RecipeGenerator<'kb> {
    knowledge: &'kb KnowledgeBase,
    substitution: SubstitutionResolver<'kb>,
}

impl<'kb> RecipeGenerator<'kb> {
    pub fn new(knowledge: &'kb KnowledgeBase, config: &EngineConfig) -> Self {
        Self {
            knowledge,
            substitution: SubstitutionResolver::new(knowledge, config.step_rewrite),
        }
    }

    /// Templates for `slot` (and `difficulty`, when given) that can be
    /// adapted to `restrictions`, in knowledge-base order.
    pub fn candidates(
        &self,
        slot: MealSlot,
        difficulty: Option<Difficulty>,
        restrictions: &RestrictionSet,
    ) -> Vec<Adaptation> {
        self.knowledge
            .recipes()
            .iter()
            .filter(|t| t.meal_slot == slot)
            .filter(|t| difficulty.map_or(true, |d| t.difficulty == d))
            .filter_map(|t| self.substitution.adapt_recipe_traced(t, restrictions))
            .collect()
    }

    /// Generate one recipe for `request`.
    ///
    /// Falls back to any difficulty when no template of the requested one
    /// survives adaptation.
    pub fn generate_recipe<R: Rng + ?Sized>(
        &self,
        request: &RecipeRequest,
        rng: &mut R,
    ) -> Result<Recipe, EngineError> {
        if request.servings == 0 {
            return Err(EngineError::InvalidRequest(
                "servings must be at least 1".to_string(),
            ));
        }

        info!(
            slot = %request.slot,
            difficulty = %request.difficulty,
            servings = request.servings,
            cooking_time = ?request.cooking_time,
            available = ?request.available_ingredients,
            "Generating recipe"
        );

        let mut pool = self.candidates(request.slot, Some(request.difficulty), &request.restrictions);
        if pool.is_empty() {
            info!(slot = %request.slot, difficulty = %request.difficulty, "No template at this difficulty, relaxing");
            pool = self.candidates(request.slot, None, &request.restrictions);
        }
        if pool.is_empty() {
            warn!(slot = %request.slot, "No compatible recipe");
            return Err(EngineError::NoCompatibleRecipe(NO_COMPATIBLE_RECIPE.to_string()));
        }

        let picked = pool.swap_remove(rng.gen_range(0..pool.len()));
        let recipe = format_recipe(picked, request.servings);
        info!(recipe = %recipe.template_id, calories = recipe.nutrition.calories, "Recipe generated");
        Ok(recipe)
    }

    /// Breakfast, lunch and dinner for each day of the week, two servings
    /// each. Lunch alternates easy and medium; the first failure aborts.
    pub fn weekly_recipe_plan<R: Rng + ?Sized>(
        &self,
        restrictions: &RestrictionSet,
        rng: &mut R,
    ) -> Result<Vec<WeeklyRecipeDay>, EngineError> {
        let mut week = Vec::with_capacity(WEEK_DAYS.len());

        for (i, day) in WEEK_DAYS.iter().enumerate() {
            let lunch_difficulty = if i % 2 == 0 {
                Difficulty::Easy
            } else {
                Difficulty::Medium
            };

            let breakfast = self.generate_recipe(
                &meal_request(MealSlot::Breakfast, Difficulty::Easy, restrictions),
                rng,
            )?;
            let lunch = self.generate_recipe(
                &meal_request(MealSlot::Lunch, lunch_difficulty, restrictions),
                rng,
            )?;
            let dinner = self.generate_recipe(
                &meal_request(MealSlot::Dinner, Difficulty::Easy, restrictions),
                rng,
            )?;

            week.push(WeeklyRecipeDay {
                day: day.to_string(),
                breakfast,
                lunch,
                dinner,
            });
        }

        info!(days = week.len(), "Weekly recipe plan generated");
        Ok(week)
    }

    /// A fresh recipe for one plan slot: medium difficulty for lunch, easy
    /// otherwise.
    pub fn regenerate_meal<R: Rng + ?Sized>(
        &self,
        slot: MealSlot,
        restrictions: &RestrictionSet,
        rng: &mut R,
    ) -> Result<Recipe, EngineError> {
        let difficulty = match slot {
            MealSlot::Breakfast | MealSlot::Dinner => Difficulty::Easy,
            MealSlot::Lunch => Difficulty::Medium,
            MealSlot::Snack => {
                return Err(EngineError::InvalidRequest(format!(
                    "cannot regenerate a {} meal",
                    slot
                )))
            }
        };

        self.generate_recipe(&meal_request(slot, difficulty, restrictions), rng)
    }
}

fn meal_request(slot: MealSlot, difficulty: Difficulty, restrictions: &RestrictionSet) -> RecipeRequest {
    let cooking_time = if slot == MealSlot::Lunch { "45" } else { "30" };
    RecipeRequest::new(slot, difficulty)
        .with_cooking_time(cooking_time)
        .with_restrictions(restrictions.clone())
}

fn format_recipe(adaptation: Adaptation, servings: u32) -> Recipe {
    let template = adaptation.template;
    let nutrition = compute_nutrition(&template.ingredients, servings);
    let ingredients = template
        .ingredients
        .iter()
        .map(|i| RecipeIngredient {
            name: i.name.clone(),
            quantity: i.quantity_label.clone(),
        })
        .collect();

    Recipe {
        id: format!("{}-{}", template.id, Uuid::new_v4()),
        template_id: template.id,
        name: template.name,
        description: template.description,
        slot: template.meal_slot,
        prep_time: template.prep_time,
        difficulty: template.difficulty,
        servings,
        ingredients,
        steps: template.steps,
        nutrition,
        tags: template.tags,
        tips: template.tips,
        variations: template.variations,
        substitutions: adaptation.substitutions,
    }
}
