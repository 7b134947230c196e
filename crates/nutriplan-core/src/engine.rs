//! Per-request engine facade.

use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::knowledge::KnowledgeBase;
use crate::planner::PlanAssembler;
use crate::predicates::{explain, PredicateCheck, Query};
use crate::recipes::{RecipeGenerator, RecipeRequest};
use crate::types::{
    EngineStats, MealPlan, MealSlot, Recipe, ResolvedMeal, RestrictionSet, WeeklyRecipeDay,
};
use crate::EngineError;

/// Bundles a shared knowledge base, a configuration and a random source.
///
/// Create one per request; the knowledge base is shared, the RNG is not.
pub struct Engine<R: Rng = ChaCha8Rng> {
    knowledge: Arc<KnowledgeBase>,
    config: EngineConfig,
    rng: R,
}

impl Engine<ChaCha8Rng> {
    /// Default configuration, seeded from OS entropy.
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self::with_rng(knowledge, EngineConfig::default(), ChaCha8Rng::from_entropy())
    }

    /// Default configuration with a fixed seed, for reproducible output.
    pub fn seeded(knowledge: Arc<KnowledgeBase>, seed: u64) -> Self {
        Self::with_rng(knowledge, EngineConfig::default(), ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(knowledge: Arc<KnowledgeBase>, config: EngineConfig, rng: R) -> Self {
        Self {
            knowledge,
            config,
            rng,
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn knowledge(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A `days`-day plan, or `None` when the restrictions leave some slot
    /// without any admissible food.
    pub fn build_plan(
        &mut self,
        days: u32,
        daily_calorie_target: f64,
        restrictions: &RestrictionSet,
    ) -> Option<MealPlan> {
        let planner = PlanAssembler::new(&self.knowledge, &self.config);
        let days = planner.build_plan(days, daily_calorie_target, restrictions, &mut self.rng)?;
        Some(MealPlan {
            generated_at: Utc::now(),
            daily_calorie_target,
            days,
        })
    }

    /// Up to `count` distinct alternatives for a slot, or the configured
    /// default count when `count` is `None`.
    pub fn generate_alternatives(
        &mut self,
        slot: MealSlot,
        current_calories: f64,
        restrictions: &RestrictionSet,
        count: Option<usize>,
    ) -> Vec<ResolvedMeal> {
        let count = count.unwrap_or(self.config.alternatives_count);
        let planner = PlanAssembler::new(&self.knowledge, &self.config);
        planner.generate_alternatives(slot, current_calories, restrictions, count, &mut self.rng)
    }

    pub fn generate_recipe(&mut self, request: &RecipeRequest) -> Result<Recipe, EngineError> {
        RecipeGenerator::new(&self.knowledge, &self.config).generate_recipe(request, &mut self.rng)
    }

    pub fn weekly_recipe_plan(
        &mut self,
        restrictions: &RestrictionSet,
    ) -> Result<Vec<WeeklyRecipeDay>, EngineError> {
        RecipeGenerator::new(&self.knowledge, &self.config)
            .weekly_recipe_plan(restrictions, &mut self.rng)
    }

    pub fn regenerate_meal(
        &mut self,
        slot: MealSlot,
        restrictions: &RestrictionSet,
    ) -> Result<Recipe, EngineError> {
        RecipeGenerator::new(&self.knowledge, &self.config)
            .regenerate_meal(slot, restrictions, &mut self.rng)
    }

    pub fn stats(&self) -> EngineStats {
        self.knowledge.stats()
    }

    /// Every strict predicate's outcome for the named food, checked against
    /// its own slot.
    pub fn explain(
        &self,
        food: &str,
        target_calories: f64,
        restrictions: &RestrictionSet,
    ) -> Result<Vec<PredicateCheck>, EngineError> {
        let item = self
            .knowledge
            .food(food)
            .ok_or_else(|| EngineError::InvalidRequest(format!("unknown food '{}'", food)))?;

        let query = Query {
            slot: item.meal_slot,
            target_calories,
            restrictions,
            already_used: &[],
        };
        Ok(explain(item, &query, &self.config))
    }
}
