//! Multi-day plan assembly and per-slot alternatives.

use rand::Rng;
use std::collections::HashSet;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::knowledge::KnowledgeBase;
use crate::predicates::{has_ingredient_diversity, has_variety};
use crate::resolver::{CandidateResolver, Selection};
use crate::types::{DayPlan, FoodItem, Goal, MealSlot, ResolvedMeal, RestrictionSet};

/// Calorie change applied for a lose or gain goal.
pub const GOAL_ADJUSTMENT_KCAL: f64 = 500.0;

/// The daily calorie target for a user's goal, never below zero.
pub fn daily_target_for_goal(base_calories: f64, goal: Goal) -> f64 {
    match goal {
        Goal::Lose => (base_calories - GOAL_ADJUSTMENT_KCAL).max(0.0),
        Goal::Maintain => base_calories,
        Goal::Gain => base_calories + GOAL_ADJUSTMENT_KCAL,
    }
}

/// Builds plans by running the resolver slot by slot.
pub struct PlanAssembler<'kb> {
    knowledge: &'kb KnowledgeBase,
    resolver: CandidateResolver<'kb>,
    config: &'kb EngineConfig,
}

impl<'kb> PlanAssembler<'kb> {
    pub fn new(knowledge: &'kb KnowledgeBase, config: &'kb EngineConfig) -> Self {
        Self {
            knowledge,
            resolver: CandidateResolver::new(knowledge, config),
            config,
        }
    }

    /// Calorie target of one slot, rounded to the nearest kcal.
    pub fn slot_target(&self, slot: MealSlot, daily_target: f64) -> f64 {
        let split = &self.config.slot_split;
        let share = match slot {
            MealSlot::Breakfast => split.breakfast,
            MealSlot::Lunch => split.lunch,
            MealSlot::Dinner => split.dinner,
            // Snacks are not part of a day plan.
            MealSlot::Snack => 0.0,
        };
        (daily_target * share).round()
    }

    /// Plan `days` days of breakfast, lunch and dinner.
    ///
    /// Strict picks never repeat a food already in the plan; relaxed picks
    /// may. If any slot cannot be filled, or `days` exceeds
    /// `max_plan_days`, the whole plan is dropped and `None` is returned.
    pub fn build_plan<R: Rng + ?Sized>(
        &self,
        days: u32,
        daily_target: f64,
        restrictions: &RestrictionSet,
        rng: &mut R,
    ) -> Option<Vec<DayPlan>> {
        if days > self.config.max_plan_days {
            warn!(days, max = self.config.max_plan_days, "Plan too long");
            return None;
        }

        let mut already_used: Vec<String> = Vec::new();
        let mut plan = Vec::new();

        for day in 1..=days {
            let mut items: Vec<&FoodItem> = Vec::with_capacity(3);
            let mut meals: Vec<ResolvedMeal> = Vec::with_capacity(3);

            for slot in MealSlot::PLAN_SLOTS {
                let target = self.slot_target(slot, daily_target);
                let selection = self
                    .resolver
                    .select_meal(slot, target, restrictions, &already_used, rng);
                let Some(selection) = selection else {
                    warn!(day, slot = %slot, target, "No admissible food, restrictions too strict");
                    return None;
                };

                already_used.push(selection.item.name.clone());
                items.push(selection.item);
                meals.push(resolve_meal(selection));
            }

            let variety_ok = has_variety(&items);
            let diversity_ok = has_ingredient_diversity(&items);
            if !variety_ok {
                warn!(day, "Day repeats a meal");
            }
            if !diversity_ok {
                warn!(day, "Day lacks main-ingredient diversity");
            }

            let mut meals = meals.into_iter();
            let (Some(breakfast), Some(lunch), Some(dinner)) = (meals.next(), meals.next(), meals.next())
            else {
                return None;
            };

            plan.push(DayPlan {
                day,
                breakfast,
                lunch,
                dinner,
                variety_ok,
                diversity_ok,
            });
        }

        info!(days, daily_target, "Plan assembled");
        Some(plan)
    }

    /// Up to `count` distinct alternatives for one slot.
    ///
    /// Makes at most `2 * count` selections, so fewer than `count` come back
    /// when the pool is small.
    pub fn generate_alternatives<R: Rng + ?Sized>(
        &self,
        slot: MealSlot,
        current_calories: f64,
        restrictions: &RestrictionSet,
        count: usize,
        rng: &mut R,
    ) -> Vec<ResolvedMeal> {
        // No more distinct alternatives exist than foods in the slot.
        let pool = self
            .knowledge
            .foods()
            .iter()
            .filter(|f| f.meal_slot == slot)
            .count();
        let count = count.min(pool);

        let mut seen = HashSet::new();
        let mut alternatives = Vec::with_capacity(count);

        for _ in 0..count.saturating_mul(2) {
            if alternatives.len() >= count {
                break;
            }
            if let Some(selection) =
                self.resolver
                    .select_meal(slot, current_calories, restrictions, &[], rng)
            {
                if seen.insert(selection.item.name.as_str()) {
                    alternatives.push(resolve_meal(selection));
                }
            }
        }

        info!(slot = %slot, requested = count, found = alternatives.len(), "Alternatives generated");
        alternatives
    }
}

fn resolve_meal(selection: Selection<'_>) -> ResolvedMeal {
    let item = selection.item;
    ResolvedMeal {
        id: format!("{}-{}", item.name, Uuid::new_v4()),
        name: item.display_name().to_string(),
        food: item.name.clone(),
        slot: item.meal_slot,
        calories: item.calories,
        protein: item.protein,
        carbs: item.carbs,
        fat: item.fat,
        ingredients: item.ingredient_tags.clone(),
        tier: selection.tier,
    }
}
