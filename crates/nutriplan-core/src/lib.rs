//! # nutriplan-core
//!
//! Constraint-based meal plan and recipe recommendation engine.
//!
//! This crate answers, for a user's calorie target and restrictions:
//! - Which dishes fill breakfast, lunch and dinner for the next few days?
//! - What else could replace one of them?
//! - Which recipe can be cooked, and with what substitutions?
//!
//! ## Key Guarantees
//!
//! 1. **Restriction-safe**: no plan or recipe contains a restricted ingredient
//! 2. **All-or-nothing**: a plan is complete or absent, never partial
//! 3. **Reproducible**: the random source is injected; a seed fixes the output
//! 4. **Shared knowledge**: the knowledge base is immutable behind an `Arc`
//!
//! ## Example
//!
//! ```rust,ignore
//! use nutriplan_core::{Engine, KnowledgeBase, RestrictionSet};
//!
//! let kb = KnowledgeBase::builtin()?;
//! let mut engine = Engine::seeded(kb, 42);
//! let restrictions = RestrictionSet::new().with_allergy("nueces");
//!
//! match engine.build_plan(3, 2000.0, &restrictions) {
//!     Some(plan) => println!("{} days planned", plan.days.len()),
//!     None => println!("Restrictions too strict"),
//! }
//! ```

pub mod config;
pub mod engine;
pub mod knowledge;
pub mod nutrition;
pub mod planner;
pub mod predicates;
pub mod recipes;
pub mod resolver;
pub mod substitution;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-export main types at crate root
pub use config::{ConfigError, EngineConfig, MacroBalance, PercentRange, SlotSplit, StepRewrite};
pub use engine::Engine;
pub use knowledge::{KnowledgeBase, KnowledgeBaseError};
pub use nutrition::compute_nutrition;
pub use planner::{daily_target_for_goal, PlanAssembler};
pub use predicates::{Predicate, PredicateCheck, PredicateKind, Query};
pub use recipes::{RecipeGenerator, RecipeRequest};
pub use resolver::{CandidateResolver, Selection};
pub use substitution::{Adaptation, SubstitutionResolver};
pub use types::{
    AttemptTier, CatalogEntry, DayPlan, Difficulty, EngineStats, FoodItem, Goal, Ingredient,
    IngredientCategory, MealPlan, MealSlot, NutritionFacts, ParseEnumError, Recipe,
    RecipeIngredient, RecipeTemplate, ResolvedMeal, RestrictionSet, Substitution, Variation,
    WeeklyRecipeDay,
};

use thiserror::Error;

/// Message for a plan that cannot be assembled.
pub const RESTRICTIONS_TOO_STRICT: &str =
    "Could not build a plan with your restrictions. Try relaxing some of them.";

/// Errors that can occur while generating recipes
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("No compatible recipe: {0}")]
    NoCompatibleRecipe(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(#[from] KnowledgeBaseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_basic_plan() {
        let kb = KnowledgeBase::builtin().unwrap();
        let mut engine = Engine::seeded(kb, 1);
        let plan = engine.build_plan(1, 1400.0, &RestrictionSet::new()).unwrap();

        assert_eq!(plan.days.len(), 1);
        assert!(plan.days[0].total_calories() > 0.0);
    }

    #[test]
    fn test_week_long_plan_on_builtin() {
        let kb = KnowledgeBase::builtin().unwrap();
        for seed in 0..10 {
            let mut engine = Engine::seeded(Arc::clone(&kb), seed);
            let plan = engine.build_plan(7, 1400.0, &RestrictionSet::new()).unwrap();
            assert_eq!(plan.days.len(), 7);
        }
    }

    #[test]
    fn test_restrictions_too_strict() {
        let kb = KnowledgeBase::builtin().unwrap();
        let mut engine = Engine::seeded(kb, 1);
        // Every builtin breakfast contains one of these.
        let restrictions = RestrictionSet::new()
            .with_allergy("huevo")
            .with_allergy("nueces")
            .with_unwanted("yogurt")
            .with_unwanted("proteína");
        assert!(engine.build_plan(1, 1400.0, &restrictions).is_none());
    }

    #[test]
    fn test_error_from_knowledge_base() {
        let err: EngineError = KnowledgeBase::from_yaml("version: [").unwrap_err().into();
        assert!(err.to_string().starts_with("Knowledge base error"));
    }
}
