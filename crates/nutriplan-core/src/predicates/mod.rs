//! Admissibility predicates over food items.
//!
//! Each predicate is a pure function of a fact and the query it is checked
//! against. The resolver runs them as an ordered pipeline, one per filtering
//! tier, and stops at the first that rejects an item.
//!
//! - **Meal slot**: the item is meant for the requested slot
//! - **Admissible**: no ingredient matches an allergy or unwanted food
//! - **Calorie range**: calories within a tolerance of the slot target
//! - **Macro balance**: protein/carb/fat shares within their ranges
//! - **Not already used**: the item has not been picked earlier in the plan

mod admissibility;
mod balance;
mod calories;
mod variety;

pub use admissibility::{
    first_violation, ingredient_is_restricted, is_admissible, matches_restriction,
    AdmissiblePredicate,
};
pub use balance::{is_macro_balanced, is_macro_balanced_within, macro_shares, MacroBalancePredicate};
pub use calories::{calorie_window, in_calorie_range, CalorieRangePredicate};
pub use variety::{has_ingredient_diversity, has_variety};

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::types::{AttemptTier, FoodItem, MealSlot, RestrictionSet};

/// Identifies a predicate in logs and explanations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateKind {
    MealSlot,
    Admissible,
    CalorieRange,
    MacroBalance,
    NotAlreadyUsed,
}

impl PredicateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredicateKind::MealSlot => "meal_slot",
            PredicateKind::Admissible => "admissible",
            PredicateKind::CalorieRange => "calorie_range",
            PredicateKind::MacroBalance => "macro_balance",
            PredicateKind::NotAlreadyUsed => "not_already_used",
        }
    }
}

impl std::fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an item is being checked against.
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    pub slot: MealSlot,
    pub target_calories: f64,
    pub restrictions: &'a RestrictionSet,
    pub already_used: &'a [String],
}

/// A single admissibility rule.
pub trait Predicate {
    /// Which rule this is.
    fn kind(&self) -> PredicateKind;

    /// Whether `item` satisfies the rule for `query`.
    fn holds(&self, item: &FoodItem, query: &Query<'_>) -> bool;

    /// Human-readable account of the values the rule looked at.
    fn detail(&self, item: &FoodItem, query: &Query<'_>) -> String;
}

/// Exact meal-slot match.
pub fn is_meal_slot(item: &FoodItem, slot: MealSlot) -> bool {
    item.meal_slot == slot
}

pub struct MealSlotPredicate;

impl Predicate for MealSlotPredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::MealSlot
    }

    fn holds(&self, item: &FoodItem, query: &Query<'_>) -> bool {
        is_meal_slot(item, query.slot)
    }

    fn detail(&self, item: &FoodItem, query: &Query<'_>) -> String {
        format!("item is {}, requested {}", item.meal_slot, query.slot)
    }
}

/// Excludes items already picked earlier in the same plan.
pub struct NotAlreadyUsedPredicate;

impl Predicate for NotAlreadyUsedPredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::NotAlreadyUsed
    }

    fn holds(&self, item: &FoodItem, query: &Query<'_>) -> bool {
        !query.already_used.iter().any(|used| *used == item.name)
    }

    fn detail(&self, item: &FoodItem, query: &Query<'_>) -> String {
        if self.holds(item, query) {
            "not yet used".to_string()
        } else {
            format!("'{}' already used", item.name)
        }
    }
}

/// The ordered predicates of a filtering tier.
pub fn pipeline(tier: AttemptTier, config: &EngineConfig) -> Vec<Box<dyn Predicate>> {
    match tier {
        AttemptTier::Strict => vec![
            Box::new(MealSlotPredicate),
            Box::new(AdmissiblePredicate),
            Box::new(CalorieRangePredicate::new(config.strict_tolerance)),
            Box::new(MacroBalancePredicate::new(config.macro_balance)),
            Box::new(NotAlreadyUsedPredicate),
        ],
        AttemptTier::Relaxed => vec![
            Box::new(MealSlotPredicate),
            Box::new(AdmissiblePredicate),
            Box::new(CalorieRangePredicate::new(config.relaxed_tolerance)),
        ],
    }
}

/// The first predicate in `predicates` that rejects `item`, if any.
pub fn first_rejection(
    predicates: &[Box<dyn Predicate>],
    item: &FoodItem,
    query: &Query<'_>,
) -> Option<PredicateKind> {
    predicates
        .iter()
        .find(|p| !p.holds(item, query))
        .map(|p| p.kind())
}

/// Outcome of one predicate for one item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredicateCheck {
    pub kind: PredicateKind,
    pub passed: bool,
    pub detail: String,
}

/// Run every strict-tier predicate against `item`, without short-circuiting.
pub fn explain(item: &FoodItem, query: &Query<'_>, config: &EngineConfig) -> Vec<PredicateCheck> {
    pipeline(AttemptTier::Strict, config)
        .iter()
        .map(|p| PredicateCheck {
            kind: p.kind(),
            passed: p.holds(item, query),
            detail: p.detail(item, query),
        })
        .collect()
}
