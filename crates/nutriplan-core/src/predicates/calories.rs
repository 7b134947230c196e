//! Calorie-range fitting.

use crate::types::FoodItem;

use super::{Predicate, PredicateKind, Query};

/// The inclusive `[low, high]` kcal window around `target`.
pub fn calorie_window(target: f64, tolerance: f64) -> (f64, f64) {
    (target * (1.0 - tolerance), target * (1.0 + tolerance))
}

/// True iff `item.calories` lies within `tolerance` of `target`.
pub fn in_calorie_range(item: &FoodItem, target: f64, tolerance: f64) -> bool {
    let (low, high) = calorie_window(target, tolerance);
    item.calories >= low && item.calories <= high
}

/// Calorie range at a fixed tolerance.
pub struct CalorieRangePredicate {
    pub tolerance: f64,
}

impl CalorieRangePredicate {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Predicate for CalorieRangePredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::CalorieRange
    }

    fn holds(&self, item: &FoodItem, query: &Query<'_>) -> bool {
        in_calorie_range(item, query.target_calories, self.tolerance)
    }

    fn detail(&self, item: &FoodItem, query: &Query<'_>) -> String {
        let (low, high) = calorie_window(query.target_calories, self.tolerance);
        format!(
            "{} kcal against window {:.0}..{:.0} (±{:.0}%)",
            item.calories,
            low,
            high,
            self.tolerance * 100.0
        )
    }
}
