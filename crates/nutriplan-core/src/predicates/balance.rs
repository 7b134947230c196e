//! Macro-nutrient balance.

use crate::config::MacroBalance;
use crate::types::FoodItem;

use super::{Predicate, PredicateKind, Query};

/// Protein, carb and fat shares of the item's macro grams, in percent.
///
/// Returns `None` when the item has no macros at all.
pub fn macro_shares(item: &FoodItem) -> Option<(f64, f64, f64)> {
    let total = item.protein + item.carbs + item.fat;
    if total <= 0.0 {
        return None;
    }
    Some((
        item.protein / total * 100.0,
        item.carbs / total * 100.0,
        item.fat / total * 100.0,
    ))
}

/// Balanced under the default shares: protein 15-40%, carbs 35-70%,
/// fat 10-40%.
pub fn is_macro_balanced(item: &FoodItem) -> bool {
    is_macro_balanced_within(item, &MacroBalance::default())
}

pub fn is_macro_balanced_within(item: &FoodItem, ranges: &MacroBalance) -> bool {
    match macro_shares(item) {
        Some((protein, carbs, fat)) => {
            ranges.protein.contains(protein)
                && ranges.carbs.contains(carbs)
                && ranges.fat.contains(fat)
        }
        None => false,
    }
}

pub struct MacroBalancePredicate {
    pub ranges: MacroBalance,
}

impl MacroBalancePredicate {
    pub fn new(ranges: MacroBalance) -> Self {
        Self { ranges }
    }
}

impl Predicate for MacroBalancePredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::MacroBalance
    }

    fn holds(&self, item: &FoodItem, _query: &Query<'_>) -> bool {
        is_macro_balanced_within(item, &self.ranges)
    }

    fn detail(&self, item: &FoodItem, _query: &Query<'_>) -> String {
        match macro_shares(item) {
            Some((protein, carbs, fat)) => format!(
                "protein {:.1}%, carbs {:.1}%, fat {:.1}%",
                protein, carbs, fat
            ),
            None => "no macro-nutrients".to_string(),
        }
    }
}
