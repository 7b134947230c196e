//! Variety checks over a group of selected items.
//!
//! These are diagnostics: the planner reports them but never rejects a
//! plan because of them.

use std::collections::HashSet;

use crate::types::FoodItem;

/// True iff no two items share a name.
pub fn has_variety(selected: &[&FoodItem]) -> bool {
    let mut seen = HashSet::new();
    selected.iter().all(|item| seen.insert(item.name.as_str()))
}

/// True iff the distinct main ingredients (first tag of each item) number
/// at least `min(len, 3)`. Items without tags contribute nothing.
pub fn has_ingredient_diversity(selected: &[&FoodItem]) -> bool {
    let mains: HashSet<&str> = selected
        .iter()
        .filter_map(|item| item.ingredient_tags.first())
        .map(|tag| tag.as_str())
        .collect();
    mains.len() >= selected.len().min(3)
}
