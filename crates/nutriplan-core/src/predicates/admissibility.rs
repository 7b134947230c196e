//! Allergen and unwanted-food filtering.

use crate::types::{FoodItem, Ingredient, IngredientCategory, RestrictionSet};

use super::{Predicate, PredicateKind, Query};

/// True if `name` and `term` overlap by substring in either direction.
/// Both are compared trimmed and lowercased; a blank side never matches.
pub fn matches_restriction(name: &str, term: &str) -> bool {
    let name = name.trim().to_lowercase();
    let term = term.trim().to_lowercase();
    if name.is_empty() || term.is_empty() {
        return false;
    }
    name.contains(&term) || term.contains(&name)
}

/// The first active restriction `name` matches, if any.
fn matching_term(name: &str, terms: &[String]) -> Option<String> {
    terms
        .iter()
        .find(|term| matches_restriction(name, term))
        .cloned()
}

/// True iff no ingredient tag of `item` matches an allergy or unwanted food.
pub fn is_admissible(item: &FoodItem, restrictions: &RestrictionSet) -> bool {
    first_violation(item, restrictions).is_none()
}

/// The first `(tag, restriction)` pair that makes `item` inadmissible.
pub fn first_violation(item: &FoodItem, restrictions: &RestrictionSet) -> Option<(String, String)> {
    let terms = restrictions.active_terms();
    if terms.is_empty() {
        return None;
    }
    item.ingredient_tags
        .iter()
        .find_map(|tag| matching_term(tag, &terms).map(|term| (tag.clone(), term)))
}

/// True iff the ingredient's name matches a restriction, or its category
/// is named by one (e.g. "dairy" or "lacteo").
pub fn ingredient_is_restricted(ingredient: &Ingredient, restrictions: &RestrictionSet) -> bool {
    restrictions.active_terms().iter().any(|term| {
        matches_restriction(&ingredient.name, term)
            || term.parse::<IngredientCategory>().ok() == Some(ingredient.category)
    })
}

/// Rejects items containing a restricted ingredient.
pub struct AdmissiblePredicate;

impl Predicate for AdmissiblePredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::Admissible
    }

    fn holds(&self, item: &FoodItem, query: &Query<'_>) -> bool {
        is_admissible(item, query.restrictions)
    }

    fn detail(&self, item: &FoodItem, query: &Query<'_>) -> String {
        match first_violation(item, query.restrictions) {
            Some((tag, term)) => format!("ingredient '{}' matches restriction '{}'", tag, term),
            None => "no restricted ingredients".to_string(),
        }
    }
}
