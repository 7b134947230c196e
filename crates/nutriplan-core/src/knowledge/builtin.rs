//! The default knowledge base shipped with the crate.

use lazy_static::lazy_static;
use std::sync::Arc;

use super::parser::{KnowledgeBase, KnowledgeBaseError};

const BUILTIN_YAML: &str = include_str!("../../data/knowledge_base.yaml");

lazy_static! {
    static ref BUILTIN: Result<Arc<KnowledgeBase>, String> = KnowledgeBase::from_yaml(BUILTIN_YAML)
        .map(Arc::new)
        .map_err(|e| e.to_string());
}

impl KnowledgeBase {
    /// The embedded default data set, parsed on first use and shared.
    pub fn builtin() -> Result<Arc<KnowledgeBase>, KnowledgeBaseError> {
        match &*BUILTIN {
            Ok(kb) => Ok(Arc::clone(kb)),
            Err(e) => Err(KnowledgeBaseError::ValidationError(format!(
                "embedded knowledge base is invalid: {}",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MealSlot;

    #[test]
    fn test_builtin_loads() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert_eq!(kb.foods().len(), 21);
        assert_eq!(kb.ingredients().len(), 65);
        assert_eq!(kb.recipes().len(), 45);
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = KnowledgeBase::builtin().unwrap();
        let b = KnowledgeBase::builtin().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_builtin_stats() {
        let stats = KnowledgeBase::builtin().unwrap().stats();
        assert_eq!(stats.by_type["breakfast"], 10);
        assert_eq!(stats.by_type["lunch"], 14);
        assert_eq!(stats.by_type["dinner"], 14);
        assert_eq!(stats.by_type["snack"], 7);
        assert_eq!(stats.by_difficulty["easy"], 28);
        assert_eq!(stats.by_difficulty["medium"], 15);
        assert_eq!(stats.by_difficulty["hard"], 2);
        assert_eq!(stats.foods_by_slot["breakfast"], 7);
        assert_eq!(stats.foods_by_slot["lunch"], 7);
        assert_eq!(stats.foods_by_slot["dinner"], 7);
    }

    #[test]
    fn test_builtin_food_tags_are_lowercase() {
        let kb = KnowledgeBase::builtin().unwrap();
        for food in kb.foods() {
            assert!(MealSlot::PLAN_SLOTS.contains(&food.meal_slot));
            for tag in &food.ingredient_tags {
                assert_eq!(tag, &tag.to_lowercase(), "{} has tag {}", food.name, tag);
            }
        }
    }
}
