//! Candidate resolution with one relaxation pass.
//!
//! A strict pass applies every predicate. If it admits nothing, a relaxed
//! pass drops macro balance and widens the calorie tolerance. Slot,
//! admissibility and the already-used exclusion hold in both passes.

use rand::Rng;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::knowledge::KnowledgeBase;
use crate::predicates::{first_rejection, pipeline, PredicateKind, Query};
use crate::types::{AttemptTier, FoodItem, MealSlot, RestrictionSet};

/// An item picked by the resolver and the pass that admitted it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'kb> {
    pub item: &'kb FoodItem,
    pub tier: AttemptTier,
}

/// Selects food items from a knowledge base.
pub struct CandidateResolver<'kb> {
    knowledge: &'kb KnowledgeBase,
    config: &'kb EngineConfig,
}

impl<'kb> CandidateResolver<'kb> {
    pub fn new(knowledge: &'kb KnowledgeBase, config: &'kb EngineConfig) -> Self {
        Self { knowledge, config }
    }

    /// Items of the knowledge base that pass every predicate of `tier`.
    pub fn candidates(&self, tier: AttemptTier, query: &Query<'_>) -> Vec<&'kb FoodItem> {
        let predicates = pipeline(tier, self.config);
        self.knowledge
            .foods()
            .iter()
            .filter(|item| match first_rejection(&predicates, item, query) {
                None => true,
                Some(kind) => {
                    // Slot mismatches are not logged.
                    if kind != PredicateKind::MealSlot {
                        debug!(food = %item.name, predicate = %kind, tier = ?tier, "Rejected candidate");
                    }
                    false
                }
            })
            .collect()
    }

    /// Pick one item for `slot` near `target_calories`, uniformly at random
    /// among the candidates of the first pass that admits any.
    ///
    /// Returns `None` only if the relaxed pass is empty too.
    pub fn select_meal<R: Rng + ?Sized>(
        &self,
        slot: MealSlot,
        target_calories: f64,
        restrictions: &RestrictionSet,
        already_used: &[String],
        rng: &mut R,
    ) -> Option<Selection<'kb>> {
        let query = Query {
            slot,
            target_calories,
            restrictions,
            already_used,
        };

        for tier in [AttemptTier::Strict, AttemptTier::Relaxed] {
            let candidates = self.candidates(tier, &query);
            debug!(slot = %slot, target = target_calories, tier = ?tier, count = candidates.len(), "Candidates found");

            if candidates.is_empty() {
                continue;
            }

            let item = candidates[rng.gen_range(0..candidates.len())];
            info!(slot = %slot, food = %item.name, calories = item.calories, tier = ?tier, "Selected meal");
            return Some(Selection { item, tier });
        }

        None
    }
}
