//! Ingredient substitution for fixed recipe templates.

use regex::{NoExpand, RegexBuilder};
use tracing::debug;

use crate::config::StepRewrite;
use crate::knowledge::KnowledgeBase;
use crate::predicates::ingredient_is_restricted;
use crate::types::{Ingredient, RecipeTemplate, RestrictionSet, Substitution};

/// A template adapted to a restriction set, with the swaps that were made.
#[derive(Debug, Clone, PartialEq)]
pub struct Adaptation {
    pub template: RecipeTemplate,
    pub substitutions: Vec<Substitution>,
}

/// Finds replacements for restricted ingredients in a catalog.
pub struct SubstitutionResolver<'kb> {
    knowledge: &'kb KnowledgeBase,
    rewrite: StepRewrite,
}

impl<'kb> SubstitutionResolver<'kb> {
    pub fn new(knowledge: &'kb KnowledgeBase, rewrite: StepRewrite) -> Self {
        Self { knowledge, rewrite }
    }

    /// The replacement for `ingredient`: its first declared alternative that
    /// exists and is unrestricted, else the first unrestricted catalog entry
    /// of the same category with a different name.
    pub fn find_substitute(
        &self,
        ingredient: &Ingredient,
        restrictions: &RestrictionSet,
    ) -> Option<&'kb Ingredient> {
        for key in &ingredient.alternatives {
            match self.knowledge.ingredient(key) {
                Some(alternative) if !ingredient_is_restricted(alternative, restrictions) => {
                    return Some(alternative);
                }
                Some(_) => {}
                None => debug!(ingredient = %ingredient.name, key = %key, "Alternative not in catalog"),
            }
        }

        self.knowledge
            .ingredients()
            .iter()
            .map(|entry| &entry.ingredient)
            .find(|candidate| {
                candidate.category == ingredient.category
                    && candidate.name != ingredient.name
                    && !ingredient_is_restricted(candidate, restrictions)
            })
    }

    /// Adapt `template` to `restrictions`, or `None` if some restricted
    /// ingredient has no substitute.
    pub fn adapt_recipe(
        &self,
        template: &RecipeTemplate,
        restrictions: &RestrictionSet,
    ) -> Option<RecipeTemplate> {
        self.adapt_recipe_traced(template, restrictions)
            .map(|adaptation| adaptation.template)
    }

    /// Like [`adapt_recipe`](Self::adapt_recipe), also returning the swaps.
    pub fn adapt_recipe_traced(
        &self,
        template: &RecipeTemplate,
        restrictions: &RestrictionSet,
    ) -> Option<Adaptation> {
        let mut ingredients = Vec::with_capacity(template.ingredients.len());
        let mut substitutions = Vec::new();

        for ingredient in &template.ingredients {
            if !ingredient_is_restricted(ingredient, restrictions) {
                ingredients.push(ingredient.clone());
                continue;
            }

            match self.find_substitute(ingredient, restrictions) {
                Some(substitute) => {
                    debug!(recipe = %template.id, original = %ingredient.name, replacement = %substitute.name, "Substituted ingredient");
                    substitutions.push(Substitution {
                        original: ingredient.name.clone(),
                        replacement: substitute.name.clone(),
                    });
                    ingredients.push(substitute.clone());
                }
                None => {
                    debug!(recipe = %template.id, ingredient = %ingredient.name, "No substitute, recipe dropped");
                    return None;
                }
            }
        }

        let mut steps = template.steps.clone();
        for substitution in &substitutions {
            steps = steps
                .iter()
                .map(|step| {
                    rewrite_step(
                        step,
                        &substitution.original,
                        &substitution.replacement,
                        self.rewrite,
                    )
                })
                .collect();
        }

        Some(Adaptation {
            template: RecipeTemplate {
                ingredients,
                steps,
                ..template.clone()
            },
            substitutions,
        })
    }
}

/// Replace every case-insensitive occurrence of `original` in `step`.
///
/// `original` is matched literally; `replacement` is inserted literally.
pub fn rewrite_step(step: &str, original: &str, replacement: &str, mode: StepRewrite) -> String {
    if original.is_empty() {
        return step.to_string();
    }

    let escaped = regex::escape(original);
    let pattern = match mode {
        StepRewrite::Blunt => escaped,
        StepRewrite::WholeWord => format!(r"\b{}\b", escaped),
    };

    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re.replace_all(step, NoExpand(replacement)).into_owned(),
        Err(e) => {
            debug!(error = %e, original = %original, "Step rewrite pattern rejected");
            step.to_string()
        }
    }
}
