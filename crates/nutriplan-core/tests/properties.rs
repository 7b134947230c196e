use std::collections::HashSet;

use nutriplan_core::predicates::{
    in_calorie_range, ingredient_is_restricted, is_macro_balanced, matches_restriction,
};
use nutriplan_core::{
    AttemptTier, Difficulty, Engine, EngineConfig, FoodItem, KnowledgeBase, MealSlot, PlanAssembler,
    RecipeRequest, RestrictionSet, SubstitutionResolver,
};
use proptest::prelude::*;

const TERMS: &[&str] = &[
    "nueces", "huevo", "pollo", "leche", "pan", "arroz", "pescado", "tomate", "miel", "pasta",
    "lechuga", "papa", "aguacate", "protein", "dairy",
];

fn arb_restrictions() -> impl Strategy<Value = RestrictionSet> {
    (
        proptest::sample::subsequence(TERMS.to_vec(), 0..3),
        proptest::sample::subsequence(TERMS.to_vec(), 0..2),
    )
        .prop_map(|(allergies, unwanted)| {
            let mut restrictions = RestrictionSet::new();
            for term in allergies {
                restrictions = restrictions.with_allergy(term);
            }
            for term in unwanted {
                restrictions = restrictions.with_unwanted(term);
            }
            restrictions
        })
}

fn arb_slot() -> impl Strategy<Value = MealSlot> {
    prop_oneof![
        Just(MealSlot::Breakfast),
        Just(MealSlot::Lunch),
        Just(MealSlot::Dinner),
    ]
}

fn arb_difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn tags_clear(item: &FoodItem, restrictions: &RestrictionSet) -> bool {
    let terms = restrictions.active_terms();
    item.ingredient_tags
        .iter()
        .all(|tag| terms.iter().all(|term| !matches_restriction(tag, term)))
}

proptest! {
    #[test]
    fn plans_respect_restrictions_tolerance_and_variety(
        seed in any::<u64>(),
        days in 1u32..8,
        daily in 1200.0f64..2400.0,
        restrictions in arb_restrictions(),
    ) {
        let kb = KnowledgeBase::builtin().unwrap();
        let config = EngineConfig::default();
        let mut engine = Engine::seeded(kb.clone(), seed);
        let planner = PlanAssembler::new(&kb, &config);

        if let Some(plan) = engine.build_plan(days, daily, &restrictions) {
            prop_assert_eq!(plan.days.len(), days as usize);

            let mut used = HashSet::new();
            for day in &plan.days {
                for meal in day.meals() {
                    let item = kb.food(&meal.food).unwrap();
                    prop_assert!(tags_clear(item, &restrictions));

                    let target = planner.slot_target(meal.slot, daily);
                    match meal.tier {
                        AttemptTier::Strict => {
                            prop_assert!(in_calorie_range(item, target, config.strict_tolerance));
                            prop_assert!(is_macro_balanced(item));
                            prop_assert!(!used.contains(&meal.food), "{} reused by a strict pick", meal.food);
                        }
                        AttemptTier::Relaxed => {
                            prop_assert!(in_calorie_range(item, target, config.relaxed_tolerance));
                        }
                    }

                    used.insert(meal.food.clone());
                }
            }
        }
    }

    #[test]
    fn alternatives_are_distinct_admissible_and_bounded(
        seed in any::<u64>(),
        slot in arb_slot(),
        calories in 250.0f64..700.0,
        count in 0usize..6,
        restrictions in arb_restrictions(),
    ) {
        let kb = KnowledgeBase::builtin().unwrap();
        let mut engine = Engine::seeded(kb.clone(), seed);

        let alternatives = engine.generate_alternatives(slot, calories, &restrictions, Some(count));
        prop_assert!(alternatives.len() <= count);

        let mut seen = HashSet::new();
        for meal in &alternatives {
            prop_assert_eq!(meal.slot, slot);
            prop_assert!(seen.insert(meal.food.clone()));
            prop_assert!(tags_clear(kb.food(&meal.food).unwrap(), &restrictions));
        }
    }

    #[test]
    fn recipes_never_contain_restricted_ingredients(
        seed in any::<u64>(),
        slot in arb_slot(),
        difficulty in arb_difficulty(),
        servings in 1u32..6,
        restrictions in arb_restrictions(),
    ) {
        let kb = KnowledgeBase::builtin().unwrap();
        let mut engine = Engine::seeded(kb.clone(), seed);
        let request = RecipeRequest::new(slot, difficulty)
            .with_servings(servings)
            .with_restrictions(restrictions.clone());

        if let Ok(recipe) = engine.generate_recipe(&request) {
            prop_assert_eq!(recipe.slot, slot);
            prop_assert_eq!(recipe.servings, servings);

            let template = kb.recipes().iter().find(|t| t.id == recipe.template_id).unwrap();
            let adapted = SubstitutionResolver::new(&kb, engine.config().step_rewrite)
                .adapt_recipe(template, &restrictions)
                .unwrap();
            for ingredient in &adapted.ingredients {
                prop_assert!(!ingredient_is_restricted(ingredient, &restrictions));
            }
            let names: Vec<&str> = adapted.ingredients.iter().map(|i| i.name.as_str()).collect();
            let listed: Vec<&str> = recipe.ingredients.iter().map(|i| i.name.as_str()).collect();
            prop_assert_eq!(names, listed);
        }
    }

    #[test]
    fn adaptation_leaves_safe_templates_alone(
        index in 0usize..45,
        restrictions in arb_restrictions(),
    ) {
        let kb = KnowledgeBase::builtin().unwrap();
        let resolver = SubstitutionResolver::new(&kb, EngineConfig::default().step_rewrite);
        let template = &kb.recipes()[index % kb.recipes().len()];

        let safe = template
            .ingredients
            .iter()
            .all(|i| !ingredient_is_restricted(i, &restrictions));
        if safe {
            let adapted = resolver.adapt_recipe(template, &restrictions).unwrap();
            prop_assert_eq!(&adapted, template);
        }

        if let Some(adapted) = resolver.adapt_recipe(template, &restrictions) {
            let again = resolver.adapt_recipe(&adapted, &restrictions).unwrap();
            prop_assert_eq!(again, adapted);
        }
    }

    #[test]
    fn calorie_window_is_symmetric(
        target in 100.0f64..1500.0,
        offset in 0.0f64..0.14,
    ) {
        let below = FoodItem {
            name: "below".to_string(),
            description: String::new(),
            meal_slot: MealSlot::Lunch,
            calories: target * (1.0 - offset),
            protein: 30.0,
            carbs: 50.0,
            fat: 15.0,
            ingredient_tags: vec![],
        };
        let above = FoodItem {
            calories: target * (1.0 + offset),
            ..below.clone()
        };
        prop_assert!(in_calorie_range(&below, target, 0.15));
        prop_assert!(in_calorie_range(&above, target, 0.15));
    }
}
