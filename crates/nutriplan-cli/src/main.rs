//! nutriplan command-line interface.
//!
//! Usage:
//! ```bash
//! # Three-day plan at 2000 kcal, avoiding nuts
//! nutriplan plan --days 3 --calories 2000 --allergy nueces
//!
//! # Three alternatives for a 450 kcal lunch
//! nutriplan alternatives --slot lunch --calories 450
//!
//! # An easy breakfast recipe for four
//! nutriplan recipe --slot breakfast --difficulty easy --servings 4
//!
//! # Why was a food rejected?
//! nutriplan explain --food avena_frutas_nueces --calories 350 --allergy nueces
//! ```
//!
//! Results are printed as JSON on stdout; logs go to stderr.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use nutriplan_core::{
    daily_target_for_goal, Difficulty, Engine, EngineConfig, EngineStats, Goal, KnowledgeBase,
    MealSlot, RecipeRequest, RestrictionSet, RESTRICTIONS_TOO_STRICT,
};

#[derive(Parser)]
#[command(
    name = "nutriplan",
    version,
    about = "Constraint-based meal plan and recipe generator",
    long_about = "Builds meal plans, alternatives and recipes from a knowledge base of foods and recipe templates, honoring allergies and unwanted foods."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Knowledge base file (.yaml or .json); defaults to the built-in data set
    #[arg(long, global = true)]
    knowledge_base: Option<PathBuf>,

    /// Engine configuration file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for reproducible selections
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Allergy to avoid (repeatable)
    #[arg(long = "allergy", global = true)]
    allergies: Vec<String>,

    /// Food to avoid (repeatable)
    #[arg(long = "unwanted", global = true)]
    unwanted: Vec<String>,

    /// Dietary preference, recorded but not filtered on (repeatable)
    #[arg(long = "preference", global = true)]
    preferences: Vec<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Build a multi-day meal plan
    Plan {
        /// Number of days
        #[arg(long, default_value_t = 3)]
        days: u32,

        /// Daily calorie target before goal adjustment
        #[arg(long)]
        calories: f64,

        /// Weight goal: lose, maintain or gain
        #[arg(long, default_value = "maintain")]
        goal: Goal,
    },

    /// Suggest alternatives for one meal
    Alternatives {
        #[arg(long)]
        slot: MealSlot,

        /// Calories of the meal being replaced
        #[arg(long)]
        calories: f64,

        /// How many alternatives to return
        #[arg(long)]
        count: Option<usize>,
    },

    /// Generate a recipe
    Recipe {
        #[arg(long)]
        slot: MealSlot,

        #[arg(long, default_value = "easy")]
        difficulty: Difficulty,

        #[arg(long, default_value_t = 2)]
        servings: u32,

        /// Cooking time in minutes
        #[arg(long)]
        cooking_time: Option<String>,

        /// Ingredient on hand (repeatable)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
    },

    /// Generate a week of recipes
    Weekly,

    /// Generate a replacement recipe for one plan slot
    Regenerate {
        #[arg(long)]
        slot: MealSlot,
    },

    /// Show knowledge-base statistics
    Stats,

    /// Evaluate every predicate against one food
    Explain {
        /// Food item name
        #[arg(long)]
        food: String,

        /// Slot calorie target; defaults to the food's own calories
        #[arg(long)]
        calories: Option<f64>,
    },

    /// Validate a knowledge-base file
    Validate {
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Serialize)]
struct ValidationReport {
    valid: bool,
    version: String,
    stats: EngineStats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let restrictions = restrictions(&cli);

    if let Command::Validate { file } = &cli.command {
        let kb = load_knowledge_base(file)?;
        return print_json(&ValidationReport {
            valid: true,
            version: kb.version().to_string(),
            stats: kb.stats(),
        });
    }

    let knowledge = match &cli.knowledge_base {
        Some(path) => Arc::new(load_knowledge_base(path)?),
        None => KnowledgeBase::builtin().context("Failed to load built-in knowledge base")?,
    };
    let config = match &cli.config {
        Some(path) => EngineConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    debug!(?config, "Engine configuration");

    let mut engine = match cli.seed {
        Some(seed) => Engine::seeded(knowledge, seed),
        None => Engine::new(knowledge),
    }
    .with_config(config);

    match cli.command {
        Command::Plan {
            days,
            calories,
            goal,
        } => {
            let target = daily_target_for_goal(calories, goal);
            info!(days, target, "Generating meal plan");
            match engine.build_plan(days, target, &restrictions) {
                Some(plan) => print_json(&plan),
                None => bail!(RESTRICTIONS_TOO_STRICT),
            }
        }
        Command::Alternatives {
            slot,
            calories,
            count,
        } => print_json(&engine.generate_alternatives(slot, calories, &restrictions, count)),
        Command::Recipe {
            slot,
            difficulty,
            servings,
            cooking_time,
            ingredients,
        } => {
            let mut request = RecipeRequest::new(slot, difficulty)
                .with_servings(servings)
                .with_available_ingredients(ingredients)
                .with_restrictions(restrictions);
            request.cooking_time = cooking_time;
            print_json(&engine.generate_recipe(&request)?)
        }
        Command::Weekly => print_json(&engine.weekly_recipe_plan(&restrictions)?),
        Command::Regenerate { slot } => print_json(&engine.regenerate_meal(slot, &restrictions)?),
        Command::Stats => print_json(&engine.stats()),
        Command::Explain { food, calories } => {
            let target = calories
                .or_else(|| engine.knowledge().food(&food).map(|f| f.calories))
                .unwrap_or_default();
            print_json(&engine.explain(&food, target, &restrictions)?)
        }
        Command::Validate { .. } => Ok(()),
    }
}

fn restrictions(cli: &Cli) -> RestrictionSet {
    RestrictionSet {
        allergies: cli.allergies.iter().cloned().collect(),
        unwanted_foods: cli.unwanted.iter().cloned().collect(),
        preferences: cli.preferences.iter().cloned().collect(),
    }
}

fn load_knowledge_base(path: &Path) -> Result<KnowledgeBase> {
    KnowledgeBase::from_file(path)
        .with_context(|| format!("Failed to load knowledge base {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
