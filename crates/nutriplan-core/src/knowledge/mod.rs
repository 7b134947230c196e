//! Knowledge-base loading and validation.
//!
//! A knowledge base is the static set of food items, catalog ingredients and
//! recipe templates the engine reasons over. Documents are YAML or JSON,
//! checked against an embedded JSON Schema, then validated semantically.

mod builtin;
mod parser;
mod schema;

pub use parser::{KnowledgeBase, KnowledgeBaseError};
pub use schema::validate_knowledge_base_schema;
