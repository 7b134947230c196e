//! JSON Schema validation for knowledge-base documents.
//!
//! Documents are checked against schema/knowledge_base.schema.json before
//! they are deserialized, so structural problems are reported with the path
//! of the offending value.

use jsonschema::Validator;
use std::sync::OnceLock;

const KNOWLEDGE_BASE_SCHEMA_JSON: &str = include_str!("../../schema/knowledge_base.schema.json");

static VALIDATOR: OnceLock<Result<Validator, String>> = OnceLock::new();

fn compile() -> Result<Validator, String> {
    let schema: serde_json::Value = serde_json::from_str(KNOWLEDGE_BASE_SCHEMA_JSON)
        .map_err(|e| format!("Knowledge-base schema is not valid JSON: {}", e))?;
    jsonschema::options()
        .build(&schema)
        .map_err(|e| format!("Knowledge-base schema does not compile: {}", e))
}

/// Check a knowledge-base document against the schema.
///
/// Every violation is reported as `<message> at <instance path>`, in
/// document order.
pub fn validate_knowledge_base_schema(document: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = VALIDATOR
        .get_or_init(compile)
        .as_ref()
        .map_err(|e| vec![e.clone()])?;

    let violations: Vec<String> = validator
        .iter_errors(document)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
