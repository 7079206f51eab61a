//! Schema validation and decoding of raw account config

use crate::error::{ParseError, Result};
use bidrules_core::RulesEngineConfig;
use jsonschema::{Draft, JSONSchema};

const RULES_ENGINE_SCHEMA: &str = include_str!("../schema/rules_engine_config.json");

/// Validates raw config bytes against the rules engine JSON schema
///
/// The schema is compiled once; a validator can be shared across builds.
pub struct ConfigValidator {
    schema: JSONSchema,
}

impl ConfigValidator {
    /// Create a validator for the embedded schema
    pub fn new() -> Result<Self> {
        let schema_json: serde_json::Value = serde_json::from_str(RULES_ENGINE_SCHEMA)?;
        Self::with_schema(&schema_json)
    }

    /// Create a validator for a custom schema document
    pub fn with_schema(schema_json: &serde_json::Value) -> Result<Self> {
        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema_json)
            .map_err(|e| ParseError::InvalidSchema(e.to_string()))?;

        Ok(Self { schema })
    }

    /// Check JSON syntax and schema conformance
    pub fn validate(&self, raw: &[u8]) -> Result<()> {
        let instance: serde_json::Value = serde_json::from_slice(raw)?;
        self.validate_value(&instance)
    }

    /// Validate, then decode into the configuration AST
    pub fn parse(&self, raw: &[u8]) -> Result<RulesEngineConfig> {
        let instance: serde_json::Value = serde_json::from_slice(raw)?;
        self.validate_value(&instance)?;

        let config: RulesEngineConfig = serde_json::from_value(instance)?;
        tracing::debug!(
            rule_sets = config.rule_sets.len(),
            enabled = config.enabled,
            "decoded rules engine config"
        );
        Ok(config)
    }

    fn validate_value(&self, instance: &serde_json::Value) -> Result<()> {
        if let Err(errors) = self.schema.validate(instance) {
            let violations: Vec<String> = errors
                .map(|e| {
                    let path = e.instance_path.to_string();
                    if path.is_empty() {
                        e.to_string()
                    } else {
                        format!("{}: {}", path, e)
                    }
                })
                .collect();
            return Err(ParseError::SchemaViolation(violations));
        }
        Ok(())
    }
}
