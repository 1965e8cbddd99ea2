//! JSON Schema generation for [`FieldOpsConfig`].

use crate::types::FieldOpsConfig;
use schemars::{Schema, generate::SchemaSettings};

/// Generate the JSON Schema for [`FieldOpsConfig`].
pub fn schema() -> Schema {
    SchemaSettings::default()
        .into_generator()
        .into_root_schema_for::<FieldOpsConfig>()
}

/// Generate the JSON Schema as a pretty-printed JSON string.
pub fn schema_json_pretty() -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&schema())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_excludes_secrets() {
        let json = schema_json_pretty().unwrap();
        assert!(!json.contains("\"api_key\""));
        assert!(json.contains("\"concurrency\""));
    }

    #[test]
    fn default_config_validates_against_schema() {
        let schema = serde_json::to_value(schema()).unwrap();
        let config = serde_json::to_value(FieldOpsConfig::default()).unwrap();

        let validator = jsonschema::validator_for(&schema).unwrap();
        let result = validator.validate(&config);
        assert!(result.is_ok(), "default config should validate: {:?}", result.err());
    }

    #[test]
    fn partial_config_validates_against_schema() {
        let schema = serde_json::to_value(schema()).unwrap();
        let partial = serde_json::json!({"services": {"geocoder": {"country_codes": "us"}}});

        let validator = jsonschema::validator_for(&schema).unwrap();
        assert!(validator.validate(&partial).is_ok());
    }
}
