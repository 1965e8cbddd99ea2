//! Input schema generation for the capability manifest.

use schemars::{JsonSchema, Schema, generate::SchemaSettings};

/// JSON Schema (draft 2020-12) describing a tool's wire input.
pub fn input_schema_for<T: JsonSchema>() -> Schema {
    SchemaSettings::draft2020_12()
        .into_generator()
        .into_root_schema_for::<T>()
}
