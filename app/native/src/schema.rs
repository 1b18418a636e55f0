//! JSON Schema for the configuration file.

use crate::config::ConcertinaConfig;

/// Canonical location of the published schema.
pub const SCHEMA_ID: &str =
    "https://raw.githubusercontent.com/concertina-wm/concertina/main/concertina.schema.json";

/// Generates a JSON Schema for the Concertina configuration.
///
/// The schema includes all configuration options with their types,
/// descriptions, and default values.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(ConcertinaConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert("$id".to_string(), serde_json::json!(SCHEMA_ID));
    }

    schema
}

/// Pretty-printed schema, ready to be written to a file.
#[must_use]
pub fn print_schema() -> String {
    serde_json::to_string_pretty(&generate_schema()).unwrap_or_default()
}
