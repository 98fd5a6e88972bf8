//! Validates a submitted form against a schema kept as JSON text.
//!
//! Run with `cargo run -p treecheck-validator --example form_payload`.

use serde_json::json;
use treecheck_validator::{MapValidator, Schema, SchemaError};

const SCHEMA: &str = r#"[
    {"field": "name", "rule": "notOptional", "message": "Name is mandatory"},
    {"field": "name", "rule": ["regex", "/^[\\w_. -]+$/i"], "message": "Name contains invalid characters"},
    {"field": "email", "rule": "email", "message": "E-Mail is invalid"},
    {"field": ["address", "zip"], "key": "zip", "rule": ["optional", "digit", ["length", 5, 5]], "message": "ZIP must have five digits"},
    {"field": ["lang", "*", "title"], "rule": ["allOf", "stringType", ["length", 1, 60]], "message": "Title is required"},
    {"field": ["items", "*", "qty"], "rule": ["oneOf", "positive", ["equals", 0]], "message": "Quantity must not be negative"}
]"#;

fn main() -> Result<(), SchemaError> {
    let schema = Schema::from_json_str(SCHEMA)?;
    let validator = MapValidator::new();

    let payload = json!({
        "name": "Jane Doe",
        "email": "jane.doe@example",
        "address": {"street": "Main St 1", "zip": "123"},
        "lang": {
            "de": {"title": "Willkommen"},
            "en": {"title": ""}
        },
        "items": [{"sku": "A-1", "qty": 2}, {"sku": "B-7", "qty": -1}]
    });

    let errors = validator.validate_schema(&payload, &schema)?;
    if errors.is_empty() {
        println!("payload is valid");
    } else {
        println!("{} problem(s):", errors.len());
        for (key, message) in errors.iter() {
            println!("  {key}: {message}");
        }
    }

    println!("{}", serde_json::to_string_pretty(&errors).map_err(SchemaError::from)?);
    Ok(())
}
