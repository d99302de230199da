use serde_json::Value;

use crate::convert::merge::structural_union;
use crate::openapi::Schema;

/// Infer an OpenAPI-flavored schema from a literal JSON value.
///
/// The title naming hint lands on the root schema only. All JSON numbers map
/// to `number`; objects carry no required list (declared fields add it
/// later); `null` becomes a nullable untyped schema, the OpenAPI 3.0
/// rendering of a JSON-Schema null type.
pub fn from_value(value: &Value, title: &str) -> Schema {
    let mut schema = infer(value);
    if !title.is_empty() {
        schema.title = Some(title.to_string());
    }
    schema
}

fn infer(value: &Value) -> Schema {
    match value {
        Value::Null => Schema {
            nullable: Some(true),
            ..Schema::default()
        },
        Value::Bool(_) => Schema::scalar("boolean"),
        Value::Number(_) => Schema::scalar("number"),
        Value::String(_) => Schema::scalar("string"),
        Value::Array(items) => {
            let mut array = Schema::scalar("array");
            let mut merged: Option<Schema> = None;
            for item in items {
                let inferred = infer(item);
                match merged.as_mut() {
                    Some(base) => structural_union(base, inferred),
                    None => merged = Some(inferred),
                }
            }
            array.items = merged.map(Box::new);
            array
        }
        Value::Object(map) => {
            let mut object = Schema::scalar("object");
            let properties = object.properties_mut();
            for (key, item) in map {
                properties.insert(key.clone(), infer(item));
            }
            object
        }
    }
}
