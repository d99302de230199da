/// A dotted field name split into its enclosing object and leaf property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedName {
    pub property: String,
    pub object: Option<String>,
}

/// Split `"user.address.city"` into property `"city"` and object
/// `"user.address"`. A field without dots keeps the whole name as the
/// property and falls back to `default_object`.
pub fn split_nested(field: &str, default_object: Option<&str>) -> NestedName {
    match field.rfind('.') {
        Some(idx) => NestedName {
            property: field[idx + 1..].to_string(),
            object: Some(field[..idx].to_string()),
        },
        None => NestedName {
            property: field.to_string(),
            object: default_object.map(str::to_string),
        },
    }
}
