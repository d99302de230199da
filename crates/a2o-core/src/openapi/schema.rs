use indexmap::IndexMap;
use serde::Serialize;

/// A JSON Schema node in the document under construction.
///
/// `type` is an open string rather than a closed enum: apidoc declarations
/// like `date` and `file` flow through the tree untouched and are rewritten
/// by the post-processing pass over the serialized text.
///
/// `required` distinguishes absent (`None`) from declared-empty
/// (`Some(vec![])`): object fragments are seeded with an empty list that
/// serializes as `"required":[]` and is stripped by the final text pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    // deepObject query parameters carry these inside the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
}

impl Schema {
    /// A typed scalar fragment.
    pub fn scalar(schema_type: impl Into<String>) -> Self {
        Schema {
            schema_type: Some(schema_type.into()),
            ..Schema::default()
        }
    }

    /// An object fragment seeded with empty properties and required.
    pub fn object() -> Self {
        Schema {
            schema_type: Some("object".to_string()),
            properties: Some(IndexMap::new()),
            required: Some(Vec::new()),
            ..Schema::default()
        }
    }

    /// An array fragment wrapping the given item schema.
    pub fn array_of(items: Schema) -> Self {
        Schema {
            schema_type: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Schema::default()
        }
    }

    /// True if the fragment has at least one property.
    pub fn has_properties(&self) -> bool {
        self.properties.as_ref().is_some_and(|p| !p.is_empty())
    }

    /// Properties map, created on first use.
    pub fn properties_mut(&mut self) -> &mut IndexMap<String, Schema> {
        self.properties.get_or_insert_with(IndexMap::new)
    }

    /// Mark a property required on this fragment.
    pub fn push_required(&mut self, name: &str) {
        self.required
            .get_or_insert_with(Vec::new)
            .push(name.to_string());
    }
}
