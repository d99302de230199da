//! Typed model for the JSON emitted by the apidoc comment extractor.
//!
//! Two values come out of an extraction run: the record list
//! (`api_data.json`) and the project metadata (`api_project.json`).
//! Only the fields the conversion pipeline consumes are modeled;
//! everything else in the extractor output is ignored by serde.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::InputError;

/// One documented HTTP operation instance for a URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerbRecord {
    /// HTTP method, lowercase in extractor output (`get`, `post`, ...).
    #[serde(rename = "type")]
    pub method: String,

    /// Raw route, with `:name` path tokens (`/users/:id`).
    pub url: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub group: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub permission: Option<Vec<Permission>>,

    /// Route parameters (`fields["Parameter"]`) and request examples.
    #[serde(default)]
    pub parameter: Option<FieldBlock>,

    /// Header declarations (`fields["Header"]`).
    #[serde(default)]
    pub header: Option<FieldBlock>,

    /// Success responses: declared fields plus response examples.
    #[serde(default)]
    pub success: Option<FieldBlock>,

    #[serde(default)]
    pub query: Vec<FieldDoc>,

    #[serde(default)]
    pub body: Vec<FieldDoc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Permission {
    #[serde(default)]
    pub name: String,
}

/// A `fields`/`examples` pair as the extractor groups declarations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldBlock {
    #[serde(default)]
    pub fields: IndexMap<String, Vec<FieldDoc>>,

    #[serde(default)]
    pub examples: Vec<DocExample>,
}

impl FieldBlock {
    /// Declarations for one group key (`"Parameter"`, `"Header"`, ...).
    pub fn group(&self, key: &str) -> &[FieldDoc] {
        self.fields.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// One documented field: a parameter, query, header, or body entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldDoc {
    #[serde(default)]
    pub group: String,

    /// Declared type (`String`, `Number[]`, `Object`, ...); absent means string.
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,

    /// Possibly dotted (`user.address.city`).
    pub field: String,

    #[serde(default)]
    pub optional: bool,

    #[serde(rename = "defaultValue", default)]
    pub default_value: Option<serde_json::Value>,

    #[serde(rename = "allowedValues", default)]
    pub allowed_values: Option<Vec<String>>,

    #[serde(default)]
    pub description: Option<String>,
}

/// A literal example block attached to an endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocExample {
    #[serde(default)]
    pub title: String,

    /// Raw text, possibly prefixed with an HTTP status line.
    #[serde(default)]
    pub content: String,

    #[serde(rename = "type", default)]
    pub example_type: Option<String>,
}

/// Project metadata (`api_project.json`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Parse the extractor's record list.
pub fn records_from_json(input: &str) -> Result<Vec<VerbRecord>, InputError> {
    Ok(serde_json::from_str(input)?)
}

/// Parse the extractor's project metadata.
pub fn project_from_json(input: &str) -> Result<Project, InputError> {
    Ok(serde_json::from_str(input)?)
}
