use indexmap::IndexMap;
use serde::Serialize;

use super::schema::Schema;

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
}

/// A non-body operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub required: bool,

    pub schema: Schema,
}

/// A media-type entry under `content`.
///
/// Request bodies additionally carry the last example title as a
/// `description` alongside the schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    pub schema: Schema,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    pub content: IndexMap<String, MediaType>,
}

impl RequestBody {
    /// Wrap a media-type entry as `application/json` content.
    pub fn json(media: MediaType) -> Self {
        let mut content = IndexMap::new();
        content.insert("application/json".to_string(), media);
        RequestBody { content }
    }
}

/// A response entry keyed by status code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType>>,

    pub description: String,
}

impl Response {
    pub fn plain(description: impl Into<String>) -> Self {
        Response {
            content: None,
            description: description.into(),
        }
    }

    pub fn json_schema(schema: Schema, description: impl Into<String>) -> Self {
        let mut content = IndexMap::new();
        content.insert(
            "application/json".to_string(),
            MediaType {
                schema,
                description: None,
            },
        );
        Response {
            content: Some(content),
            description: description.into(),
        }
    }

    /// Schema under `content."application/json"`, if any.
    pub fn json_schema_ref(&self) -> Option<&Schema> {
        self.content
            .as_ref()
            .and_then(|c| c.get("application/json"))
            .map(|m| &m.schema)
    }
}

/// One OpenAPI Operation: everything under a single HTTP verb.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `Some(vec![{}])` marks an endpoint as requiring no auth,
    /// overriding the document-level bearer requirement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<IndexMap<String, Vec<String>>>>,

    pub parameters: Vec<Parameter>,

    pub responses: IndexMap<String, Response>,

    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
}
