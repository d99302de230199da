use indexmap::IndexMap;
use serde::Serialize;

use super::operation::Operation;

/// The assembled OpenAPI 3.0 document.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub openapi: String,

    pub info: Info,

    /// URL template → method → operation.
    pub paths: IndexMap<String, IndexMap<String, Operation>>,

    pub components: Components,

    pub security: Vec<IndexMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Info {
    pub title: String,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fixed component block: one bearer-JWT scheme and the shared 401 response.
#[derive(Debug, Clone, Serialize)]
pub struct Components {
    #[serde(rename = "securitySchemes")]
    pub security_schemes: IndexMap<String, SecurityScheme>,

    pub responses: IndexMap<String, NamedResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,

    pub scheme: String,

    #[serde(rename = "bearerFormat")]
    pub bearer_format: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedResponse {
    pub description: String,
}

impl Components {
    pub fn bearer_jwt() -> Self {
        let mut security_schemes = IndexMap::new();
        security_schemes.insert(
            "bearerAuth".to_string(),
            SecurityScheme {
                scheme_type: "http".to_string(),
                scheme: "bearer".to_string(),
                bearer_format: "JWT".to_string(),
            },
        );

        let mut responses = IndexMap::new();
        responses.insert(
            "UnauthorizedError".to_string(),
            NamedResponse {
                description: "Access token is missing or invalid".to_string(),
            },
        );

        Components {
            security_schemes,
            responses,
        }
    }
}

/// The document-level requirement referencing the bearer scheme.
pub fn bearer_requirement() -> Vec<IndexMap<String, Vec<String>>> {
    let mut requirement = IndexMap::new();
    requirement.insert("bearerAuth".to_string(), Vec::new());
    vec![requirement]
}
