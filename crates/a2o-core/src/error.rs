use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to parse apidoc JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("no mount point for field `{field}`: parent object `{parent}` was never declared")]
    MissingMountPoint { field: String, parent: String },

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}
