use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level project configuration loaded from `.a2o.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct A2oConfig {
    /// Path to the extractor's record list.
    pub data: String,
    /// Path to the extractor's project metadata.
    pub project: String,
    /// Output directory for `swagger.json`.
    pub dest: String,
}

impl Default for A2oConfig {
    fn default() -> Self {
        Self {
            data: "doc/api_data.json".to_string(),
            project: "doc/api_project.json".to_string(),
            dest: "swagger".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".a2o.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<A2oConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: A2oConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# a2o configuration
data: doc/api_data.json        # apidoc extractor record list
project: doc/api_project.json  # apidoc extractor project metadata
dest: swagger                  # output directory for swagger.json
"#
}
