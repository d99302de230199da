//! The documentation-records → OpenAPI document pipeline.
//!
//! `convert` builds a fresh `Document` per invocation; nothing is shared
//! across runs. `to_output_json` serializes it and applies the final
//! textual normalization pass.

pub mod examples;
pub mod merge;
pub mod nested_path;
pub mod operation;
pub mod params;
pub mod postprocess;
pub mod routes;
pub mod sanitize;
pub mod schema_infer;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::apidoc::{Project, VerbRecord};
use crate::error::ConvertError;
use crate::openapi::document::bearer_requirement;
use crate::openapi::{Components, Document, Info, Operation};

static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").expect("valid pattern"));

/// Convert extracted documentation records plus project metadata into an
/// OpenAPI 3.0 document.
pub fn convert(records: &[VerbRecord], project: &Project) -> Document {
    let records = normalize_names(records);

    let mut paths: IndexMap<String, IndexMap<String, Operation>> = IndexMap::new();
    for group in routes::group_by_url(&records) {
        let template = routes::template_path(group.url);
        let entry = paths.entry(template).or_default();
        for verb in group.verbs {
            let method = verb.method.to_ascii_lowercase();
            if entry.contains_key(&method) {
                log::warn!(
                    "duplicate `{}` operation for {}: overwriting earlier declaration",
                    method,
                    group.url
                );
            }
            entry.insert(method, operation::build_operation(verb));
        }
    }

    Document {
        openapi: "3.0.0".to_string(),
        info: build_info(project),
        paths,
        components: Components::bearer_jwt(),
        security: bearer_requirement(),
    }
}

/// Serialize a document and apply the post-processing rewrites.
pub fn to_output_json(document: &Document) -> Result<String, ConvertError> {
    let serialized = serde_json::to_string(document)?;
    Ok(postprocess::normalize_output(&serialized))
}

/// Each underscore run in a record name becomes a single space, the
/// normalization the upstream doc templates apply before display.
fn normalize_names(records: &[VerbRecord]) -> Vec<VerbRecord> {
    records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            record.name = UNDERSCORE_RUN.replace_all(&record.name, " ").into_owned();
            record
        })
        .collect()
}

fn build_info(project: &Project) -> Info {
    let title = project
        .title
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| project.name.clone());
    Info {
        title,
        version: project.version.clone(),
        description: sanitize::strip_tags_opt(project.description.as_deref()),
    }
}
