use indexmap::IndexMap;

use crate::apidoc::VerbRecord;
use crate::convert::examples::{build_request_body, build_responses};
use crate::convert::params::flat_parameters;
use crate::convert::sanitize::strip_tags;
use crate::openapi::{Operation, Parameter, ParameterLocation};

/// Assemble one OpenAPI Operation for a verb record.
pub fn build_operation(verb: &VerbRecord) -> Operation {
    Operation {
        tags: vec![verb.group.clone()],
        summary: Some(strip_tags(&verb.name)),
        description: Some(strip_tags(&verb.title)),
        security: no_auth_requirement(verb),
        parameters: build_parameters(verb),
        responses: build_responses(verb),
        request_body: build_request_body(verb),
    }
}

/// Route params, then headers, then query params.
///
/// Header declarations are parsed from the input but never emitted into
/// the parameter list.
fn build_parameters(verb: &VerbRecord) -> Vec<Parameter> {
    let route_docs = verb
        .parameter
        .as_ref()
        .map(|block| block.group("Parameter"))
        .unwrap_or(&[]);

    let mut parameters = flat_parameters(route_docs, ParameterLocation::Path);
    parameters.extend(flat_parameters(&verb.query, ParameterLocation::Query));
    parameters
}

/// `[{}]` — the empty security requirement — marks an endpoint as needing
/// no auth. Emitted when the route declares no permission or its first
/// permission is literally `Public`; otherwise the document-level bearer
/// requirement applies.
fn no_auth_requirement(verb: &VerbRecord) -> Option<Vec<IndexMap<String, Vec<String>>>> {
    let public = match verb.permission.as_deref() {
        None | Some([]) => true,
        Some([first, ..]) => first.name == "Public",
    };
    public.then(|| vec![IndexMap::new()])
}
