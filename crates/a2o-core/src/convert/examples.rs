use indexmap::IndexMap;
use serde_json::Value;

use crate::apidoc::VerbRecord;
use crate::convert::merge::structural_union;
use crate::convert::params::transfer_body_params;
use crate::convert::sanitize::strip_tags;
use crate::convert::schema_infer;
use crate::openapi::{MediaType, RequestBody, Response, Schema};

/// A raw example blob split into status code and parsed JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExample {
    pub code: u16,
    pub value: Value,
}

/// Split an example blob such as `"HTTP/1.1 201 Created\n{...}"`.
///
/// Everything before the first `{` or `[` is a candidate status line: a
/// three-token prefix (protocol, code, reason) yields the code, anything
/// else defaults to 200. The body is parsed leniently (comments, trailing
/// commas, unquoted keys); a parse failure logs a warning and degrades to
/// an empty object — an example never aborts the run.
pub fn parse_example(content: &str) -> ParsedExample {
    let start = content.find(['{', '[']).unwrap_or(0);
    let (prefix, body) = content.split_at(start);

    let tokens: Vec<&str> = prefix.trim().split(' ').collect();
    let code = if tokens.len() == 3 {
        tokens[1].parse().unwrap_or(200)
    } else {
        200
    };

    let value = match json5::from_str(body) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("failed to parse example body: {err}; using empty object for {body:?}");
            Value::Object(serde_json::Map::new())
        }
    };

    ParsedExample { code, value }
}

/// Build the status-code-keyed response map from a verb's success examples.
///
/// The map always seeds with `200: OK`. Each example merges into the running
/// schema for its status code; when both the example title and the existing
/// description are non-empty they concatenate newest-first with a newline.
pub fn build_responses(verb: &VerbRecord) -> IndexMap<String, Response> {
    let mut responses = IndexMap::new();
    responses.insert("200".to_string(), Response::plain("OK"));

    let examples = verb
        .success
        .as_ref()
        .map(|block| block.examples.as_slice())
        .unwrap_or(&[]);

    for example in examples {
        let parsed = parse_example(&example.content);
        let code = parsed.code.to_string();
        let incoming = schema_infer::from_value(&parsed.value, &example.title);

        let schema = match responses.get(&code).and_then(Response::json_schema_ref) {
            Some(existing) => {
                let mut merged = existing.clone();
                structural_union(&mut merged, incoming);
                merged
            }
            None => incoming,
        };

        let new_description = strip_tags(&example.title);
        let existing_description = responses
            .get(&code)
            .map(|r| r.description.clone())
            .filter(|d| !d.is_empty());
        let description = match existing_description {
            Some(existing) if new_description.is_empty() => existing,
            Some(existing) => format!("{new_description}\n{existing}"),
            None => new_description,
        };

        responses.insert(code, Response::json_schema(schema, description));
    }

    responses
}

/// Build the request body from a verb's request examples and body fields.
///
/// Request bodies have a single schema stream: every example merges into the
/// seed object schema in encounter order (status lines are ignored), then
/// declared body fields mount on top. A body with zero properties is omitted
/// entirely; a structural error mounting fields drops this body and the run
/// continues.
pub fn build_request_body(verb: &VerbRecord) -> Option<RequestBody> {
    let mut schema = Schema::object();
    let mut description = None;

    if let Some(block) = &verb.parameter {
        for example in &block.examples {
            let parsed = parse_example(&example.content);
            let incoming = schema_infer::from_value(&parsed.value, &example.title);
            structural_union(&mut schema, incoming);
            description = Some(example.title.clone());
        }
    }

    if let Err(err) = transfer_body_params(&verb.body, &mut schema) {
        log::error!(
            "skipping request body for {} {}: {err}",
            verb.method,
            verb.url
        );
        return None;
    }

    if !schema.has_properties() {
        return None;
    }

    Some(RequestBody::json(MediaType {
        schema,
        description,
    }))
}
