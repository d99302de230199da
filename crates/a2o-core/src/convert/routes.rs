use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::apidoc::VerbRecord;

static PATH_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r":(\w+)").expect("valid token pattern"));

/// One raw URL with every verb record documented against it.
#[derive(Debug)]
pub struct RouteGroup<'a> {
    pub url: &'a str,
    pub verbs: Vec<&'a VerbRecord>,
}

/// Group records by exact raw URL, preserving encounter order.
pub fn group_by_url(records: &[VerbRecord]) -> Vec<RouteGroup<'_>> {
    let mut groups: IndexMap<&str, Vec<&VerbRecord>> = IndexMap::new();
    for record in records {
        groups.entry(record.url.as_str()).or_default().push(record);
    }
    groups
        .into_iter()
        .map(|(url, verbs)| RouteGroup { url, verbs })
        .collect()
}

/// Rewrite routing-style path tokens into OpenAPI placeholders:
/// `/users/:id` → `/users/{id}`. All verbs grouped under one raw URL share
/// the template derived from it.
pub fn template_path(url: &str) -> String {
    PATH_TOKEN.replace_all(url, "{${1}}").into_owned()
}
