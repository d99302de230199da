use indexmap::IndexMap;

use crate::apidoc::FieldDoc;
use crate::convert::nested_path::split_nested;
use crate::convert::sanitize::strip_tags_opt;
use crate::error::ConvertError;
use crate::openapi::{Parameter, ParameterLocation, Schema};

/// Closed classification of a declared parameter type, decided once from
/// the type string (case-insensitive, `string` when absent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    Scalar(String),
    /// Array of scalars; the element type string.
    Array(String),
    Object,
    ArrayOfObject,
}

impl ParamKind {
    pub fn classify(raw: Option<&str>) -> ParamKind {
        let lowered = raw.unwrap_or("string").to_ascii_lowercase();
        if lowered.ends_with("object[]") {
            ParamKind::ArrayOfObject
        } else if let Some(element) = lowered.strip_suffix("[]") {
            ParamKind::Array(element.to_string())
        } else if lowered == "object" {
            ParamKind::Object
        } else {
            ParamKind::Scalar(lowered)
        }
    }
}

/// Strip surrounding whitespace/quote/backtick runs from each allowed value,
/// preserving source order.
pub fn clean_enum(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| {
            v.trim_matches(|c: char| c.is_whitespace() || c == '\'' || c == '"' || c == '`')
                .to_string()
        })
        .collect()
}

/// One navigation step from the schema root towards a mount point.
#[derive(Debug, Clone)]
enum Step {
    Prop(String),
    Items,
}

/// Maps dotted-path prefixes to the schema fragment receiving new
/// properties at that prefix. Fragments are addressed by root-relative
/// step paths, re-resolved on each use, so the table never aliases
/// mutable borrows into the tree.
struct MountTable {
    places: IndexMap<String, Vec<Step>>,
}

impl MountTable {
    fn new() -> Self {
        let mut places = IndexMap::new();
        places.insert(String::new(), Vec::new());
        MountTable { places }
    }

    fn path(&self, prefix: &str) -> Option<&Vec<Step>> {
        self.places.get(prefix)
    }

    fn register(&mut self, prefix: String, path: Vec<Step>) {
        self.places.insert(prefix, path);
    }
}

fn resolve_mut<'a>(root: &'a mut Schema, path: &[Step]) -> Option<&'a mut Schema> {
    let mut current = root;
    for step in path {
        current = match step {
            Step::Prop(name) => current.properties.as_mut()?.get_mut(name)?,
            Step::Items => current.items.as_deref_mut()?,
        };
    }
    Some(current)
}

/// Mount every body field declaration into the request-body schema.
///
/// Dotted paths mount left-to-right: a field at `a.b.c` requires the mount
/// point for `a.b` to exist already. A missing parent is a structural error
/// for this body; the caller drops the body and the run continues.
pub fn transfer_body_params(docs: &[FieldDoc], schema: &mut Schema) -> Result<(), ConvertError> {
    let mut mounts = MountTable::new();

    for doc in docs {
        let kind = ParamKind::classify(doc.field_type.as_deref());
        let nested = split_nested(&doc.field, None);
        let object_name = nested.object.unwrap_or_default();
        let property = nested.property;

        let missing = || ConvertError::MissingMountPoint {
            field: doc.field.clone(),
            parent: object_name.clone(),
        };
        let path = mounts.path(&object_name).ok_or_else(missing)?.clone();
        let parent = resolve_mut(schema, &path).ok_or_else(missing)?;

        match &kind {
            ParamKind::ArrayOfObject => {
                // Reuse an example-inferred fragment when present.
                parent
                    .properties_mut()
                    .entry(property.clone())
                    .or_insert_with(|| Schema::array_of(Schema::object()));
            }
            ParamKind::Object => {
                parent
                    .properties_mut()
                    .entry(property.clone())
                    .or_insert_with(Schema::object);
            }
            ParamKind::Array(element) => {
                if !parent.properties_mut().contains_key(&property) {
                    let mut items = Schema::scalar(element.clone());
                    items.description = strip_tags_opt(doc.description.as_deref());
                    items.example = doc.default_value.clone();
                    let mut array = Schema::array_of(items);
                    if let Some(values) = &doc.allowed_values {
                        array.enum_values = Some(clean_enum(values));
                    }
                    parent.properties_mut().insert(property.clone(), array);
                }
            }
            ParamKind::Scalar(scalar_type) => {
                let mut fragment = Schema::scalar(scalar_type.clone());
                fragment.description = strip_tags_opt(doc.description.as_deref());
                fragment.default_value = doc.default_value.clone();
                if let Some(values) = &doc.allowed_values {
                    fragment.enum_values = Some(clean_enum(values));
                }
                parent.properties_mut().insert(property.clone(), fragment);
            }
        }

        // The property itself is required even when its children are not.
        if !doc.optional {
            parent.push_required(&property);
        }

        match kind {
            ParamKind::ArrayOfObject => {
                let mut new_path = path;
                new_path.push(Step::Prop(property));
                new_path.push(Step::Items);
                mounts.register(doc.field.clone(), new_path);
            }
            ParamKind::Object => {
                let mut new_path = path;
                new_path.push(Step::Prop(property));
                mounts.register(doc.field.clone(), new_path);
            }
            _ => {}
        }
    }

    Ok(())
}

/// Build flat route/query/header parameters from one declaration group.
///
/// Dotted fields nest one level into a previously declared object parameter;
/// deeper paths and orphaned paths are logged and dropped.
pub fn flat_parameters(docs: &[FieldDoc], location: ParameterLocation) -> Vec<Parameter> {
    let mut params: Vec<Parameter> = Vec::new();
    let mut by_name: IndexMap<String, usize> = IndexMap::new();

    for doc in docs {
        if !doc.field.contains('.') {
            let kind = ParamKind::classify(doc.field_type.as_deref());
            let mut schema = match &kind {
                ParamKind::Scalar(scalar_type) => Schema::scalar(scalar_type.clone()),
                ParamKind::Array(element) => Schema::array_of(Schema::scalar(element.clone())),
                ParamKind::ArrayOfObject => Schema::array_of(Schema::scalar("object")),
                ParamKind::Object => {
                    let mut object = Schema::object();
                    if location == ParameterLocation::Query {
                        object.style = Some("deepObject".to_string());
                        object.explode = Some(true);
                    }
                    object
                }
            };
            if let Some(values) = &doc.allowed_values {
                schema.enum_values = Some(clean_enum(values));
            }
            // Flat parameters never serialize a `default`.
            by_name.insert(doc.field.clone(), params.len());
            params.push(Parameter {
                name: doc.field.clone(),
                location,
                description: strip_tags_opt(doc.description.as_deref()),
                required: doc.default_value.is_none() && !doc.optional,
                schema,
            });
            continue;
        }

        let segments: Vec<&str> = doc.field.split('.').collect();
        if segments.len() > 2 {
            log::error!(
                "nested path with more than 2 levels is not supported: {}",
                doc.field
            );
            continue;
        }
        let (object_name, property) = (segments[0], segments[1]);
        let Some(&index) = by_name.get(object_name) else {
            log::error!(
                "dropping `{}`: parent parameter `{}` was not declared",
                doc.field,
                object_name
            );
            continue;
        };
        let parent = &mut params[index];
        if parent.schema.properties.is_none() {
            log::error!(
                "dropping `{}`: parent parameter `{}` is not an object",
                doc.field,
                object_name
            );
            continue;
        }

        let mut item = Schema::scalar(
            doc.field_type
                .as_deref()
                .unwrap_or("string")
                .to_ascii_lowercase(),
        );
        item.description = strip_tags_opt(doc.description.as_deref());
        if let Some(values) = &doc.allowed_values {
            item.enum_values = Some(clean_enum(values));
        }
        parent
            .schema
            .properties_mut()
            .insert(property.to_string(), item);
        if doc.default_value.is_none() && !doc.optional {
            parent.schema.push_required(property);
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn field(name: &str, field_type: Option<&str>, optional: bool) -> FieldDoc {
        FieldDoc {
            group: "Body".to_string(),
            field_type: field_type.map(str::to_string),
            field: name.to_string(),
            optional,
            ..FieldDoc::default()
        }
    }

    #[test]
    fn classify_is_case_insensitive_with_string_default() {
        assert_eq!(ParamKind::classify(None), ParamKind::Scalar("string".into()));
        assert_eq!(ParamKind::classify(Some("Number")), ParamKind::Scalar("number".into()));
        assert_eq!(ParamKind::classify(Some("Object")), ParamKind::Object);
        assert_eq!(ParamKind::classify(Some("String[]")), ParamKind::Array("string".into()));
        assert_eq!(ParamKind::classify(Some("Object[]")), ParamKind::ArrayOfObject);
    }

    #[test]
    fn clean_enum_strips_quotes_and_keeps_order() {
        let values = vec![
            "\"b\"".to_string(),
            " 'a' ".to_string(),
            "`c`".to_string(),
        ];
        assert_eq!(clean_enum(&values), vec!["b", "a", "c"]);
    }

    #[test]
    fn scalar_body_param_lands_at_root() {
        let mut schema = Schema::object();
        let mut doc = field("name", Some("String"), false);
        doc.description = Some("<p>The name</p>".to_string());
        doc.default_value = Some(json!("bob"));
        transfer_body_params(&[doc], &mut schema).unwrap();

        let prop = &schema.properties.as_ref().unwrap()["name"];
        assert_eq!(prop.schema_type.as_deref(), Some("string"));
        assert_eq!(prop.description.as_deref(), Some("The name"));
        assert_eq!(prop.default_value, Some(json!("bob")));
        assert_eq!(schema.required.as_deref(), Some(&["name".to_string()][..]));
    }

    #[test]
    fn object_param_opens_a_mount_point() {
        let mut schema = Schema::object();
        let docs = vec![
            field("address", Some("Object"), false),
            field("address.city", Some("String"), false),
            field("address.zip", Some("String"), true),
        ];
        transfer_body_params(&docs, &mut schema).unwrap();

        let address = &schema.properties.as_ref().unwrap()["address"];
        assert_eq!(address.schema_type.as_deref(), Some("object"));
        let props = address.properties.as_ref().unwrap();
        assert!(props.contains_key("city"));
        assert!(props.contains_key("zip"));
        // city required on the nested fragment, zip optional
        assert_eq!(address.required.as_deref(), Some(&["city".to_string()][..]));
        // the object itself is required on the root
        assert_eq!(schema.required.as_deref(), Some(&["address".to_string()][..]));
    }

    #[test]
    fn array_of_object_chains_mount_points() {
        let mut schema = Schema::object();
        let docs = vec![
            field("items", Some("Object[]"), false),
            field("items.sku", Some("String"), false),
            field("items.qty", Some("Number"), false),
        ];
        transfer_body_params(&docs, &mut schema).unwrap();

        let items_array = &schema.properties.as_ref().unwrap()["items"];
        assert_eq!(items_array.schema_type.as_deref(), Some("array"));
        let element = items_array.items.as_ref().unwrap();
        let props = element.properties.as_ref().unwrap();
        assert_eq!(props["sku"].schema_type.as_deref(), Some("string"));
        assert_eq!(props["qty"].schema_type.as_deref(), Some("number"));
        assert_eq!(
            element.required.as_deref(),
            Some(&["sku".to_string(), "qty".to_string()][..])
        );
    }

    #[test]
    fn scalar_array_carries_enum_at_array_level() {
        let mut schema = Schema::object();
        let mut doc = field("roles", Some("String[]"), false);
        doc.allowed_values = Some(vec!["'admin'".to_string(), "\"user\"".to_string()]);
        transfer_body_params(&[doc], &mut schema).unwrap();

        let roles = &schema.properties.as_ref().unwrap()["roles"];
        assert_eq!(roles.schema_type.as_deref(), Some("array"));
        assert_eq!(
            roles.enum_values.as_deref(),
            Some(&["admin".to_string(), "user".to_string()][..])
        );
        assert_eq!(
            roles.items.as_ref().unwrap().schema_type.as_deref(),
            Some("string")
        );
    }

    #[test]
    fn required_tracked_for_every_kind() {
        let mut schema = Schema::object();
        let docs = vec![
            field("a", Some("String"), false),
            field("b", Some("Object"), false),
            field("c", Some("Number[]"), false),
            field("d", Some("Object[]"), false),
        ];
        transfer_body_params(&docs, &mut schema).unwrap();
        assert_eq!(
            schema.required.as_deref(),
            Some(&["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()][..])
        );
    }

    #[test]
    fn missing_parent_mount_point_fails_the_body() {
        let mut schema = Schema::object();
        let docs = vec![field("address.city", Some("String"), false)];
        let err = transfer_body_params(&docs, &mut schema).unwrap_err();
        assert!(matches!(err, ConvertError::MissingMountPoint { .. }));
    }

    #[test]
    fn flat_query_object_gets_deep_object_style() {
        let docs = vec![field("filter", Some("Object"), true)];
        let params = flat_parameters(&docs, ParameterLocation::Query);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].schema.style.as_deref(), Some("deepObject"));
        assert_eq!(params[0].schema.explode, Some(true));
        assert!(!params[0].required);

        // path objects do not pick up the query-only style
        let params = flat_parameters(&docs, ParameterLocation::Path);
        assert_eq!(params[0].schema.style, None);
    }

    #[test]
    fn flat_dotted_field_nests_into_parent() {
        let docs = vec![
            field("filter", Some("Object"), true),
            field("filter.status", Some("String"), false),
        ];
        let params = flat_parameters(&docs, ParameterLocation::Query);
        assert_eq!(params.len(), 1);
        let props = params[0].schema.properties.as_ref().unwrap();
        assert_eq!(props["status"].schema_type.as_deref(), Some("string"));
        assert_eq!(
            params[0].schema.required.as_deref(),
            Some(&["status".to_string()][..])
        );
    }

    #[test]
    fn flat_dotted_field_too_deep_is_dropped() {
        let docs = vec![
            field("filter", Some("Object"), true),
            field("filter.range.min", Some("Number"), false),
        ];
        let params = flat_parameters(&docs, ParameterLocation::Query);
        assert!(!params[0].schema.has_properties());
    }

    #[test]
    fn flat_dotted_field_without_parent_is_dropped() {
        let docs = vec![field("filter.status", Some("String"), false)];
        let params = flat_parameters(&docs, ParameterLocation::Query);
        assert!(params.is_empty());
    }

    #[test]
    fn flat_default_value_makes_param_optional() {
        let mut doc = field("limit", Some("Number"), false);
        doc.default_value = Some(json!(10));
        let params = flat_parameters(&[doc], ParameterLocation::Query);
        assert!(!params[0].required);
        // default is not serialized for flat parameters
        assert_eq!(params[0].schema.default_value, None);
    }
}
