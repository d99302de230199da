use crate::openapi::Schema;

/// Merge `incoming` into `base` as a structural union.
///
/// Matching properties merge recursively, array item schemas merge, and
/// properties present on only one side are kept. Nothing is ever narrowed:
/// on a type conflict the base type wins (logged at debug), and scalar
/// metadata keeps the base value, filling gaps from the incoming side.
/// `required` and `enum` union in base order with incoming entries appended.
pub fn structural_union(base: &mut Schema, incoming: Schema) {
    match (&base.schema_type, &incoming.schema_type) {
        (None, Some(_)) => base.schema_type = incoming.schema_type.clone(),
        (Some(a), Some(b)) if a != b => {
            log::debug!("schema type conflict: keeping `{}` over `{}`", a, b);
        }
        _ => {}
    }

    fill(&mut base.format, incoming.format);
    fill(&mut base.title, incoming.title);
    fill(&mut base.description, incoming.description);
    fill(&mut base.default_value, incoming.default_value);
    fill(&mut base.example, incoming.example);
    fill(&mut base.nullable, incoming.nullable);
    fill(&mut base.style, incoming.style);
    fill(&mut base.explode, incoming.explode);

    if let Some(values) = incoming.enum_values {
        let merged = base.enum_values.get_or_insert_with(Vec::new);
        for value in values {
            if !merged.contains(&value) {
                merged.push(value);
            }
        }
    }

    if let Some(names) = incoming.required {
        let merged = base.required.get_or_insert_with(Vec::new);
        for name in names {
            if !merged.contains(&name) {
                merged.push(name);
            }
        }
    }

    if let Some(properties) = incoming.properties {
        let merged = base.properties.get_or_insert_with(Default::default);
        for (name, schema) in properties {
            match merged.get_mut(&name) {
                Some(existing) => structural_union(existing, schema),
                None => {
                    merged.insert(name, schema);
                }
            }
        }
    }

    if let Some(items) = incoming.items {
        match base.items.as_mut() {
            Some(existing) => structural_union(existing, *items),
            None => base.items = Some(items),
        }
    }
}

fn fill<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if slot.is_none() {
        *slot = incoming;
    }
}
