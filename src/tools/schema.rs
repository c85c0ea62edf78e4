//! JSON Schema generation from constraint descriptors.
//!
//! The schema advertised in `tools/list` is derived from the same
//! [`Field`] list the validator enforces, so the two cannot drift apart.

use serde_json::{json, Map, Value};

use super::validator::{Check, Field, FieldKind};

/// Build an `inputSchema` object for a tool.
pub fn input_schema(fields: &[Field], checks: &[Check]) -> Value {
    let mut root = object_schema(None);

    for field in fields {
        let property = property_schema(field);
        match field.parent() {
            None => insert_property(&mut root, field.name, property, field.required),
            Some(parent) => {
                let Some(parent_schema) = find_object_mut(&mut root, parent) else {
                    continue;
                };
                insert_property(parent_schema, field.leaf(), property, field.required);
            }
        }
    }

    // Fields that must travel together inside one object become required
    // members of that object.
    for check in checks {
        let Check::Together(names) = check else {
            continue;
        };
        let parents: Vec<Option<&str>> = names
            .iter()
            .map(|n| n.rsplit_once('.').map(|(p, _)| p))
            .collect();
        let Some(Some(parent)) = parents.first().copied() else {
            continue;
        };
        if parents.iter().any(|p| *p != Some(parent)) {
            continue;
        }
        if let Some(parent_schema) = find_object_mut(&mut root, parent) {
            for name in names.iter() {
                let leaf = name.rsplit('.').next().unwrap_or(*name);
                push_required(parent_schema, leaf);
            }
        }
    }

    root
}

fn object_schema(description: Option<&str>) -> Value {
    let mut schema = json!({
        "type": "object",
        "properties": {},
    });
    if let Some(description) = description {
        schema["description"] = Value::String(description.to_string());
    }
    schema
}

fn property_schema(field: &Field) -> Value {
    if field.kind == FieldKind::Object {
        return object_schema(Some(field.description));
    }

    let mut schema = Map::new();
    schema.insert("type".into(), Value::String(field.kind.as_str().into()));
    schema.insert("description".into(), Value::String(field.description.into()));

    if let Some(length) = field.length {
        schema.insert("minLength".into(), Value::from(length));
        schema.insert("maxLength".into(), Value::from(length));
    } else if field.non_empty {
        schema.insert("minLength".into(), Value::from(1));
    }
    if field.identifier {
        schema.insert("pattern".into(), Value::String("^[A-Za-z0-9_-]+$".into()));
    }
    if let Some((min, max)) = field.range {
        schema.insert("minimum".into(), number(min, field.kind));
        schema.insert("maximum".into(), number(max, field.kind));
    }
    if let Some(values) = field.one_of {
        let options = values
            .iter()
            .map(|v| match field.kind {
                FieldKind::Integer => v.parse::<i64>().map(Value::from).unwrap_or_else(|_| Value::from(*v)),
                _ => Value::from(*v),
            })
            .collect();
        schema.insert("enum".into(), Value::Array(options));
    }
    if let Some(default) = &field.default {
        schema.insert("default".into(), default.clone());
    }

    Value::Object(schema)
}

fn number(value: f64, kind: FieldKind) -> Value {
    if kind == FieldKind::Integer {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

fn insert_property(schema: &mut Value, name: &str, property: Value, required: bool) {
    if let Some(properties) = schema.get_mut("properties").and_then(Value::as_object_mut) {
        properties.insert(name.to_string(), property);
    }
    if required {
        push_required(schema, name);
    }
}

fn push_required(schema: &mut Value, name: &str) {
    let Some(object) = schema.as_object_mut() else {
        return;
    };
    let required = object
        .entry("required")
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Some(list) = required.as_array_mut() {
        if !list.iter().any(|v| v == name) {
            list.push(Value::String(name.to_string()));
        }
    }
}

fn find_object_mut<'a>(root: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    let mut current = root;
    for part in path.split('.') {
        current = current.get_mut("properties")?.get_mut(part)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_and_constraints_are_exported() {
        let fields = vec![
            Field::string("perf_type", "Variant").required().one_of(&["bullet", "blitz"]),
            Field::integer("nb", "How many").range(1, 200).default_int(10),
        ];
        let schema = input_schema(&fields, &[]);

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["perf_type"]));
        assert_eq!(schema["properties"]["perf_type"]["enum"], json!(["bullet", "blitz"]));
        assert_eq!(schema["properties"]["nb"]["minimum"], json!(1));
        assert_eq!(schema["properties"]["nb"]["maximum"], json!(200));
        assert_eq!(schema["properties"]["nb"]["default"], json!(10));
    }

    #[test]
    fn test_fixed_length_becomes_min_and_max_length() {
        let fields = vec![Field::string("game_id", "Game").required().length(8).identifier()];
        let schema = input_schema(&fields, &[]);
        let game_id = &schema["properties"]["game_id"];
        assert_eq!(game_id["minLength"], json!(8));
        assert_eq!(game_id["maxLength"], json!(8));
        assert!(game_id["pattern"].is_string());
    }

    #[test]
    fn test_nested_fields_and_together_check() {
        let fields = vec![
            Field::object("clock", "Clock settings"),
            Field::number("clock.limit", "Minutes").range(0, 180),
            Field::integer("clock.increment", "Seconds").range(0, 180),
        ];
        let checks = [Check::Together(&["clock.limit", "clock.increment"])];
        let schema = input_schema(&fields, &checks);
        let clock = &schema["properties"]["clock"];

        assert_eq!(clock["type"], "object");
        assert_eq!(clock["properties"]["limit"]["type"], "number");
        assert_eq!(clock["properties"]["limit"]["maximum"], json!(180.0));
        assert_eq!(clock["required"], json!(["limit", "increment"]));
        assert!(schema.get("required").is_none());
    }

    #[test]
    fn test_integer_enum_emits_numbers() {
        let fields = vec![Field::integer("days", "Days").one_of(&["1", "2", "14"])];
        let schema = input_schema(&fields, &[]);
        assert_eq!(schema["properties"]["days"]["enum"], json!([1, 2, 14]));
    }
}
