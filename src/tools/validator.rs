//! Declarative argument validation.
//!
//! Every tool carries a list of [`Field`] descriptors plus optional
//! cross-field [`Check`]s. One generic routine applies them in a fixed
//! order so that the first reported problem is deterministic:
//!
//! 1. required presence
//! 2. type conformance (with lenient coercion of numeric/boolean strings)
//! 3. non-empty after trim, for strings
//! 4. fixed length and identifier shape
//! 5. numeric range
//! 6. enumerated membership
//! 7. cross-field checks
//!
//! Defaults are filled in before step 1. Field names may be dotted paths
//! (`clock.limit`) to reach into nested objects; `null` counts as absent.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Number, Value};

use crate::interfaces::error::ToolError;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// JSON type a field must have after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    Object,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Object => "object",
        }
    }
}

/// Constraint descriptor for one argument.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<Value>,
    pub non_empty: bool,
    pub length: Option<usize>,
    pub identifier: bool,
    pub range: Option<(f64, f64)>,
    pub one_of: Option<&'static [&'static str]>,
}

impl Field {
    fn new(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            default: None,
            non_empty: false,
            length: None,
            identifier: false,
            range: None,
            one_of: None,
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::String, description)
    }

    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::Integer, description)
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::Number, description)
    }

    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean, description)
    }

    pub fn object(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::Object, description)
    }

    /// Must be present. Strings must additionally be non-blank.
    pub fn required(mut self) -> Self {
        self.required = true;
        if self.kind == FieldKind::String {
            self.non_empty = true;
        }
        self
    }

    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    /// Exact character count, e.g. 8 for game and tournament ids.
    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Restrict to `[A-Za-z0-9_-]`, safe to place in a URL path.
    pub fn identifier(mut self) -> Self {
        self.identifier = true;
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.range = Some((min as f64, max as f64));
        self
    }

    pub fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.one_of = Some(values);
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn default_int(self, value: i64) -> Self {
        self.default_value(Value::from(value))
    }

    pub fn default_bool(self, value: bool) -> Self {
        self.default_value(Value::Bool(value))
    }

    pub fn default_str(self, value: &'static str) -> Self {
        self.default_value(Value::String(value.to_string()))
    }

    /// Parent object name for dotted fields (`clock` for `clock.limit`).
    pub fn parent(&self) -> Option<&'static str> {
        self.name.rsplit_once('.').map(|(parent, _)| parent)
    }

    /// Last path component (`limit` for `clock.limit`).
    pub fn leaf(&self) -> &'static str {
        self.name.rsplit('.').next().unwrap_or(self.name)
    }
}

/// Constraint spanning several fields.
#[derive(Debug, Clone)]
pub enum Check {
    /// Either all of these are present or none is.
    Together(&'static [&'static str]),
    /// At most one of these may be present.
    Exclusive(&'static [&'static str]),
}

/// Argument bag that has passed validation, with defaults applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: Map<String, Value>,
}

impl Args {
    /// Look up a (possibly dotted) argument; `null` reads as absent.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.values, path)
    }

    pub fn str(&self, name: &str) -> Result<&str, ToolError> {
        self.opt_str(name).ok_or_else(|| missing(name))
    }

    pub fn opt_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn int(&self, name: &str) -> Result<i64, ToolError> {
        self.opt_int(name).ok_or_else(|| missing(name))
    }

    pub fn opt_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn number(&self, name: &str) -> Result<f64, ToolError> {
        self.opt_number(name).ok_or_else(|| missing(name))
    }

    pub fn opt_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn bool(&self, name: &str) -> Result<bool, ToolError> {
        self.opt_bool(name).ok_or_else(|| missing(name))
    }

    pub fn opt_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

fn missing(name: &str) -> ToolError {
    ToolError::validation(format!("Missing required argument: {}", name))
}

fn lookup<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = map.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    (!current.is_null()).then_some(current)
}

fn lookup_mut<'a>(map: &'a mut Map<String, Value>, path: &str) -> Option<&'a mut Value> {
    let mut parts = path.split('.');
    let mut current = map.get_mut(parts.next()?)?;
    for part in parts {
        current = current.as_object_mut()?.get_mut(part)?;
    }
    (!current.is_null()).then_some(current)
}

/// Validate a raw argument value against descriptors.
///
/// `raw` may be an object, `null` (treated as empty) or anything else
/// (rejected).
pub fn validate(fields: &[Field], checks: &[Check], raw: Value) -> Result<Args, ToolError> {
    let mut values = match raw {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(ToolError::validation(format!(
                "Arguments must be a JSON object, got {}",
                json_type(&other)
            )))
        }
    };

    apply_defaults(fields, &mut values);

    // (1) required presence
    for field in fields.iter().filter(|f| f.required) {
        if lookup(&values, field.name).is_none() {
            return Err(missing(field.name));
        }
    }

    // (2) type conformance
    for field in fields {
        if let Some(value) = lookup_mut(&mut values, field.name) {
            coerce(field, value)?;
        }
    }

    // (3) non-empty strings
    for field in fields.iter().filter(|f| f.non_empty) {
        if let Some(Value::String(s)) = lookup(&values, field.name) {
            if s.trim().is_empty() {
                return Err(ToolError::validation(format!(
                    "Argument '{}' must not be empty",
                    field.name
                )));
            }
        }
    }

    // (4) fixed length and identifier shape
    for field in fields {
        let Some(Value::String(s)) = lookup(&values, field.name) else {
            continue;
        };
        if let Some(expected) = field.length {
            let actual = s.chars().count();
            if actual != expected {
                return Err(ToolError::validation(format!(
                    "Argument '{}' must be exactly {} characters (got {})",
                    field.name, expected, actual
                )));
            }
        }
        if field.identifier && !IDENTIFIER.is_match(s) {
            return Err(ToolError::validation(format!(
                "Argument '{}' may only contain letters, digits, '_' and '-' (got '{}')",
                field.name, s
            )));
        }
    }

    // (5) numeric range
    for field in fields {
        let Some((min, max)) = field.range else {
            continue;
        };
        if let Some(n) = lookup(&values, field.name).and_then(Value::as_f64) {
            if n < min || n > max {
                return Err(ToolError::validation(format!(
                    "Argument '{}' must be between {} and {} (got {})",
                    field.name, min, max, n
                )));
            }
        }
    }

    // (6) enumerated membership
    for field in fields {
        let Some(allowed) = field.one_of else {
            continue;
        };
        if let Some(value) = lookup(&values, field.name) {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if !allowed.contains(&text.as_str()) {
                return Err(ToolError::validation(format!(
                    "Argument '{}' must be one of: {} (got '{}')",
                    field.name,
                    allowed.join(", "),
                    text
                )));
            }
        }
    }

    // (7) cross-field checks
    for check in checks {
        match check {
            Check::Together(names) => {
                let present = names.iter().filter(|n| lookup(&values, n).is_some()).count();
                if present != 0 && present != names.len() {
                    return Err(ToolError::validation(format!(
                        "Arguments {} must be provided together",
                        names.join(" and ")
                    )));
                }
            }
            Check::Exclusive(names) => {
                let present: Vec<&str> = names
                    .iter()
                    .copied()
                    .filter(|n| lookup(&values, n).is_some())
                    .collect();
                if present.len() > 1 {
                    return Err(ToolError::validation(format!(
                        "Arguments {} cannot be combined",
                        present.join(" and ")
                    )));
                }
            }
        }
    }

    Ok(Args { values })
}

fn apply_defaults(fields: &[Field], values: &mut Map<String, Value>) {
    for field in fields {
        let Some(default) = &field.default else {
            continue;
        };
        // Dotted defaults would have to invent a parent object; only
        // top-level fields carry defaults.
        if field.parent().is_some() {
            continue;
        }
        let absent = values.get(field.name).map_or(true, Value::is_null);
        if absent {
            values.insert(field.name.to_string(), default.clone());
        }
    }
}

fn coerce(field: &Field, value: &mut Value) -> Result<(), ToolError> {
    let coerced = match (field.kind, &*value) {
        (FieldKind::String, Value::String(_)) => None,
        (FieldKind::Integer, Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(_), _) => None,
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some(Value::from(f as i64))
            }
            _ => return Err(type_error(field)),
        },
        (FieldKind::Integer, Value::String(s)) => match s.trim().parse::<i64>() {
            Ok(n) => Some(Value::from(n)),
            Err(_) => return Err(type_error(field)),
        },
        (FieldKind::Number, Value::Number(_)) => None,
        (FieldKind::Number, Value::String(s)) => {
            match s.trim().parse::<f64>().ok().and_then(Number::from_f64) {
                Some(n) => Some(Value::Number(n)),
                None => return Err(type_error(field)),
            }
        }
        (FieldKind::Boolean, Value::Bool(_)) => None,
        (FieldKind::Boolean, Value::String(s)) => match s.trim() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => return Err(type_error(field)),
        },
        (FieldKind::Object, Value::Object(_)) => None,
        _ => return Err(type_error(field)),
    };
    if let Some(new_value) = coerced {
        *value = new_value;
    }
    Ok(())
}

fn type_error(field: &Field) -> ToolError {
    let article = match field.kind {
        FieldKind::Integer | FieldKind::Object => "an",
        _ => "a",
    };
    ToolError::validation(format!(
        "Argument '{}' must be {} {}",
        field.name,
        article,
        field.kind.as_str()
    ))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
