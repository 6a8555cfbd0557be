use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value, json};

use crate::domain::schema::value_objects::{DataUri, FieldErrors};

pub const ROOT_PATH: &str = "$";

static HEX_COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color pattern is valid"));

pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_REGEX.is_match(value)
}

/// Semantic type of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text { min_length: usize },
    Enum(&'static [&'static str]),
    Number { min: Option<f64>, max: Option<f64> },
    DataUri,
    HexColor,
    Array { items: Box<FieldKind>, min_items: usize },
    Object(ObjectSchema),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
    pub required: bool,
}

impl FieldSpec {
    pub fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: true,
        }
    }

    pub fn optional(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
        }
    }
}

/// Declarative description of a JSON object contract.
///
/// The same description drives runtime validation of untyped values and the
/// response schema handed to the model backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    pub description: Option<&'static str>,
    pub fields: Vec<FieldSpec>,
}

impl ObjectSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            description: None,
            fields,
        }
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Checks `value` against every field and collects all failures.
    /// Keys absent from the schema are ignored.
    pub fn validate(&self, value: &Value) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        self.validate_at(value, None, &mut errors);
        errors.into_result()
    }

    fn validate_at(&self, value: &Value, prefix: Option<&str>, errors: &mut FieldErrors) {
        let Some(object) = value.as_object() else {
            errors.add(prefix.unwrap_or(ROOT_PATH), "Expected object");
            return;
        };

        for spec in &self.fields {
            let path = match prefix {
                Some(prefix) => format!("{prefix}.{}", spec.name),
                None => spec.name.to_string(),
            };

            match object.get(spec.name) {
                None | Some(Value::Null) => {
                    if spec.required {
                        errors.add(path, "Required");
                    }
                }
                Some(field_value) => validate_kind(&spec.kind, field_value, &path, errors),
            }
        }
    }

    /// Renders the contract in the backend's response-schema dialect.
    pub fn to_response_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for spec in &self.fields {
            properties.insert(
                spec.name.to_string(),
                kind_to_schema(&spec.kind, Some(spec.description)),
            );
            if spec.required {
                required.push(Value::String(spec.name.to_string()));
            }
        }

        let mut schema = json!({
            "type": "object",
            "properties": properties,
            "required": required,
        });
        if let Some(description) = self.description {
            schema["description"] = Value::String(description.to_string());
        }
        schema
    }
}

fn validate_kind(kind: &FieldKind, value: &Value, path: &str, errors: &mut FieldErrors) {
    match kind {
        FieldKind::Text { min_length } => match value.as_str() {
            Some(text) if text.trim().chars().count() < *min_length => {
                errors.add(path, "Must not be empty");
            }
            Some(_) => {}
            None => errors.add(path, "Expected string"),
        },
        FieldKind::Enum(allowed) => match value.as_str() {
            Some(text) if allowed.contains(&text) => {}
            Some(_) => errors.add(
                path,
                format!("Expected one of: {}", allowed.join(", ")),
            ),
            None => errors.add(path, "Expected string"),
        },
        FieldKind::Number { min, max } => match value.as_f64() {
            Some(number) => {
                let below = min.is_some_and(|min| number < min);
                let above = max.is_some_and(|max| number > max);
                if below || above {
                    errors.add(path, range_message(*min, *max));
                }
            }
            None => errors.add(path, "Expected number"),
        },
        FieldKind::DataUri => match value.as_str() {
            Some(text) => {
                if let Err(e) = DataUri::parse(text) {
                    errors.add(path, format!("Invalid data URI: {e}"));
                }
            }
            None => errors.add(path, "Expected string"),
        },
        FieldKind::HexColor => match value.as_str() {
            Some(text) if is_hex_color(text) => {}
            Some(_) => errors.add(path, "Expected a 6-digit hex color such as #A1B2C3"),
            None => errors.add(path, "Expected string"),
        },
        FieldKind::Array { items, min_items } => match value.as_array() {
            Some(values) => {
                if values.len() < *min_items {
                    errors.add(path, format!("Expected at least {min_items} item(s)"));
                }
                for (index, item) in values.iter().enumerate() {
                    validate_kind(items, item, &format!("{path}[{index}]"), errors);
                }
            }
            None => errors.add(path, "Expected array"),
        },
        FieldKind::Object(schema) => schema.validate_at(value, Some(path), errors),
    }
}

fn range_message(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("Must be between {min} and {max}"),
        (Some(min), None) => format!("Must be at least {min}"),
        (None, Some(max)) => format!("Must be at most {max}"),
        (None, None) => "Out of range".to_string(),
    }
}

fn kind_to_schema(kind: &FieldKind, description: Option<&str>) -> Value {
    let (mut schema, constraint) = match kind {
        FieldKind::Text { .. } => (json!({ "type": "string" }), None),
        FieldKind::Enum(allowed) => (
            json!({ "type": "string", "format": "enum", "enum": allowed }),
            None,
        ),
        FieldKind::Number { min, max } => (
            json!({ "type": "number" }),
            Some(format!("{}.", range_message(*min, *max))),
        ),
        FieldKind::DataUri => (
            json!({ "type": "string" }),
            Some("Format: data:<mimetype>;base64,<encoded_data>.".to_string()),
        ),
        FieldKind::HexColor => (
            json!({ "type": "string" }),
            Some("Must match ^#[0-9a-fA-F]{6}$.".to_string()),
        ),
        FieldKind::Array { items, .. } => (
            json!({ "type": "array", "items": kind_to_schema(items, None) }),
            None,
        ),
        FieldKind::Object(object) => (object.to_response_schema(), None),
    };

    let text = match (description, constraint) {
        (Some(description), Some(constraint)) => Some(format!("{description} {constraint}")),
        (Some(description), None) => Some(description.to_string()),
        (None, Some(constraint)) => Some(constraint),
        (None, None) => None,
    };
    if let Some(text) = text {
        schema["description"] = Value::String(text);
    }
    schema
}
