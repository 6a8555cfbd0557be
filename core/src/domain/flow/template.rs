use serde_json::Value;

use crate::domain::{
    common::entities::app_errors::CoreError,
    flow::value_objects::PromptPart,
    schema::{DataUri, FieldKind, ObjectSchema},
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
    Media(String),
}

/// Prompt text with `{{field}}`, `{{{field}}}` and `{{media url=field}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    pub fn parse(source: &str) -> Result<Self, CoreError> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }

            let after = &rest[start..];
            let (open, close) = if after.starts_with("{{{") {
                ("{{{", "}}}")
            } else {
                ("{{", "}}")
            };
            let body_and_rest = &after[open.len()..];
            let end = body_and_rest.find(close).ok_or_else(|| {
                CoreError::InvalidTemplate(format!(
                    "unclosed placeholder near '{}'",
                    truncate(after)
                ))
            })?;

            segments.push(parse_placeholder(
                body_and_rest[..end].trim(),
                open.len() == 3,
            )?);
            rest = &body_and_rest[end + close.len()..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Field names referenced by the template, in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Field(name) | Segment::Media(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Every placeholder must name an input field; media placeholders must name
    /// data-URI fields and text placeholders must not.
    pub fn check_against(&self, schema: &ObjectSchema) -> Result<(), CoreError> {
        for segment in &self.segments {
            let (name, is_media) = match segment {
                Segment::Literal(_) => continue,
                Segment::Field(name) => (name, false),
                Segment::Media(name) => (name, true),
            };

            let spec = schema.field(name).ok_or_else(|| {
                CoreError::InvalidTemplate(format!("placeholder '{name}' is not an input field"))
            })?;

            let is_data_uri = spec.kind == FieldKind::DataUri;
            if is_media && !is_data_uri {
                return Err(CoreError::InvalidTemplate(format!(
                    "media placeholder '{name}' must reference a data URI field"
                )));
            }
            if !is_media && is_data_uri {
                return Err(CoreError::InvalidTemplate(format!(
                    "data URI field '{name}' must be referenced as media"
                )));
            }
        }
        Ok(())
    }

    /// Substitutes validated input fields. Adjacent text is merged into one part.
    pub fn render(&self, input: &Value) -> Result<Vec<PromptPart>, CoreError> {
        let mut parts = Vec::new();
        let mut buffer = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => buffer.push_str(text),
                Segment::Field(name) => match input.get(name) {
                    Some(Value::String(text)) => buffer.push_str(text),
                    Some(Value::Null) | None => {}
                    Some(other) => buffer.push_str(&other.to_string()),
                },
                Segment::Media(name) => {
                    let uri = input
                        .get(name)
                        .and_then(Value::as_str)
                        .ok_or(CoreError::Invalid)?;
                    let uri = DataUri::parse_shape(uri).map_err(|_| CoreError::Invalid)?;

                    if !buffer.is_empty() {
                        parts.push(PromptPart::Text(std::mem::take(&mut buffer)));
                    }
                    parts.push(PromptPart::Media {
                        mime_type: uri.mime_type().to_string(),
                        data: uri.data().to_string(),
                    });
                }
            }
        }

        if !buffer.is_empty() {
            parts.push(PromptPart::Text(buffer));
        }
        Ok(parts)
    }
}

fn parse_placeholder(body: &str, triple: bool) -> Result<Segment, CoreError> {
    if let Some(media) = body.strip_prefix("media ") {
        if triple {
            return Err(CoreError::InvalidTemplate(
                "media placeholders use double braces".to_string(),
            ));
        }
        let name = media.trim().strip_prefix("url=").ok_or_else(|| {
            CoreError::InvalidTemplate(format!("malformed media placeholder '{body}'"))
        })?;
        return Ok(Segment::Media(checked_name(name)?));
    }

    Ok(Segment::Field(checked_name(body)?))
}

fn checked_name(name: &str) -> Result<String, CoreError> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(CoreError::InvalidTemplate(format!(
            "invalid placeholder name '{name}'"
        )));
    }
    Ok(name.to_string())
}

fn truncate(text: &str) -> String {
    text.chars().take(24).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::schema::FieldSpec;

    fn schema() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldSpec::required("photoDataUri", FieldKind::DataUri, "Photo"),
            FieldSpec::required("gender", FieldKind::Enum(&["male", "female"]), "Gender"),
        ])
    }

    #[test]
    fn renders_text_and_media_parts() {
        let template = PromptTemplate::parse(
            "Gender: {{{gender}}}\nPhoto: {{media url=photoDataUri}}\nThanks {{gender}}.",
        )
        .unwrap();

        let parts = template
            .render(&json!({
                "gender": "female",
                "photoDataUri": "data:image/png;base64,iVBORw0KGgo="
            }))
            .unwrap();

        assert_eq!(
            parts,
            vec![
                PromptPart::Text("Gender: female\nPhoto: ".to_string()),
                PromptPart::Media {
                    mime_type: "image/png".to_string(),
                    data: "iVBORw0KGgo=".to_string(),
                },
                PromptPart::Text("\nThanks female.".to_string()),
            ]
        );
    }

    #[test]
    fn lists_placeholders_in_order() {
        let template =
            PromptTemplate::parse("{{media url=photoDataUri}} and {{ gender }}").unwrap();

        assert_eq!(template.placeholders(), vec!["photoDataUri", "gender"]);
    }

    #[test]
    fn rejects_unclosed_and_malformed_placeholders() {
        assert!(PromptTemplate::parse("Hello {{gender").is_err());
        assert!(PromptTemplate::parse("{{media photoDataUri}}").is_err());
        assert!(PromptTemplate::parse("{{{media url=photoDataUri}}}").is_err());
        assert!(PromptTemplate::parse("{{bad-name}}").is_err());
    }

    #[test]
    fn checks_placeholders_against_the_input_schema() {
        let schema = schema();

        assert!(
            PromptTemplate::parse("{{media url=photoDataUri}} {{gender}}")
                .unwrap()
                .check_against(&schema)
                .is_ok()
        );
        assert!(
            PromptTemplate::parse("{{skinTone}}")
                .unwrap()
                .check_against(&schema)
                .is_err()
        );
        assert!(
            PromptTemplate::parse("{{photoDataUri}}")
                .unwrap()
                .check_against(&schema)
                .is_err()
        );
        assert!(
            PromptTemplate::parse("{{media url=gender}}")
                .unwrap()
                .check_against(&schema)
                .is_err()
        );
    }
}
