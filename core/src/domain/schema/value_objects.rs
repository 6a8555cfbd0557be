use std::{collections::BTreeMap, fmt, str::FromStr, sync::LazyLock};

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose},
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

static MIME_TYPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9!#$&^_.+-]*/[A-Za-z0-9][A-Za-z0-9!#$&^_.+-]*$")
        .expect("mime type pattern is valid")
});

/// Standard alphabet; trailing `=` padding is optional on input.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Field path to messages, in the shape the UI annotates inputs with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Moves every error recorded under `from` (or nested below it) to `to`.
    pub fn rename(self, from: &str, to: &str) -> Self {
        let mut renamed = FieldErrors::new();
        for (field, messages) in self.0 {
            let target = if field == from
                || field.starts_with(&format!("{from}."))
                || field.starts_with(&format!("{from}["))
            {
                to.to_string()
            } else {
                field
            };
            renamed.0.entry(target).or_default().extend(messages);
        }
        renamed
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&rendered)
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DataUriError {
    #[error("must start with 'data:'")]
    MissingScheme,

    #[error("must contain ';base64,' after the MIME type")]
    MissingBase64Marker,

    #[error("must declare a MIME type such as image/png")]
    InvalidMimeType,

    #[error("must carry a non-empty payload")]
    EmptyPayload,

    #[error("payload is not valid base64")]
    InvalidPayload,
}

/// `data:<mimetype>;base64,<payload>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    mime_type: String,
    data: String,
}

impl DataUri {
    pub fn parse(value: &str) -> Result<Self, DataUriError> {
        let uri = Self::parse_shape(value)?;
        PAYLOAD_ENGINE
            .decode(&uri.data)
            .map_err(|_| DataUriError::InvalidPayload)?;

        Ok(uri)
    }

    /// Checks scheme, marker and MIME type but does not decode the payload.
    /// Only for values that already went through [`DataUri::parse`].
    pub fn parse_shape(value: &str) -> Result<Self, DataUriError> {
        let rest = value
            .strip_prefix("data:")
            .ok_or(DataUriError::MissingScheme)?;
        let (mime_type, data) = rest
            .split_once(";base64,")
            .ok_or(DataUriError::MissingBase64Marker)?;

        if !MIME_TYPE_REGEX.is_match(mime_type) {
            return Err(DataUriError::InvalidMimeType);
        }
        if data.is_empty() {
            return Err(DataUriError::EmptyPayload);
        }

        // Stored padded so the backend always receives canonical base64.
        let padding = (4 - data.len() % 4) % 4;
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: format!("{}{}", data, "=".repeat(padding)),
        })
    }

    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data: general_purpose::STANDARD.encode(bytes),
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Base64 payload without the `data:` prefix.
    pub fn data(&self) -> &str {
        &self.data
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const VALUES: &'static [&'static str] = &["male", "female"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown gender '{0}', expected male or female")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(UnknownGender(other.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_data_uri() {
        let uri = DataUri::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();

        assert_eq!(uri.mime_type(), "image/png");
        assert_eq!(uri.data(), "iVBORw0KGgo=");
        assert_eq!(uri.to_string(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn rejects_malformed_data_uris() {
        assert_eq!(
            DataUri::parse("https://example.com/a.png"),
            Err(DataUriError::MissingScheme)
        );
        assert_eq!(
            DataUri::parse("data:image/png,iVBORw0KGgo="),
            Err(DataUriError::MissingBase64Marker)
        );
        assert_eq!(
            DataUri::parse("data:;base64,iVBORw0KGgo="),
            Err(DataUriError::InvalidMimeType)
        );
        assert_eq!(
            DataUri::parse("data:image/png;base64,"),
            Err(DataUriError::EmptyPayload)
        );
        assert_eq!(
            DataUri::parse("data:image/png;base64,@@not-base64@@"),
            Err(DataUriError::InvalidPayload)
        );
    }

    #[test]
    fn accepts_unpadded_payloads_and_pads_them() {
        let uri = DataUri::parse("data:image/png;base64,iVBORw0KGgo").unwrap();

        assert_eq!(uri.data(), "iVBORw0KGgo=");
        assert_eq!(uri.to_string(), "data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(
            DataUri::parse("data:image/png;base64,iVBORw0KG"),
            Err(DataUriError::InvalidPayload)
        );
    }

    #[test]
    fn shape_parse_skips_payload_decoding() {
        let uri = DataUri::parse_shape("data:image/png;base64,@@").unwrap();

        assert_eq!(uri.mime_type(), "image/png");
        assert_eq!(
            DataUri::parse_shape("image/png;base64,iVBORw0KGgo="),
            Err(DataUriError::MissingScheme)
        );
    }

    #[test]
    fn encodes_bytes_as_base64() {
        let uri = DataUri::from_bytes("image/jpeg", &[0xFF, 0xD8, 0xFF]);

        assert_eq!(uri.to_string(), "data:image/jpeg;base64,/9j/");
        assert_eq!(DataUri::parse(&uri.to_string()), Ok(uri));
    }

    #[test]
    fn gender_is_a_closed_set() {
        assert_eq!("male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!("female".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!(
            "Female".parse::<Gender>(),
            Err(UnknownGender("Female".to_string()))
        );
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn rename_moves_nested_paths() {
        let mut errors = FieldErrors::single("photoDataUri", "bad");
        errors.add("gender", "Please select a gender.");

        let renamed = errors.rename("photoDataUri", "faceImage");

        assert_eq!(renamed.get("faceImage"), Some(&["bad".to_string()][..]));
        assert!(renamed.get("photoDataUri").is_none());
        assert_eq!(renamed.len(), 2);
    }
}
