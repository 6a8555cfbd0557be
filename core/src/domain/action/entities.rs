use std::{collections::HashMap, str::FromStr};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::schema::FieldErrors;

/// Lifecycle of a single submission: `initial -> pending -> {success | error}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Initial,
    #[serde(alias = "loading")]
    Pending,
    Success,
    Error,
}

impl ActionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ActionStatus::Success | ActionStatus::Error)
    }

    /// `Pending` is only entered by a new submission, and `Initial` only by an explicit reset.
    pub fn can_transition_to(&self, next: ActionStatus) -> bool {
        match (self, next) {
            (_, ActionStatus::Initial) => true,
            (ActionStatus::Pending, ActionStatus::Pending) => false,
            (_, ActionStatus::Pending) => true,
            (ActionStatus::Pending, ActionStatus::Success | ActionStatus::Error) => true,
            _ => false,
        }
    }
}

/// UI-facing result of one submission. Created fresh per submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActionEnvelope<T> {
    pub status: ActionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl<T> ActionEnvelope<T> {
    pub fn success(message: impl Into<String>, result: T) -> Self {
        Self {
            status: ActionStatus::Success,
            message: Some(message.into()),
            result: Some(result),
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Error,
            message: Some(message.into()),
            result: None,
            errors: None,
        }
    }

    pub fn invalid(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            status: ActionStatus::Error,
            message: Some(message.into()),
            result: None,
            errors: Some(errors),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionEnvelope<U> {
        ActionEnvelope {
            status: self.status,
            message: self.message,
            result: self.result.map(f),
            errors: self.errors,
        }
    }
}

/// A raw uploaded file as received from the transport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: None,
            content_type: Some(content_type.into()),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn mime_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or_default()
    }
}

/// Untyped form submission: text fields plus uploaded files, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct FormSubmission {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_field(name, value);
        self
    }

    pub fn with_file(mut self, name: impl Into<String>, file: UploadedFile) -> Self {
        self.insert_file(name, file);
        self
    }

    pub fn insert_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn insert_file(&mut self, name: impl Into<String>, file: UploadedFile) {
        self.files.insert(name.into(), file);
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }
}

/// Which sibling capability a style-guide submission targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionType {
    Manual,
    Photo,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown submission type '{0}'")]
pub struct UnknownSubmissionType(pub String);

impl FromStr for SubmissionType {
    type Err = UnknownSubmissionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(SubmissionType::Manual),
            "photo" => Ok(SubmissionType::Photo),
            other => Err(UnknownSubmissionType(other.to_string())),
        }
    }
}
