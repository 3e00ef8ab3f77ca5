use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Any JSON value loaded from a single file. No schema is imposed.
pub type Document = Value;

pub const JSON_SUFFIX: &str = ".json";

/// Appends `.json` unless the name already ends with it. Never strips.
pub fn normalize_name(name: &str) -> String {
    if name.ends_with(JSON_SUFFIX) {
        name.to_string()
    } else {
        format!("{}{}", name, JSON_SUFFIX)
    }
}

/// A listed document that could not be opened or decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error reading file {name}: {message}")]
pub struct ReadError {
    pub name: String,
    pub message: String,
}

impl ReadError {
    pub fn new(name: &str, cause: impl std::fmt::Display) -> Self {
        Self {
            name: name.to_string(),
            message: cause.to_string(),
        }
    }

    /// The error-shaped document served in place of the unreadable one.
    pub fn to_body(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

/// Result of resolving a document through the store.
///
/// `Absent` means the name is not in the current listing; `Unreadable` means
/// it is listed but its contents could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOutcome {
    Found(Document),
    Absent,
    Unreadable(ReadError),
}

impl From<Result<Document, ReadError>> for DocumentOutcome {
    fn from(result: Result<Document, ReadError>) -> Self {
        match result {
            Ok(document) => DocumentOutcome::Found(document),
            Err(err) => DocumentOutcome::Unreadable(err),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileList {
    pub files: Vec<String>,
}
