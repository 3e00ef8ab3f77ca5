pub mod document;

pub use document::{normalize_name, Document, DocumentOutcome, FileList, ReadError, JSON_SUFFIX};
