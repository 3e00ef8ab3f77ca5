//! Filesystem-backed document store.
//!
//! Every call re-lists the directory and re-reads files, so edits made
//! outside the service show up on the next request.

use crate::models::{normalize_name, Document, DocumentOutcome, ReadError, JSON_SUFFIX};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use service_core::error::AppError;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::fs;

#[derive(Clone)]
pub struct DocumentStore {
    directory: PathBuf,
    rng: Arc<Mutex<StdRng>>,
}

impl DocumentStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_rng(directory, StdRng::from_entropy())
    }

    /// Uses the given generator for random picks; seed it for reproducible draws.
    pub fn with_rng(directory: impl Into<PathBuf>, rng: StdRng) -> Self {
        Self {
            directory: directory.into(),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Creates the directory and any missing parents. No-op when it exists.
    pub async fn ensure_ready(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.directory).await?;
        Ok(())
    }

    /// Fails when the configured path is missing or is not a directory.
    pub async fn health_check(&self) -> Result<(), AppError> {
        let metadata = fs::metadata(&self.directory).await?;
        if !metadata.is_dir() {
            return Err(AppError::InternalError(anyhow::anyhow!(
                "{} is not a directory",
                self.directory.display()
            )));
        }
        Ok(())
    }

    /// Names of the `*.json` regular files directly inside the directory, in
    /// enumeration order.
    pub async fn list_documents(&self) -> Result<Vec<String>, AppError> {
        let mut entries = fs::read_dir(&self.directory).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !name.ends_with(JSON_SUFFIX) {
                continue;
            }
            // Follows symlinks; entries removed mid-listing are skipped.
            match fs::metadata(entry.path()).await {
                Ok(metadata) if metadata.is_file() => names.push(name),
                _ => {}
            }
        }

        Ok(names)
    }

    pub async fn read_document(&self, name: &str) -> Result<Document, ReadError> {
        let bytes = fs::read(self.directory.join(name))
            .await
            .map_err(|e| ReadError::new(name, e))?;

        serde_json::from_slice(&bytes).map_err(|e| ReadError::new(name, e))
    }

    pub async fn pick_random(&self) -> Result<DocumentOutcome, AppError> {
        let names = self.list_documents().await?;

        let Some(name) = self.choose(&names) else {
            return Ok(DocumentOutcome::Absent);
        };

        tracing::debug!(document = %name, "Picked random document");
        Ok(self.read_document(name).await.into())
    }

    pub async fn get_by_name(&self, name: &str) -> Result<DocumentOutcome, AppError> {
        let name = normalize_name(name);
        let names = self.list_documents().await?;

        if !names.contains(&name) {
            return Ok(DocumentOutcome::Absent);
        }

        Ok(self.read_document(&name).await.into())
    }

    fn choose<'a>(&self, names: &'a [String]) -> Option<&'a String> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        names.choose(&mut *rng)
    }
}
