//! Persisting the final world state.
//!
//! [`StateWriter`] is the seam between the engine and wherever the final
//! state ends up. [`YamlStateFile`] writes it to a fixed file name inside a
//! configured directory and can hand the stored bytes back as a
//! [`Download`] for serving to a browser.

use std::path::PathBuf;

use biome_types::WorldDocument;
use tracing::info;

use crate::document::encode_document;
use crate::error::StoreError;

/// File name the final state is written to.
pub const OUTPUT_FILE_NAME: &str = "output.yaml";

/// Content type of a persisted state document.
pub const YAML_CONTENT_TYPE: &str = "application/yaml; charset=utf-8";

/// A stored document packaged for delivery as a file attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Value for the `Content-Type` header.
    pub content_type: String,
    /// Value for the `Content-Disposition` header.
    pub content_disposition: String,
    /// Raw file contents.
    pub body: Vec<u8>,
}

impl Download {
    /// Package YAML bytes as an `output.yaml` attachment.
    pub fn yaml(body: Vec<u8>) -> Self {
        Self {
            content_type: YAML_CONTENT_TYPE.to_owned(),
            content_disposition: format!("attachment; filename={OUTPUT_FILE_NAME}"),
            body,
        }
    }
}

/// Destination for the final world state.
pub trait StateWriter {
    /// Persist `document`, replacing any earlier state.
    ///
    /// Returns the location written to.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if encoding or writing fails.
    fn write(&self, document: &WorldDocument) -> Result<PathBuf, StoreError>;

    /// Read back the persisted state as a download.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if nothing has been written or the file
    /// cannot be read.
    fn download(&self) -> Result<Download, StoreError>;
}

/// Writes the final state as `output.yaml` inside a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlStateFile {
    dir: PathBuf,
}

impl YamlStateFile {
    /// Create a writer targeting `dir`. The directory is created on first
    /// write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of the state file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(OUTPUT_FILE_NAME)
    }
}

impl StateWriter for YamlStateFile {
    fn write(&self, document: &WorldDocument) -> Result<PathBuf, StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path();
        let yaml = encode_document(document)?;
        std::fs::write(&path, yaml).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        info!(
            path = %path.display(),
            organisms = document.organisms.len(),
            "Final state written"
        );
        Ok(path)
    }

    fn download(&self) -> Result<Download, StoreError> {
        let path = self.path();
        let body = std::fs::read(&path).map_err(|source| StoreError::Io { path, source })?;
        Ok(Download::yaml(body))
    }
}
