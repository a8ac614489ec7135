//! Handing finished files to the user

use crate::error::Result;
use crate::format::{ExportFormat, Payload};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// A file that reached its destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredFile {
    pub file_name: String,
    pub format: ExportFormat,
    /// Size in bytes
    pub bytes: usize,
    /// Where it was written, for sinks that write to disk
    pub path: Option<PathBuf>,
}

/// Destination for rendered payloads
pub trait Delivery: Send + Sync {
    fn deliver(
        &self,
        file_name: &str,
        payload: &Payload,
    ) -> impl Future<Output = Result<DeliveredFile>> + Send;
}

/// Writes files into a directory.
///
/// Each file is written to a temporary sibling and renamed into place, so a
/// failed write never leaves a partial file under the final name.
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Delivery for DirectoryDelivery {
    async fn deliver(&self, file_name: &str, payload: &Payload) -> Result<DeliveredFile> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let target = self.dir.join(file_name);
        let temp = self.dir.join(format!(".{}.part", file_name));

        let written = async {
            tokio::fs::write(&temp, &payload.data).await?;
            tokio::fs::rename(&temp, &target).await
        }
        .await;

        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&temp).await {
                tracing::debug!(path = %temp.display(), error = %cleanup, "temp file not removed");
            }
            return Err(e.into());
        }

        tracing::debug!(path = %target.display(), bytes = payload.len(), "file written");
        Ok(DeliveredFile {
            file_name: file_name.to_string(),
            format: payload.format,
            bytes: payload.len(),
            path: Some(target),
        })
    }
}

/// Keeps delivered payloads in memory, for hosts that pass the bytes on to
/// a browser download themselves.
#[derive(Debug, Default)]
pub struct MemoryDelivery {
    files: Mutex<Vec<(String, Payload)>>,
}

impl MemoryDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Most recently delivered file
    pub fn last(&self) -> Option<(String, Payload)> {
        self.lock().last().cloned()
    }

    /// Remove and return everything delivered so far
    pub fn take(&self) -> Vec<(String, Payload)> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, Payload)>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Delivery for MemoryDelivery {
    async fn deliver(&self, file_name: &str, payload: &Payload) -> Result<DeliveredFile> {
        self.lock().push((file_name.to_string(), payload.clone()));
        Ok(DeliveredFile {
            file_name: file_name.to_string(),
            format: payload.format,
            bytes: payload.len(),
            path: None,
        })
    }
}
