//! Text enhancement capability
//!
//! The "enhance" affordance is an injected service: given a field's text it
//! returns a rewritten version or fails. This module only owns the per-field
//! busy flags and the write-back; the quality of the rewrite is the
//! service's business.

use crate::document::ResumeDocument;
use crate::error::ModelError;
use crate::field::FieldRef;
use std::collections::HashSet;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Failure reported by an enhancement service
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("enhancement service is not configured")]
    NotConfigured,

    #[error("enhancement request failed: {0}")]
    Request(String),
}

/// Errors from [`enhance_field`]
#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("an enhancement is already running for {0:?}")]
    Busy(FieldRef),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A text-to-text rewriting service
pub trait TextEnhancer: Send + Sync {
    fn enhance(&self, text: &str) -> impl Future<Output = Result<String, ServiceError>> + Send;
}

/// Per-field busy flags, shared between the editor and in-flight requests
#[derive(Debug, Default)]
pub struct EnhanceTracker {
    busy: Mutex<HashSet<FieldRef>>,
}

impl EnhanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request is in flight for `field`; the editor disables the
    /// control while this is true.
    pub fn is_busy(&self, field: FieldRef) -> bool {
        self.lock().contains(&field)
    }

    fn acquire(&self, field: FieldRef) -> Option<BusyGuard<'_>> {
        if self.lock().insert(field) {
            Some(BusyGuard {
                tracker: self,
                field,
            })
        } else {
            None
        }
    }

    // The set stays consistent even if a holder panicked
    fn lock(&self) -> MutexGuard<'_, HashSet<FieldRef>> {
        self.busy.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct BusyGuard<'a> {
    tracker: &'a EnhanceTracker,
    field: FieldRef,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.tracker.lock().remove(&self.field);
    }
}

/// Run `field`'s text through `enhancer` and write the trimmed reply back.
///
/// The busy flag for `field` is held for the duration of the request and
/// released on every exit path, including when the returned future is
/// dropped before completion.
pub async fn enhance_field<E: TextEnhancer>(
    doc: &mut ResumeDocument,
    field: FieldRef,
    enhancer: &E,
    tracker: &EnhanceTracker,
) -> Result<(), EnhanceError> {
    let _guard = tracker.acquire(field).ok_or(EnhanceError::Busy(field))?;

    let original = doc.field(field)?;
    let enhanced = enhancer.enhance(&original).await.map_err(|e| {
        tracing::warn!(?field, error = %e, "text enhancement failed");
        e
    })?;

    doc.set_field(field, enhanced.trim())?;
    tracing::debug!(?field, "field enhanced");
    Ok(())
}
