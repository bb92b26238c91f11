// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Storage boundary: the injected client the orchestrator pushes blobs
//! through, and the errors it can surface.

pub mod fs;

pub use fs::FsStorageClient;

use crate::models::staged::StagedFile;

/// Cumulative `(loaded, total)` byte pair reported during one transfer.
/// Calls arrive serially and never overlap for a single push.
pub type ProgressFn<'a> = dyn FnMut(u64, u64) + 'a;

/// Failures surfaced by a storage client.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The staged file could not be read on this side of the transfer.
    #[error("failed to read resource bytes: {0}")]
    Unreadable(#[source] std::io::Error),
    /// The store itself failed while persisting the blob.
    #[error("storage backend io failure: {0}")]
    Io(#[from] std::io::Error),
    /// The store refused the blob.
    #[error("storage backend rejected blob: {0}")]
    Rejected(String),
}

/// A durable blob store the panel pushes resources into.
///
/// `push_blob` resolves to `Ok(true)` when the blob was newly stored and
/// `Ok(false)` when an identical blob already existed.
pub trait StorageClient: Send + Sync {
    fn push_blob(
        &self,
        file: &StagedFile,
        progress: &mut ProgressFn<'_>,
    ) -> Result<bool, StorageError>;
}
