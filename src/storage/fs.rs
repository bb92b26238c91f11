// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Content-addressed filesystem blob store.
//!
//! Blobs are keyed by the SHA-256 of their contents, so duplicate pushes
//! are detected by key existence and reported as "already stored".

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

use crate::models::staged::StagedFile;
use crate::storage::{ProgressFn, StorageClient, StorageError};

const CHUNK_SIZE: usize = 64 * 1024;

/// Blob store rooted at a local directory.
pub struct FsStorageClient {
    root: PathBuf,
}

impl FsStorageClient {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Path a blob with the given digest key lives at.
    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn scratch_path(&self) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        self.root
            .join(format!(".incoming-{}-{nanos}", std::process::id()))
    }
}

impl StorageClient for FsStorageClient {
    fn push_blob(
        &self,
        file: &StagedFile,
        progress: &mut ProgressFn<'_>,
    ) -> Result<bool, StorageError> {
        let total = file.size();
        let mut source = File::open(file.path()).map_err(StorageError::Unreadable)?;

        // Copy into a scratch file while hashing, then settle on the key.
        let scratch = self.scratch_path();
        let mut sink = File::create(&scratch)?;
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut loaded: u64 = 0;

        loop {
            let n = match source.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) => {
                    let _ = fs::remove_file(&scratch);
                    return Err(StorageError::Unreadable(err));
                }
            };
            hasher.update(&buffer[..n]);
            if let Err(err) = sink.write_all(&buffer[..n]) {
                let _ = fs::remove_file(&scratch);
                return Err(StorageError::Io(err));
            }
            loaded += n as u64;
            progress(loaded.min(total), total);
        }
        sink.flush()?;
        drop(sink);
        progress(total, total);

        let key = format!("{:x}", hasher.finalize());
        let destination = self.blob_path(&key);
        if destination.exists() {
            fs::remove_file(&scratch)?;
            log::debug!("blob {key} already stored, skipping");
            return Ok(false);
        }

        fs::rename(&scratch, &destination)?;
        log::debug!("stored blob {key} ({total} bytes)");
        Ok(true)
    }
}

/// Read a stored blob back in full. Mainly useful for tooling and tests.
pub fn read_blob(root: &Path, key: &str) -> Result<Vec<u8>, StorageError> {
    let mut bytes = Vec::new();
    File::open(root.join(key))?.read_to_end(&mut bytes)?;
    Ok(bytes)
}
