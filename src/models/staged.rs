// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Explicit wrapper around a selected local file.
//!
//! Holds the original path plus a lazily computed content digest behind a
//! small fixed interface, instead of forwarding arbitrary properties of
//! the underlying file handle.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::utils::{file_format, hash_file};

/// A local file staged for upload.
#[derive(Clone, Debug)]
pub struct StagedFile {
    path: PathBuf,
    size: u64,
    digest: Option<String>,
}

impl StagedFile {
    /// Stage a file by path, capturing its current size.
    ///
    /// # Errors
    ///
    /// Fails when the file does not exist or its metadata is unreadable.
    pub fn open(path: PathBuf) -> Result<Self> {
        let meta = fs::metadata(&path)
            .with_context(|| format!("Failed to stat staged file: {:?}", path))?;
        Ok(Self {
            path,
            size: meta.len(),
            digest: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Display name: the final path component.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resource".to_string())
    }

    /// Size in bytes captured at staging time.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Extension-derived format tag.
    pub fn format(&self) -> String {
        file_format(&self.name())
    }

    /// Full file contents.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).with_context(|| format!("Failed to read staged file: {:?}", self.path))
    }

    /// SHA-256 hex digest of the file contents, computed once and cached.
    ///
    /// A failed digest is non-fatal: it is logged and `None` is returned,
    /// leaving the descriptor without an integrity hash.
    pub fn digest(&mut self) -> Option<&str> {
        if self.digest.is_none() {
            match hash_file(&self.path) {
                Ok(hex) => self.digest = Some(hex),
                Err(err) => {
                    log::warn!("failed to hash {:?}: {err:#}", self.path);
                    return None;
                }
            }
        }
        self.digest.as_deref()
    }
}
