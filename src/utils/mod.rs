// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by UI and business logic.

pub mod format;
pub mod hash;

/// Filename/URL classification and size rendering.
pub use format::{
    FORMAT_CATALOG, detect_url_format, file_extension, file_format, format_bytes, format_name,
    format_title, is_tabular_data_format,
};
/// SHA-256 digests for files and buffers.
pub use hash::{hash_bytes, hash_file};
