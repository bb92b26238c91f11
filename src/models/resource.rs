// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Resource descriptor and status records emitted to the embedding parent.

use serde::{Deserialize, Serialize};

/// A single named column/field of a tabular resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Field list detected by the schema prober. An empty list is the
/// degraded form used when probing fails.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

/// Structured metadata describing a staged resource, consumed by the
/// cataloging backend. URL resources carry no hash, size, or schema.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub name: String,
    pub title: String,
    pub format: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl ResourceDescriptor {
    /// The record sent on reset: everything cleared.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Status triple reported to the parent on every flow transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadStatus {
    pub loading: bool,
    pub success: bool,
    pub error: bool,
}

impl UploadStatus {
    pub fn loading() -> Self {
        Self {
            loading: true,
            success: false,
            error: false,
        }
    }

    pub fn success() -> Self {
        Self {
            loading: false,
            success: true,
            error: false,
        }
    }

    pub fn error() -> Self {
        Self {
            loading: false,
            success: false,
            error: true,
        }
    }

    /// All flags off, used after reset or when a URL field is emptied.
    pub fn cleared() -> Self {
        Self::default()
    }
}
