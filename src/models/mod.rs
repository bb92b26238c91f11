// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: pure data types shared between the orchestrator, the UI,
//! and the storage boundary.

pub mod resource;
pub mod staged;
