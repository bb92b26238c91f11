// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

mod app;
mod logic;
mod models;
mod mvu;
mod storage;
mod ui;
mod utils;

use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let store_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("datadrop-store"));

    app::run(store_dir)
}
