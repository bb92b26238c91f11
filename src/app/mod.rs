// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring egui/eframe to launch the upload panel.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui;
use egui_phosphor::Variant;

use crate::mvu::Notice;
use crate::storage::FsStorageClient;
use crate::ui::DatadropApp;

/// Bootstrap the desktop application and run the main egui event loop.
///
/// The panel's storage client is a content-addressed store rooted at
/// `store_dir`. Notices emitted to the (here absent) parent are logged.
pub fn run(store_dir: PathBuf) -> Result<()> {
    let client = FsStorageClient::new(&store_dir)
        .with_context(|| format!("Failed to open blob store at {:?}", store_dir))?;
    log::info!("blob store rooted at {:?}", store_dir);

    let (notice_tx, notice_rx) = crossbeam_channel::unbounded::<Notice>();
    std::thread::spawn(move || {
        for notice in notice_rx.iter() {
            match notice {
                Notice::Metadata(descriptor) => log::info!(
                    "resource metadata: {}",
                    serde_json::to_string(&descriptor).unwrap_or_else(|_| "<unserializable>".into())
                ),
                Notice::Status(status) => log::info!(
                    "upload status: loading={} success={} error={}",
                    status.loading,
                    status.success,
                    status.error
                ),
            }
        }
    });

    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 420.0])
            .with_min_inner_size([420.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "datadrop",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(DatadropApp::new(Arc::new(client), notice_tx)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("eframe event loop failed: {err}"))
}
