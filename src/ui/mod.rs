// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the upload panel.
//! Owns the model, the worker pool executing commands against the
//! injected storage client, and the notice channel to the parent.

pub mod components;

use std::sync::Arc;

use eframe::egui;

use crate::mvu::{self, Command, Msg, Notice, UploadModel};
use crate::storage::StorageClient;
use crate::ui::components::choose::{self, UploadMode};
use crate::ui::components::progress;
use crate::utils::FORMAT_CATALOG;

/// Stateful egui application hosting one upload panel.
pub struct DatadropApp {
    model: UploadModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
    notice_tx: crossbeam_channel::Sender<Notice>,
}

impl DatadropApp {
    /// Build the panel around an injected storage client. Notices for
    /// the embedding parent are delivered through `notice_tx`.
    pub fn new(
        client: Arc<dyn StorageClient>,
        notice_tx: crossbeam_channel::Sender<Notice>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().clamp(2, 4))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let client = Arc::clone(&client);
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, client.as_ref(), &msg_tx);
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Self {
            model: UploadModel::default(),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
            notice_tx,
        }
    }
}

impl eframe::App for DatadropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            if !matches!(msg, Msg::UploadProgress { .. }) {
                self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            }
            self.inbox.push(msg);
        }

        // Process pending messages until exhausted.
        let mut msgs = std::mem::take(&mut self.inbox);
        while let Some(msg) = msgs.pop() {
            let mut commands = Vec::new();
            let mut notices = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands, &mut notices);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
            for notice in notices {
                let _ = self.notice_tx.send(notice);
            }
        }
        self.inbox = msgs;

        // Keep repainting while a transfer is in flight so progress moves.
        if self.model.loading {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("Add a resource");
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status_line(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);

            let choose_msgs = choose::view(ui, &self.model.choose);
            self.inbox.extend(choose_msgs.into_iter().map(Msg::Choose));
            ui.add_space(12.0);

            if self.model.selected_file.is_some() || !self.model.selected_url.is_empty() {
                self.render_preview(ui);
                ui.add_space(8.0);
                self.render_outcome_message(ui);
            }
        });
    }
}

impl DatadropApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    /// Framed preview of the active source: name, size, and either the
    /// transfer progress or the URL controls.
    fn render_preview(&mut self, ui: &mut egui::Ui) {
        let visuals = ui.visuals().clone();
        egui::Frame::new()
            .fill(visuals.panel_fill)
            .stroke(visuals.window_stroke())
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(self.source_label());
                        if !self.model.formatted_size.is_empty() {
                            ui.label(
                                egui::RichText::new(&self.model.formatted_size)
                                    .small()
                                    .color(egui::Color32::from_gray(110)),
                            );
                        }
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        match self.model.mode {
                            Some(UploadMode::File) if self.model.loading => {
                                progress::view(
                                    ui,
                                    self.model.progress_percent,
                                    self.model.time_remaining_secs,
                                );
                            }
                            Some(UploadMode::Url) if self.model.loading => {
                                ui.label("Processing URL…");
                            }
                            _ => {}
                        }
                    });
                });

                if self.model.mode == Some(UploadMode::Url) && self.model.success {
                    ui.add_space(6.0);
                    self.render_format_override(ui);
                }
            });
    }

    /// Manual format selector for URL resources, backed by the static
    /// format catalog.
    fn render_format_override(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Format");
            let current = self.model.chosen_format.clone();
            let current_label = FORMAT_CATALOG
                .iter()
                .find(|(code, _)| *code == current)
                .map(|(_, label)| (*label).to_string())
                .unwrap_or_else(|| current.clone());

            egui::ComboBox::from_id_salt("url_format_override")
                .selected_text(current_label)
                .show_ui(ui, |ui| {
                    for (code, label) in FORMAT_CATALOG {
                        if ui
                            .selectable_label(current == *code, *label)
                            .clicked()
                            && current != *code
                        {
                            self.inbox.push(Msg::FormatOverridden((*code).to_string()));
                        }
                    }
                });

            if self.model.chosen_format != self.model.detected_format {
                ui.label(
                    egui::RichText::new(format!("detected: {}", self.model.detected_format))
                        .small()
                        .color(egui::Color32::from_gray(110)),
                );
            }
        });
    }

    /// Short success/failure line keyed by the active mode.
    fn render_outcome_message(&self, ui: &mut egui::Ui) {
        let message = if self.model.error {
            Some(match self.model.mode {
                Some(UploadMode::Url) => "URL processing failed",
                _ => "Upload failed",
            })
        } else if self.model.file_exists {
            Some("File already in storage")
        } else if self.model.success {
            Some(match self.model.mode {
                Some(UploadMode::Url) => "URL processed successfully",
                _ => "File uploaded successfully",
            })
        } else {
            None
        };

        if let Some(text) = message {
            let color = if self.model.error {
                egui::Color32::from_rgb(200, 60, 50)
            } else {
                egui::Color32::from_rgb(40, 140, 70)
            };
            ui.label(egui::RichText::new(text).strong().color(color));
        }
    }

    fn source_label(&self) -> String {
        match self.model.mode {
            Some(UploadMode::File) => self
                .model
                .selected_file
                .as_ref()
                .map(|f| f.name())
                .unwrap_or_default(),
            Some(UploadMode::Url) => self.model.selected_url.clone(),
            None => String::new(),
        }
    }

    /// Background-activity indicator in the bottom panel.
    fn render_status_line(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.model.pending_commands > 0 {
                ui.add(egui::Spinner::new().size(14.0));
                ui.label(
                    egui::RichText::new(format!(
                        "{} task(s) running in background",
                        self.model.pending_commands
                    ))
                    .small()
                    .color(egui::Color32::from_gray(110)),
                );
            } else {
                ui.label(
                    egui::RichText::new("Ready")
                        .small()
                        .color(egui::Color32::from_gray(110)),
                );
            }
        });
    }
}
