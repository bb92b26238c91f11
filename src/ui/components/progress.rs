// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Transfer progress display: percentage bar plus estimated time remaining.

use eframe::egui;

/// Render the progress of an active transfer.
///
/// `percent` is 0–100; `time_remaining_secs` is omitted while no stable
/// estimate exists (first ticks of a transfer).
pub fn view(ui: &mut egui::Ui, percent: f32, time_remaining_secs: Option<f64>) {
    let fraction = (percent / 100.0).clamp(0.0, 1.0);
    ui.add(
        egui::ProgressBar::new(fraction)
            .show_percentage()
            .desired_width(200.0),
    );
    if let Some(secs) = time_remaining_secs {
        ui.label(
            egui::RichText::new(format!("about {} left", format_eta(secs)))
                .small()
                .color(egui::Color32::from_gray(110)),
        );
    }
}

/// Humanize a remaining-time estimate in seconds.
pub fn format_eta(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "a moment".to_string();
    }
    let secs = secs.round() as u64;
    if secs < 1 {
        "less than a second".to_string()
    } else if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
