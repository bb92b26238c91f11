// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Source selector: pick between uploading a local file and linking a
//! URL, with a back action that resets the whole panel.

use std::path::PathBuf;

use eframe::egui;

/// Which kind of source the user is providing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadMode {
    File,
    Url,
}

/// Selector state: the active sub-input and the URL text buffer.
#[derive(Default)]
pub struct ChooseModel {
    mode: Option<UploadMode>,
    url_input: String,
}

impl ChooseModel {
    pub fn mode(&self) -> Option<UploadMode> {
        self.mode
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }
}

/// Messages emitted by the selector view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChooseMsg {
    SelectMode(UploadMode),
    FilePicked(Option<PathBuf>),
    UrlInputChanged(String),
    Back,
}

/// Events the orchestrator reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChooseEvent {
    FilePicked(Option<PathBuf>),
    UrlEdited(String),
    BackRequested,
}

/// Apply a message to the selector model.
pub fn update(model: &mut ChooseModel, msg: ChooseMsg) -> Option<ChooseEvent> {
    match msg {
        ChooseMsg::SelectMode(mode) => {
            model.mode = Some(mode);
            None
        }
        ChooseMsg::FilePicked(picked) => Some(ChooseEvent::FilePicked(picked)),
        ChooseMsg::UrlInputChanged(text) => {
            model.url_input = text.clone();
            Some(ChooseEvent::UrlEdited(text))
        }
        ChooseMsg::Back => {
            model.mode = None;
            model.url_input.clear();
            Some(ChooseEvent::BackRequested)
        }
    }
}

/// Render the selector and return messages triggered by interaction.
pub fn view(ui: &mut egui::Ui, model: &ChooseModel) -> Vec<ChooseMsg> {
    let mut msgs = Vec::new();

    match model.mode {
        None => {
            ui.vertical_centered(|ui| {
                let file_btn = egui::Button::new(format!(
                    "{} Choose a file to upload",
                    egui_phosphor::regular::FILE_ARROW_UP
                ));
                if ui.add(file_btn).clicked() {
                    msgs.push(ChooseMsg::SelectMode(UploadMode::File));
                }

                ui.label(egui::RichText::new("OR").small().color(egui::Color32::from_gray(130)));

                let url_btn = egui::Button::new(format!(
                    "{} Link a file already online",
                    egui_phosphor::regular::LINK
                ));
                if ui.add(url_btn).clicked() {
                    msgs.push(ChooseMsg::SelectMode(UploadMode::Url));
                }
            });
        }
        Some(mode) => {
            ui.horizontal(|ui| {
                let back = egui::Button::new(format!("{} Back", egui_phosphor::regular::ARROW_LEFT));
                if ui.add(back).on_hover_text("Start over").clicked() {
                    msgs.push(ChooseMsg::Back);
                }
                ui.label(match mode {
                    UploadMode::File => "Upload a file",
                    UploadMode::Url => "Link a file online",
                });
            });
            ui.add_space(6.0);

            match mode {
                UploadMode::File => {
                    let browse = egui::Button::new(format!(
                        "{} Browse…",
                        egui_phosphor::regular::FOLDER_OPEN
                    ));
                    if ui.add(browse).clicked() {
                        // Synchronous rfd dialogs must stay on the UI thread.
                        let picked = rfd::FileDialog::new()
                            .set_title("Select a file to upload")
                            .pick_file();
                        msgs.push(ChooseMsg::FilePicked(picked));
                    }
                }
                UploadMode::Url => {
                    let mut buffer = model.url_input.clone();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut buffer)
                            .hint_text("https://example.org/data.csv")
                            .desired_width(320.0),
                    );
                    if response.changed() {
                        msgs.push(ChooseMsg::UrlInputChanged(buffer));
                    }
                }
            }
        }
    }

    msgs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_a_mode_opens_the_sub_input() {
        let mut model = ChooseModel::default();

        let event = update(&mut model, ChooseMsg::SelectMode(UploadMode::File));

        assert!(event.is_none());
        assert_eq!(model.mode(), Some(UploadMode::File));
    }

    #[test]
    fn dialog_result_is_forwarded_to_the_orchestrator() {
        let mut model = ChooseModel::default();
        update(&mut model, ChooseMsg::SelectMode(UploadMode::File));

        let path = PathBuf::from("data.csv");
        let event = update(&mut model, ChooseMsg::FilePicked(Some(path.clone())));

        assert_eq!(event, Some(ChooseEvent::FilePicked(Some(path))));
    }

    #[test]
    fn cancelled_dialog_is_forwarded_as_no_selection() {
        let mut model = ChooseModel::default();
        update(&mut model, ChooseMsg::SelectMode(UploadMode::File));

        let event = update(&mut model, ChooseMsg::FilePicked(None));

        assert_eq!(event, Some(ChooseEvent::FilePicked(None)));
    }

    #[test]
    fn url_edits_are_buffered_and_forwarded() {
        let mut model = ChooseModel::default();
        update(&mut model, ChooseMsg::SelectMode(UploadMode::Url));

        let event = update(
            &mut model,
            ChooseMsg::UrlInputChanged("https://x.org/d.csv".into()),
        );

        assert_eq!(model.url_input(), "https://x.org/d.csv");
        assert_eq!(
            event,
            Some(ChooseEvent::UrlEdited("https://x.org/d.csv".into()))
        );
    }

    #[test]
    fn back_clears_state_and_requests_reset() {
        let mut model = ChooseModel::default();
        update(&mut model, ChooseMsg::SelectMode(UploadMode::Url));
        update(&mut model, ChooseMsg::UrlInputChanged("https://x.org".into()));

        let event = update(&mut model, ChooseMsg::Back);

        assert_eq!(event, Some(ChooseEvent::BackRequested));
        assert_eq!(model.mode(), None);
        assert!(model.url_input().is_empty());
    }
}
