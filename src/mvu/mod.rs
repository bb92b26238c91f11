// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Upload orchestrator kernel wiring the source selector, file staging,
//! and the storage push into one state machine.
//!
//! `update` is a pure transition function over [`UploadModel`]; side
//! effects are described as [`Command`] values and executed off the UI
//! thread by [`run_command`]. Notifications for the embedding parent are
//! collected as [`Notice`] values.

use std::path::PathBuf;
use std::time::Instant;

use url::Url;

use crate::logic::schema::probe_schema;
use crate::models::resource::{ResourceDescriptor, Schema, UploadStatus};
use crate::models::staged::StagedFile;
use crate::storage::StorageClient;
use crate::ui::components::choose::{self, ChooseEvent, ChooseModel, ChooseMsg, UploadMode};
use crate::utils::{detect_url_format, format_bytes, format_name, format_title, is_tabular_data_format};

/// Ignore wall-clock slices too small to produce a stable rate estimate.
const MIN_ELAPSED_FOR_ETA_SECS: f64 = 0.05;

/// State for one upload panel instance.
#[derive(Default)]
pub struct UploadModel {
    /// Source selector sub-state.
    pub choose: ChooseModel,
    /// Which source kind is currently active, if any.
    pub mode: Option<UploadMode>,
    /// The staged local file, mutually exclusive with `selected_url`.
    pub selected_file: Option<StagedFile>,
    /// The validated (or attempted) URL, mutually exclusive with `selected_file`.
    pub selected_url: String,
    pub file_size: u64,
    pub formatted_size: String,
    /// 0–100, monotonically non-decreasing within one transfer.
    pub progress_percent: f32,
    /// Transfer start, the basis for remaining-time estimates.
    pub started_at: Option<Instant>,
    pub time_remaining_secs: Option<f64>,
    pub loading: bool,
    pub success: bool,
    pub error: bool,
    /// Set when the store reports the blob already existed.
    pub file_exists: bool,
    /// Auto-detected format tag for a URL resource.
    pub detected_format: String,
    /// User-overridable format tag, defaults to the detected one.
    pub chosen_format: String,
    /// Flow generation; completions stamped with an older generation are
    /// dropped so superseded flows cannot overwrite newer state.
    pub generation: u64,
    /// Count of queued background commands (maintained by the shell).
    pub pending_commands: usize,
}

/// Everything the staging command derives from a picked file.
#[derive(Clone, Debug)]
pub struct StagedResource {
    pub file: StagedFile,
    pub descriptor: ResourceDescriptor,
}

/// Messages routed through the update function.
#[derive(Debug)]
pub enum Msg {
    Choose(ChooseMsg),
    FileStaged {
        generation: u64,
        result: Result<StagedResource, String>,
    },
    UploadRequested,
    UploadProgress {
        generation: u64,
        loaded: u64,
        total: u64,
    },
    UploadFinished {
        generation: u64,
        result: Result<bool, String>,
    },
    UrlEdited(String),
    FormatOverridden(String),
    Reset,
}

/// Side effects executed between frames on worker threads.
///
/// File dialogs are not commands: they must stay on the UI thread, so
/// the selector view opens them during the UI pass.
#[derive(Debug)]
pub enum Command {
    StageFile { generation: u64, path: PathBuf },
    PushBlob { generation: u64, file: StagedFile },
}

/// Outbound notifications consumed by the embedding parent.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Metadata(ResourceDescriptor),
    Status(UploadStatus),
}

/// Apply a message to the model, enqueueing commands and parent notices.
pub fn update(model: &mut UploadModel, msg: Msg, cmds: &mut Vec<Command>, out: &mut Vec<Notice>) {
    match msg {
        Msg::Choose(m) => match choose::update(&mut model.choose, m) {
            Some(ChooseEvent::FilePicked(picked)) => handle_file_picked(model, picked, cmds),
            Some(ChooseEvent::UrlEdited(url)) => handle_url_edit(model, &url, out),
            Some(ChooseEvent::BackRequested) => reset(model, out),
            None => {}
        },
        Msg::FileStaged { generation, result } if generation == model.generation => match result {
            Ok(staged) => {
                model.file_size = staged.descriptor.size;
                model.formatted_size = format_bytes(staged.descriptor.size, 1);
                model.detected_format = staged.descriptor.format.clone();
                model.chosen_format = staged.descriptor.format.clone();
                model.selected_file = Some(staged.file);
                out.push(Notice::Metadata(staged.descriptor));
                begin_push(model, cmds, out);
            }
            Err(err) => {
                log::error!("staging failed: {err}");
                model.loading = false;
                model.error = true;
                out.push(Notice::Status(UploadStatus::error()));
            }
        },
        Msg::FileStaged { generation, .. } => {
            log::debug!("dropping stale staging result from generation {generation}");
        }
        Msg::UploadRequested => begin_push(model, cmds, out),
        Msg::UploadProgress {
            generation,
            loaded,
            total,
        } if generation == model.generation && model.loading => {
            if total > 0 {
                let percent = ((loaded as f32 / total as f32) * 100.0).min(100.0);
                model.progress_percent = model.progress_percent.max(percent);
            }
            if let Some(started) = model.started_at {
                let elapsed = started.elapsed().as_secs_f64();
                if elapsed > MIN_ELAPSED_FOR_ETA_SECS && loaded > 0 {
                    let rate = loaded as f64 / elapsed;
                    model.time_remaining_secs = Some(total.saturating_sub(loaded) as f64 / rate);
                }
            }
        }
        Msg::UploadProgress { .. } => {}
        Msg::UploadFinished { generation, result } if generation == model.generation => {
            match result {
                Ok(newly_stored) => {
                    model.loading = false;
                    model.success = true;
                    model.error = false;
                    model.file_exists = !newly_stored;
                    model.progress_percent = 100.0;
                    model.time_remaining_secs = None;
                    out.push(Notice::Status(UploadStatus::success()));
                }
                Err(err) => {
                    log::error!("upload failed: {err}");
                    model.loading = false;
                    model.success = false;
                    model.error = true;
                    out.push(Notice::Status(UploadStatus::error()));
                }
            }
        }
        Msg::UploadFinished { generation, .. } => {
            log::debug!("dropping stale upload completion from generation {generation}");
        }
        Msg::UrlEdited(url) => handle_url_edit(model, &url, out),
        Msg::FormatOverridden(code) => {
            if model.mode == Some(UploadMode::Url) && !model.selected_url.is_empty() {
                model.chosen_format = code;
                out.push(Notice::Metadata(url_descriptor(model)));
            } else {
                log::debug!("format override ignored outside an active url flow");
            }
        }
        Msg::Reset => reset(model, out),
    }
}

/// React to the file dialog settling: a selection supersedes any prior
/// flow and goes off to staging, a cancelled dialog changes nothing.
fn handle_file_picked(model: &mut UploadModel, picked: Option<PathBuf>, cmds: &mut Vec<Command>) {
    let Some(path) = picked else {
        log::info!("file selection cancelled");
        return;
    };

    model.generation += 1;
    model.mode = Some(UploadMode::File);
    model.selected_file = None;
    model.selected_url.clear();
    model.loading = true;
    model.success = false;
    model.error = false;
    model.file_exists = false;
    model.progress_percent = 0.0;
    model.time_remaining_secs = None;
    cmds.push(Command::StageFile {
        generation: model.generation,
        path,
    });
}

/// Start the storage push for the staged file. A push with nothing
/// staged is a logged no-op.
fn begin_push(model: &mut UploadModel, cmds: &mut Vec<Command>, out: &mut Vec<Notice>) {
    let Some(file) = model.selected_file.clone() else {
        log::warn!("upload requested with no file selected");
        return;
    };

    model.started_at = Some(Instant::now());
    model.progress_percent = 0.0;
    model.time_remaining_secs = None;
    model.loading = true;
    model.success = false;
    model.error = false;
    model.file_exists = false;
    out.push(Notice::Status(UploadStatus::loading()));
    cmds.push(Command::PushBlob {
        generation: model.generation,
        file,
    });
}

/// Handle a URL input edit: empty input quietly returns to idle, invalid
/// input errors immediately, valid input emits a descriptor without
/// contacting any network resource.
fn handle_url_edit(model: &mut UploadModel, raw: &str, out: &mut Vec<Notice>) {
    let url = raw.trim().to_string();
    // A new entry supersedes any in-flight flow.
    model.generation += 1;

    if url.is_empty() {
        model.selected_url.clear();
        model.mode = None;
        model.loading = false;
        model.success = false;
        model.error = false;
        model.file_exists = false;
        out.push(Notice::Status(UploadStatus::cleared()));
        return;
    }

    model.mode = Some(UploadMode::Url);
    model.selected_file = None;
    model.selected_url = url.clone();
    model.file_size = 0;
    model.formatted_size.clear();
    model.progress_percent = 0.0;
    model.started_at = None;
    model.time_remaining_secs = None;
    model.file_exists = false;
    model.loading = true;
    model.success = false;
    model.error = false;
    out.push(Notice::Status(UploadStatus::loading()));

    if Url::parse(&url).is_err() {
        log::warn!("invalid url entered: {url}");
        model.loading = false;
        model.error = true;
        out.push(Notice::Status(UploadStatus::error()));
        return;
    }

    let format = detect_url_format(&url);
    model.detected_format = format.clone();
    model.chosen_format = format;
    model.loading = false;
    model.success = true;
    out.push(Notice::Metadata(url_descriptor(model)));
    out.push(Notice::Status(UploadStatus::success()));
}

/// Return to idle, clear all derived fields, and notify the parent with
/// an empty record and cleared status flags.
fn reset(model: &mut UploadModel, out: &mut Vec<Notice>) {
    let pending = model.pending_commands;
    *model = UploadModel {
        generation: model.generation + 1,
        pending_commands: pending,
        ..UploadModel::default()
    };
    out.push(Notice::Metadata(ResourceDescriptor::empty()));
    out.push(Notice::Status(UploadStatus::cleared()));
}

/// Descriptor for the active URL resource. URL resources never carry a
/// hash, size, or schema; those are deferred to the serving backend.
fn url_descriptor(model: &UploadModel) -> ResourceDescriptor {
    let name = url_resource_name(&model.selected_url);
    ResourceDescriptor {
        title: format_title(&name),
        format: model.chosen_format.clone(),
        size: 0,
        hash: None,
        url: Some(model.selected_url.clone()),
        schema: None,
        name,
    }
}

/// Final path segment of a URL, or a fixed fallback when that segment
/// is empty (trailing slash, bare host).
fn url_resource_name(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .map(str::to_owned)
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "resource-from-url".to_string())
}

/// Execute a command on a worker thread and return the resulting message.
///
/// Progress ticks produced mid-transfer are sent through `tx`; the final
/// message is returned to the caller for delivery.
pub fn run_command(
    cmd: Command,
    client: &dyn StorageClient,
    tx: &crossbeam_channel::Sender<Msg>,
) -> Msg {
    match cmd {
        Command::StageFile { generation, path } => {
            let result = stage_file(path).map_err(|e| format!("{e:#}"));
            Msg::FileStaged { generation, result }
        }
        Command::PushBlob { generation, file } => {
            let mut report = |loaded: u64, total: u64| {
                let _ = tx.send(Msg::UploadProgress {
                    generation,
                    loaded,
                    total,
                });
            };
            let result = client
                .push_blob(&file, &mut report)
                .map_err(|e| e.to_string());
            Msg::UploadFinished { generation, result }
        }
    }
}

/// Derive the full descriptor for a picked file: size, format, schema
/// (for tabular formats, degrading to an empty field list on probe
/// failure), and content digest (degrading to none).
fn stage_file(path: PathBuf) -> anyhow::Result<StagedResource> {
    let mut file = StagedFile::open(path)?;
    let file_name = file.name();

    let schema = if is_tabular_data_format(&file_name) {
        match probe_schema(file.path()) {
            Ok(schema) => Some(schema),
            Err(err) => {
                log::warn!("schema probe failed for {file_name}: {err:#}");
                Some(Schema::default())
            }
        }
    } else {
        None
    };

    let hash = file.digest().map(str::to_owned);
    let descriptor = ResourceDescriptor {
        name: format_name(&file_name),
        title: format_title(&file_name),
        format: file.format(),
        size: file.size(),
        hash,
        url: None,
        schema,
    };

    Ok(StagedResource { file, descriptor })
}
