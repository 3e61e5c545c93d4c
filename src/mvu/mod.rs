// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring form state, messages, and commands.
//!
//! `update` is pure: it reads one message, mutates the model, and may
//! enqueue commands. Side effects (file dialogs, preview decoding, network
//! submissions) run in `run_command` on worker threads and come back as new
//! messages.

use std::path::PathBuf;

use chrono::Local;
use eframe::egui;

use crate::logic::api::{Backend, SubmitError};
use crate::logic::forms;
use crate::models::submission::{FormId, SubmitPayload};
use crate::ui::components::forgot::{self, ForgotModel, ForgotMsg};
use crate::ui::components::login::{self, LoginModel, LoginMsg};
use crate::ui::components::register::{self, RegisterModel, RegisterMsg};
use crate::ui::components::upload::{self, UploadCommand, UploadModel, UploadMsg};

/// Top-level application state.
pub struct AppModel {
    /// Form panel currently shown and highlighted in the tab bar.
    pub active_tab: FormId,
    /// Opaque session token forwarded verbatim with every submission.
    pub csrf_token: String,
    pub login: LoginModel,
    pub register: RegisterModel,
    pub forgot: ForgotModel,
    pub upload: UploadModel,
    /// Success acknowledgment shown as a modal until dismissed.
    pub notice: Option<String>,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn new(csrf_token: String) -> Self {
        Self {
            active_tab: FormId::Login,
            csrf_token,
            login: LoginModel::default(),
            register: RegisterModel::default(),
            forgot: ForgotModel::default(),
            upload: UploadModel::default(),
            notice: None,
            status: None,
            pending_commands: 0,
        }
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Application messages routed through the update function.
// Debug omitted because TextureHandle is not Debug.
pub enum Msg {
    ShowTab(FormId),
    DismissNotice,
    Login(LoginMsg),
    Register(RegisterMsg),
    Forgot(ForgotMsg),
    Upload(UploadMsg),
    /// Decoded preview bitmap; the shell turns it into a texture before it
    /// reaches `update` (texture creation needs the egui context).
    PreviewDecoded {
        path: PathBuf,
        generation: u64,
        image: egui::ColorImage,
    },
    SubmitCompleted {
        form: FormId,
        files_sent: usize,
        result: Result<(), SubmitError>,
    },
}

/// Commands represent side-effects executed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    PickFiles,
    LoadPreview { path: PathBuf, generation: u64 },
    Submit(SubmitPayload),
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::ShowTab(form) => model.active_tab = form,
        Msg::DismissNotice => model.notice = None,
        Msg::Login(LoginMsg::Submit) => submit_login(model, cmds),
        Msg::Login(m) => login::update(&mut model.login, m),
        Msg::Register(RegisterMsg::Submit) => submit_register(model, cmds),
        Msg::Register(m) => register::update(&mut model.register, m),
        Msg::Forgot(ForgotMsg::Submit) => submit_forgot(model, cmds),
        Msg::Forgot(m) => forgot::update(&mut model.forgot, m),
        Msg::Upload(UploadMsg::Submit) => submit_upload(model, cmds),
        Msg::Upload(m) => route_upload(model, m, cmds),
        Msg::PreviewDecoded { path, .. } => {
            // Should have been translated into an UploadMsg by the shell;
            // keeping a no-op to avoid panicking on a stray message.
            let _ = path;
        }
        Msg::SubmitCompleted {
            form,
            files_sent,
            result,
        } => apply_submit_outcome(model, form, files_sent, result),
    }
}

/// Execute a command on a worker thread and return the resulting message.
pub fn run_command(cmd: Command, api: &dyn Backend) -> Msg {
    match cmd {
        Command::PickFiles => {
            let paths = rfd::FileDialog::new()
                .set_title("Selecionar arquivos")
                .pick_files()
                .unwrap_or_default();
            Msg::Upload(UploadMsg::FilesPicked(upload::selected_files_from_paths(
                paths,
            )))
        }
        Command::LoadPreview { path, generation } => {
            match upload::load_preview_image(&path) {
                Ok(image) => Msg::PreviewDecoded {
                    path,
                    generation,
                    image,
                },
                Err(_) => Msg::Upload(UploadMsg::PreviewFailed { path, generation }),
            }
        }
        Command::Submit(payload) => {
            let form = payload.form();
            let files_sent = payload.file_count();
            let result = api.submit(&payload);
            Msg::SubmitCompleted {
                form,
                files_sent,
                result,
            }
        }
    }
}

fn route_upload(model: &mut AppModel, msg: UploadMsg, cmds: &mut Vec<Command>) {
    let mut upload_cmds = Vec::new();
    upload::update(&mut model.upload, msg, &mut upload_cmds);
    for c in upload_cmds {
        match c {
            UploadCommand::PickFiles => cmds.push(Command::PickFiles),
            UploadCommand::LoadPreview { path, generation } => {
                cmds.push(Command::LoadPreview { path, generation })
            }
        }
    }
}

fn submit_login(model: &mut AppModel, cmds: &mut Vec<Command>) {
    match forms::validate_login(&model.login.email, &model.login.password, &model.csrf_token) {
        Ok(payload) => enqueue_submit(model, SubmitPayload::Login(payload), cmds),
        Err(message) => report_error(model, FormId::Login, message),
    }
}

fn submit_register(model: &mut AppModel, cmds: &mut Vec<Command>) {
    let input = forms::RegisterInput {
        name: &model.register.name,
        email: &model.register.email,
        password: &model.register.password,
        confirm_password: &model.register.confirm_password,
        dob: model.register.dob,
        phone: &model.register.phone,
    };
    let today = Local::now().date_naive();

    match forms::validate_register(input, today, &model.csrf_token) {
        Ok(payload) => enqueue_submit(model, SubmitPayload::Register(payload), cmds),
        Err(message) => report_error(model, FormId::Register, message),
    }
}

fn submit_forgot(model: &mut AppModel, cmds: &mut Vec<Command>) {
    match forms::validate_forgot(&model.forgot.email, &model.csrf_token) {
        Ok(payload) => enqueue_submit(model, SubmitPayload::Forgot(payload), cmds),
        Err(message) => report_error(model, FormId::ForgotPassword, message),
    }
}

fn submit_upload(model: &mut AppModel, cmds: &mut Vec<Command>) {
    match forms::validate_upload(model.upload.files(), &model.csrf_token) {
        Ok(payload) => enqueue_submit(model, SubmitPayload::Upload(payload), cmds),
        Err(message) => report_error(model, FormId::Upload, message),
    }
}

/// Queue a validated submission. Nothing stops a second submit while one is
/// pending; the original front-end behaves the same way and the status bar
/// keeps the in-flight count visible.
fn enqueue_submit(model: &mut AppModel, payload: SubmitPayload, cmds: &mut Vec<Command>) {
    model.status = Some("Enviando…".to_string());
    cmds.push(Command::Submit(payload));
}

/// Replace the form's error slot and mirror the text to the status bar.
fn report_error(model: &mut AppModel, form: FormId, message: String) {
    model.status = Some(message.clone());
    *error_slot(model, form) = Some(message);
}

fn error_slot(model: &mut AppModel, form: FormId) -> &mut Option<String> {
    match form {
        FormId::Login => &mut model.login.error,
        FormId::Register => &mut model.register.error,
        FormId::ForgotPassword => &mut model.forgot.error,
        FormId::Upload => &mut model.upload.error,
    }
}

fn apply_submit_outcome(
    model: &mut AppModel,
    form: FormId,
    files_sent: usize,
    result: Result<(), SubmitError>,
) {
    match result {
        Ok(()) => {
            *error_slot(model, form) = None;
            let message = forms::success_message(form, files_sent);
            model.status = Some(message.clone());
            model.notice = Some(message);

            match form {
                FormId::Register => {
                    model.register = RegisterModel::default();
                    model.active_tab = FormId::Login;
                }
                FormId::Upload => {
                    let mut upload_cmds = Vec::new();
                    upload::update(&mut model.upload, UploadMsg::Clear, &mut upload_cmds);
                }
                _ => {}
            }
        }
        Err(SubmitError::Connection) => {
            report_error(model, form, forms::CONNECTION_ERROR.to_string())
        }
        Err(SubmitError::Rejected { message }) => {
            // An empty server message counts as missing, like the original
            // `data.message || fallback` chain.
            let message = message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| forms::fallback_message(form).to_string());
            report_error(model, form, message);
        }
    }
}
