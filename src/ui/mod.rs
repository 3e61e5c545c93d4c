// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the portal forms.
//! Handles layout, tab navigation, and wiring to the submission pipeline.

pub mod components;

use std::sync::Arc;

use eframe::egui;

use crate::app::Session;
use crate::logic::api::{Backend, HttpBackend};
use crate::models::submission::FormId;
use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::upload::UploadMsg;
use crate::ui::components::{forgot, login, register, upload};

/// Stateful egui application hosting the four portal forms.
pub struct BalcaoApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl BalcaoApp {
    pub fn new(session: Session) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let api: Arc<dyn Backend + Send + Sync> = Arc::new(HttpBackend::new(session.base_url));

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let api = Arc::clone(&api);
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, api.as_ref());
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Self {
            model: AppModel::new(session.csrf_token),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for BalcaoApp {
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        let ctx = ui.ctx();
        self.ensure_spacing(ctx);

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        // Process pending messages until exhausted.
        let mut msgs = std::mem::take(&mut self.inbox);
        while let Some(msg) = msgs.pop() {
            match msg {
                mvu::Msg::PreviewDecoded {
                    path,
                    generation,
                    image,
                } => {
                    let texture = ctx.load_texture(
                        format!("preview-{}", path.display()),
                        image,
                        egui::TextureOptions::default(),
                    );
                    msgs.push(mvu::Msg::Upload(UploadMsg::PreviewReady {
                        path,
                        generation,
                        texture,
                    }));
                }
                other => {
                    let mut commands = Vec::new();
                    mvu::update(&mut self.model, other, &mut commands);
                    for cmd in commands {
                        if self.cmd_tx.send(cmd).is_ok() {
                            self.model.pending_commands += 1;
                        }
                    }
                }
            }
        }
        self.inbox = msgs;

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Balcão");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(2.0);
                    egui::widgets::global_theme_preference_switch(ui);
                });
            });
            ui.add_space(4.0);
            self.render_tab_bar(ui);
            ui.add_space(4.0);
        });

        self.render_notice_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    self.render_active_form(ui);
                });
            });
        });
    }
}

impl BalcaoApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    /// One selectable label per form; highlighting comes from model state.
    fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for (form, title) in [
                (FormId::Login, "Entrar"),
                (FormId::Register, "Cadastrar"),
                (FormId::ForgotPassword, "Recuperar senha"),
                (FormId::Upload, "Enviar arquivos"),
            ] {
                let selected = self.model.active_tab == form;
                if ui.selectable_label(selected, title).clicked() && !selected {
                    self.inbox.push(Msg::ShowTab(form));
                }
            }
        });
    }

    /// Render the form panel for the active tab and collect its messages.
    // TODO: disable the submit button while a submission for the same form
    // is pending (needs per-form pending counts instead of the global one).
    fn render_active_form(&mut self, ui: &mut egui::Ui) {
        match self.model.active_tab {
            FormId::Login => {
                let msgs = login::view(ui, &self.model.login);
                self.inbox.extend(msgs.into_iter().map(Msg::Login));
            }
            FormId::Register => {
                let msgs = register::view(ui, &self.model.register);
                self.inbox.extend(msgs.into_iter().map(Msg::Register));
            }
            FormId::ForgotPassword => {
                let msgs = forgot::view(ui, &self.model.forgot);
                self.inbox.extend(msgs.into_iter().map(Msg::Forgot));
            }
            FormId::Upload => {
                let msgs = upload::view(ui, &self.model.upload);
                self.inbox.extend(msgs.into_iter().map(Msg::Upload));
            }
        }
    }

    /// Modal acknowledgment for successful submissions.
    fn render_notice_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.notice.clone() {
            egui::Window::new("Sucesso")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissNotice);
                    }
                });
        }
    }

    /// Render latest status message when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(text) = &self.model.status {
            let display = if self.model.pending_commands > 0 {
                format!("{}  ({} em andamento…)", text, self.model.pending_commands)
            } else {
                text.to_string()
            };
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
                if self.model.pending_commands > 0 {
                    ui.add(egui::Spinner::new().size(14.0)).on_hover_text(format!(
                        "{} tarefa(s) em segundo plano",
                        self.model.pending_commands
                    ));
                }
            });
        }
    }
}
