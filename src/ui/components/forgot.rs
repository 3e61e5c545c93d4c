// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Password-recovery form as an MVU model/update/view triple.

use eframe::egui;

/// Field state for the forgot-password form.
#[derive(Default)]
pub struct ForgotModel {
    pub email: String,
    pub error: Option<String>,
}

/// Messages emitted by the forgot-password view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForgotMsg {
    EmailChanged(String),
    Submit,
}

/// Apply a field message. `Submit` is intercepted by the MVU root.
pub fn update(model: &mut ForgotModel, msg: ForgotMsg) {
    match msg {
        ForgotMsg::EmailChanged(text) => model.email = text,
        ForgotMsg::Submit => {}
    }
}

/// Render the forgot-password form and return any triggered messages.
pub fn view(ui: &mut egui::Ui, model: &ForgotModel) -> Vec<ForgotMsg> {
    let mut msgs = Vec::new();

    ui.label(
        egui::RichText::new("Informe o email da sua conta para receber o link de recuperação.")
            .small()
            .color(egui::Color32::from_gray(110)),
    );
    ui.add_space(6.0);

    ui.label("Email");
    let mut email = model.email.clone();
    if ui
        .add(egui::TextEdit::singleline(&mut email).hint_text("voce@exemplo.com"))
        .changed()
    {
        msgs.push(ForgotMsg::EmailChanged(email));
    }
    ui.add_space(10.0);

    if ui
        .button(format!("{} Recuperar senha", egui_phosphor::regular::KEY))
        .clicked()
    {
        msgs.push(ForgotMsg::Submit);
    }

    super::error_label(ui, model.error.as_deref());

    msgs
}
