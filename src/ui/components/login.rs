// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Login form as an MVU model/update/view triple.

use eframe::egui;

/// Field state for the login form, including its single error slot.
#[derive(Default)]
pub struct LoginModel {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

/// Messages emitted by the login view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginMsg {
    EmailChanged(String),
    PasswordChanged(String),
    Submit,
}

/// Apply a field message. `Submit` is intercepted by the MVU root.
pub fn update(model: &mut LoginModel, msg: LoginMsg) {
    match msg {
        LoginMsg::EmailChanged(text) => model.email = text,
        LoginMsg::PasswordChanged(text) => model.password = text,
        LoginMsg::Submit => {}
    }
}

/// Render the login form and return any triggered messages.
pub fn view(ui: &mut egui::Ui, model: &LoginModel) -> Vec<LoginMsg> {
    let mut msgs = Vec::new();

    ui.label("Email");
    let mut email = model.email.clone();
    if ui
        .add(egui::TextEdit::singleline(&mut email).hint_text("voce@exemplo.com"))
        .changed()
    {
        msgs.push(LoginMsg::EmailChanged(email));
    }
    ui.add_space(6.0);

    ui.label("Senha");
    let mut password = model.password.clone();
    if ui
        .add(egui::TextEdit::singleline(&mut password).password(true))
        .changed()
    {
        msgs.push(LoginMsg::PasswordChanged(password));
    }
    ui.add_space(10.0);

    if ui
        .button(format!("{} Entrar", egui_phosphor::regular::SIGN_IN))
        .clicked()
    {
        msgs.push(LoginMsg::Submit);
    }

    super::error_label(ui, model.error.as_deref());

    msgs
}
