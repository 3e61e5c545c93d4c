// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Registration form as an MVU model/update/view triple.
//!
//! The birth date uses the egui_extras date picker; until the user picks a
//! date the model holds `None` and validation reports the missing field.

use chrono::{Datelike, NaiveDate};
use eframe::egui;
use egui_extras::DatePickerButton;

/// Field state for the registration form.
#[derive(Default)]
pub struct RegisterModel {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub dob: Option<NaiveDate>,
    pub phone: String,
    pub error: Option<String>,
}

/// Messages emitted by the registration view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterMsg {
    NameChanged(String),
    EmailChanged(String),
    PasswordChanged(String),
    ConfirmPasswordChanged(String),
    DobChanged(NaiveDate),
    PhoneChanged(String),
    Submit,
}

/// Apply a field message. `Submit` is intercepted by the MVU root.
pub fn update(model: &mut RegisterModel, msg: RegisterMsg) {
    match msg {
        RegisterMsg::NameChanged(text) => model.name = text,
        RegisterMsg::EmailChanged(text) => model.email = text,
        RegisterMsg::PasswordChanged(text) => model.password = text,
        RegisterMsg::ConfirmPasswordChanged(text) => model.confirm_password = text,
        RegisterMsg::DobChanged(date) => model.dob = Some(date),
        RegisterMsg::PhoneChanged(text) => model.phone = text,
        RegisterMsg::Submit => {}
    }
}

/// Render the registration form and return any triggered messages.
pub fn view(ui: &mut egui::Ui, model: &RegisterModel) -> Vec<RegisterMsg> {
    let mut msgs = Vec::new();

    text_field(ui, "Nome", &model.name, "Seu nome completo", false, |text| {
        msgs.push(RegisterMsg::NameChanged(text));
    });
    text_field(ui, "Email", &model.email, "voce@exemplo.com", false, |text| {
        msgs.push(RegisterMsg::EmailChanged(text));
    });
    text_field(ui, "Senha", &model.password, "", true, |text| {
        msgs.push(RegisterMsg::PasswordChanged(text));
    });
    text_field(ui, "Confirmar senha", &model.confirm_password, "", true, |text| {
        msgs.push(RegisterMsg::ConfirmPasswordChanged(text));
    });

    ui.label("Data de nascimento");
    ui.horizontal(|ui| {
        let dob = model.dob.unwrap_or_default();
        // The 0.34 date picker operates on `jiff` dates; bridge to and from the
        // chrono `NaiveDate` the model stores so behavior is unchanged.
        let mut picker_date =
            jiff::civil::Date::new(dob.year() as i16, dob.month() as i8, dob.day() as i8)
                .unwrap_or_default();
        if ui
            .add(DatePickerButton::new(&mut picker_date).id_salt("register_dob").show_icon(true))
            .changed()
        {
            if let Some(date) = NaiveDate::from_ymd_opt(
                picker_date.year() as i32,
                picker_date.month() as u32,
                picker_date.day() as u32,
            ) {
                msgs.push(RegisterMsg::DobChanged(date));
            }
        }
        if model.dob.is_none() {
            ui.label(
                egui::RichText::new("nenhuma data selecionada")
                    .small()
                    .color(egui::Color32::from_gray(110)),
            );
        }
    });
    ui.add_space(6.0);

    text_field(ui, "Telefone", &model.phone, "(11) 98765-4321", false, |text| {
        msgs.push(RegisterMsg::PhoneChanged(text));
    });
    ui.add_space(10.0);

    if ui
        .button(format!("{} Cadastrar", egui_phosphor::regular::USER_PLUS))
        .clicked()
    {
        msgs.push(RegisterMsg::Submit);
    }

    super::error_label(ui, model.error.as_deref());

    msgs
}

/// Labeled single-line input; invokes `changed` with the edited text.
fn text_field(
    ui: &mut egui::Ui,
    label: &str,
    value: &str,
    hint: &str,
    password: bool,
    changed: impl FnOnce(String),
) {
    ui.label(label);
    let mut text = value.to_string();
    if ui
        .add(
            egui::TextEdit::singleline(&mut text)
                .hint_text(hint)
                .password(password),
        )
        .changed()
    {
        changed(text);
    }
    ui.add_space(6.0);
}
