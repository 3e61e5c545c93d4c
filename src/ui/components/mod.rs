// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Reusable egui form components structured for MVU-style updates.

pub mod forgot;
pub mod login;
pub mod register;
pub mod upload;

use eframe::egui;

/// Render a form's single inline error slot, when present.
///
/// Each form model owns exactly one `error: Option<String>`; writing a new
/// message replaces the old one, so at most one error is ever visible per
/// form.
pub fn error_label(ui: &mut egui::Ui, error: Option<&str>) {
    if let Some(message) = error {
        ui.add_space(4.0);
        ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(200, 40, 40)));
    }
}
