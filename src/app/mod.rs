// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring egui/eframe to launch the Balcão UI.

use anyhow::{Context, Result};
use eframe::egui;
use egui_phosphor::Variant;
use url::Url;

use crate::ui::BalcaoApp;

/// Portal origin used when no environment override is present.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Per-launch session context handed to the client by its environment.
///
/// The portal's web front-end reads the CSRF token from a hidden input on
/// the page; the desktop client receives it alongside the portal origin at
/// startup and forwards it verbatim with every request.
#[derive(Clone, Debug)]
pub struct Session {
    pub base_url: Url,
    pub csrf_token: String,
}

impl Session {
    /// Read the session from `BALCAO_BASE_URL` and `BALCAO_CSRF_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let raw =
            std::env::var("BALCAO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url =
            Url::parse(&raw).with_context(|| format!("Invalid portal base URL: {raw}"))?;
        let csrf_token = std::env::var("BALCAO_CSRF_TOKEN").unwrap_or_default();

        Ok(Self {
            base_url,
            csrf_token,
        })
    }
}

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run() -> Result<()> {
    let session = Session::from_env()?;

    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 680.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Balcão",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(BalcaoApp::new(session)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("eframe terminated with an error: {err}"))
}
