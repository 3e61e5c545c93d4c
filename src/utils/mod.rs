// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by UI and business logic.

pub mod file_icons;
pub mod sanitize_input;

/// Select a Phosphor icon for the given MIME type.
pub use file_icons::icon_for;
/// Escape angle brackets in user-provided free text.
pub use sanitize_input::sanitize_input;
