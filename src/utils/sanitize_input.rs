// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Escape markup delimiters in user-provided free text.

/// Replace every `<` with `&lt;` and every `>` with `&gt;`.
///
/// Applied to free-text fields (name, email, phone) before validation and
/// transmission so angle brackets never travel to the portal verbatim.
/// Passwords and dates are sent exactly as entered.
pub fn sanitize_input(value: &str) -> String {
    value.replace('<', "&lt;").replace('>', "&gt;")
}
