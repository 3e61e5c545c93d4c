// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Per-submission payloads and form identity.
//!
//! A payload is built once per submission from validated, sanitized fields
//! and handed to the dispatcher; it is never reused. Field names match the
//! portal's wire contract exactly.

use serde::Serialize;

use crate::models::file::SelectedFile;

/// Identity of one of the four portal forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormId {
    Login,
    Register,
    ForgotPassword,
    Upload,
}

/// JSON body for `POST /login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

/// JSON body for `POST /register`. `dob` is formatted as `YYYY-MM-DD`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub dob: String,
    pub phone: String,
    pub csrf_token: String,
}

/// JSON body for `POST /forgot-password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ForgotPayload {
    pub email: String,
    pub csrf_token: String,
}

/// Multipart body for `POST /upload`: repeated `files` parts plus the token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadPayload {
    pub files: Vec<SelectedFile>,
    pub csrf_token: String,
}

/// A validated submission ready for dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitPayload {
    Login(LoginPayload),
    Register(RegisterPayload),
    Forgot(ForgotPayload),
    Upload(UploadPayload),
}

impl SubmitPayload {
    /// The form this payload belongs to.
    pub fn form(&self) -> FormId {
        match self {
            SubmitPayload::Login(_) => FormId::Login,
            SubmitPayload::Register(_) => FormId::Register,
            SubmitPayload::Forgot(_) => FormId::ForgotPassword,
            SubmitPayload::Upload(_) => FormId::Upload,
        }
    }

    /// Number of files carried; zero for the JSON forms.
    pub fn file_count(&self) -> usize {
        match self {
            SubmitPayload::Upload(payload) => payload.files.len(),
            _ => 0,
        }
    }
}
