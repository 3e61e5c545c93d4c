// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Portal API client: one POST per validated submission.
//!
//! The portal signals failure in the response body, not the status line, so
//! the client decodes JSON from every reply regardless of status; a body
//! that is not the expected JSON is indistinguishable from a broken
//! connection. No retries, no cancellation.

use serde::Deserialize;
use url::Url;

use crate::models::submission::{FormId, SubmitPayload, UploadPayload};

/// Wire shape shared by all portal endpoints.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Why a submission did not succeed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// Network failure or a body that was not the expected JSON.
    Connection,
    /// The server answered `success: false`, possibly with a message.
    Rejected { message: Option<String> },
}

/// Seam between the submission pipeline and the network, mockable in tests.
pub trait Backend {
    fn submit(&self, payload: &SubmitPayload) -> Result<(), SubmitError>;
}

/// Path for a form's endpoint, relative to the portal origin.
pub fn endpoint(form: FormId) -> &'static str {
    match form {
        FormId::Login => "/login",
        FormId::Register => "/register",
        FormId::ForgotPassword => "/forgot-password",
        FormId::Upload => "/upload",
    }
}

/// Interpret a decoded response body as a submission outcome.
pub fn outcome(response: ApiResponse) -> Result<(), SubmitError> {
    if response.success {
        Ok(())
    } else {
        Err(SubmitError::Rejected {
            message: response.message,
        })
    }
}

/// HTTP implementation speaking to the live portal.
pub struct HttpBackend {
    base_url: Url,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
        }
    }

    fn url_for(&self, form: FormId) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{}{}", base, endpoint(form))
    }

    fn finish(response: reqwest::blocking::Response) -> Result<(), SubmitError> {
        let decoded: ApiResponse = response.json().map_err(|_| SubmitError::Connection)?;
        outcome(decoded)
    }

    /// Build the multipart body: one `files` part per selection plus the token.
    fn upload_form(
        payload: &UploadPayload,
    ) -> Result<reqwest::blocking::multipart::Form, SubmitError> {
        let mut form = reqwest::blocking::multipart::Form::new();
        for file in &payload.files {
            // An unreadable file aborts the whole submission; uploads are
            // all-or-nothing from the client's point of view.
            form = form
                .file("files", &file.path)
                .map_err(|_| SubmitError::Connection)?;
        }
        Ok(form.text("csrf_token", payload.csrf_token.clone()))
    }
}

impl Backend for HttpBackend {
    fn submit(&self, payload: &SubmitPayload) -> Result<(), SubmitError> {
        let url = self.url_for(payload.form());

        let sent = match payload {
            SubmitPayload::Login(body) => self.client.post(&url).json(body).send(),
            SubmitPayload::Register(body) => self.client.post(&url).json(body).send(),
            SubmitPayload::Forgot(body) => self.client.post(&url).json(body).send(),
            SubmitPayload::Upload(body) => {
                let form = Self::upload_form(body)?;
                self.client.post(&url).multipart(form).send()
            }
        };

        match sent {
            Ok(response) => Self::finish(response),
            Err(_) => Err(SubmitError::Connection),
        }
    }
}
