// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Selected-file domain model used by the upload form and preview renderer.

use std::path::{Path, PathBuf};

/// A file chosen in the upload form, with its declared MIME type and size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub mime: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn new(path: PathBuf, mime: String, size: u64) -> Self {
        Self { path, mime, size }
    }

    /// Display name shown in the preview list.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    /// Whether the declared MIME type selects the image preview path.
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// Guess the MIME type for a path, defaulting to `application/octet-stream`.
pub fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
