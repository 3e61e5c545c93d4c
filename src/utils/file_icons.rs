// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges
//! Phosphor file-icon mapping based on MIME type.
//!
//! Used for upload rows that do not get an image preview. The mapping only
//! needs the coarse types a portal upload typically sees; anything else
//! falls back to the generic file icon.

/// Return a Phosphor file icon matching the declared MIME type.
pub fn icon_for(mime: &str) -> &'static str {
    let mime = mime
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    if mime.starts_with("image/") {
        return egui_phosphor::regular::FILE_IMAGE;
    }
    if mime.starts_with("video/") {
        return egui_phosphor::regular::FILE_VIDEO;
    }
    if mime.starts_with("audio/") {
        return egui_phosphor::regular::FILE_AUDIO;
    }
    if mime == "application/pdf" {
        return egui_phosphor::regular::FILE_PDF;
    }
    if mime == "text/csv" {
        return egui_phosphor::regular::FILE_CSV;
    }
    if is_archive_mime(&mime) {
        return egui_phosphor::regular::FILE_ARCHIVE;
    }
    if mime == "application/json" || mime == "application/xml" || mime == "text/xml" {
        return egui_phosphor::regular::FILE_CODE;
    }
    if mime.starts_with("text/") {
        return egui_phosphor::regular::FILE_TXT;
    }

    egui_phosphor::regular::FILE
}

fn is_archive_mime(mime: &str) -> bool {
    matches!(
        mime,
        "application/zip"
            | "application/gzip"
            | "application/x-7z-compressed"
            | "application/x-rar-compressed"
            | "application/x-gtar"
            | "application/x-tar"
            | "application/x-bzip2"
            | "application/x-xz"
            | "application/zstd"
    )
}
