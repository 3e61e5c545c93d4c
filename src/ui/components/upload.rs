// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Upload form: file selection, submission, and the preview pipeline.
//!
//! Every file pick replaces the whole selection and bumps a generation
//! counter. Preview decoding runs off the UI thread and its results carry
//! the generation they were requested under; results from an older
//! generation are discarded, so a slow decode can never attach to a later
//! selection.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use eframe::egui;
use egui_extras::image::load_svg_bytes_with_size;
use resvg::usvg::Options;

use crate::models::file::{SelectedFile, guess_mime};
use crate::utils::icon_for;

/// MVU state for the upload form and its preview cache.
#[derive(Default)]
pub struct UploadModel {
    files: Vec<SelectedFile>,
    previews: HashMap<PathBuf, egui::TextureHandle>,
    preview_failures: HashSet<PathBuf>,
    generation: u64,
    pub error: Option<String>,
}

impl UploadModel {
    /// Current selection in pick order.
    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    /// Tag of the current selection; preview results from older tags are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn preview_for(&self, path: &Path) -> Option<&egui::TextureHandle> {
        self.previews.get(path)
    }

    pub fn preview_failed(&self, path: &Path) -> bool {
        self.preview_failures.contains(path)
    }
}

/// Messages emitted by the upload view or the preview pipeline.
// Debug omitted because TextureHandle is not Debug.
pub enum UploadMsg {
    RequestPickFiles,
    /// New selection replacing the previous one; empty means the dialog was
    /// cancelled and the current selection stays.
    FilesPicked(Vec<SelectedFile>),
    PreviewReady {
        path: PathBuf,
        generation: u64,
        texture: egui::TextureHandle,
    },
    PreviewFailed {
        path: PathBuf,
        generation: u64,
    },
    Submit,
    /// Reset the form after a successful upload.
    Clear,
}

/// Side-effectful commands that run off the UI path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadCommand {
    PickFiles,
    LoadPreview { path: PathBuf, generation: u64 },
}

/// Apply a message to the upload model. `Submit` is intercepted by the MVU root.
pub fn update(model: &mut UploadModel, msg: UploadMsg, cmds: &mut Vec<UploadCommand>) {
    match msg {
        UploadMsg::RequestPickFiles => cmds.push(UploadCommand::PickFiles),
        UploadMsg::FilesPicked(files) => {
            if files.is_empty() {
                return;
            }
            model.generation += 1;
            model.previews.clear();
            model.preview_failures.clear();
            model.files = files;
            for file in &model.files {
                if file.is_image() {
                    cmds.push(UploadCommand::LoadPreview {
                        path: file.path.clone(),
                        generation: model.generation,
                    });
                }
            }
        }
        UploadMsg::PreviewReady {
            path,
            generation,
            texture,
        } => {
            if generation == model.generation {
                model.previews.insert(path, texture);
            }
        }
        UploadMsg::PreviewFailed { path, generation } => {
            if generation == model.generation {
                model.preview_failures.insert(path);
            }
        }
        UploadMsg::Submit => {}
        UploadMsg::Clear => {
            model.files.clear();
            model.previews.clear();
            model.preview_failures.clear();
            model.error = None;
            // The generation stays monotonic so a late decode from the
            // cleared selection cannot attach to a future one.
            model.generation += 1;
        }
    }
}

/// Render the upload form and return any triggered messages.
pub fn view(ui: &mut egui::Ui, model: &UploadModel) -> Vec<UploadMsg> {
    let mut msgs = Vec::new();

    if ui
        .button(format!(
            "{} Selecionar arquivos",
            egui_phosphor::regular::PLUS
        ))
        .clicked()
    {
        msgs.push(UploadMsg::RequestPickFiles);
    }

    ui.add_space(6.0);

    let visuals = ui.visuals().clone();
    egui::Frame::new()
        .fill(visuals.panel_fill)
        .stroke(visuals.window_stroke())
        .inner_margin(8.0)
        .show(ui, |ui| {
            if model.files.is_empty() {
                ui.label(
                    egui::RichText::new("Nenhum arquivo selecionado")
                        .color(egui::Color32::from_gray(150)),
                );
            } else {
                render_preview_list(ui, model);
            }
        });

    ui.add_space(10.0);
    if ui
        .button(format!("{} Enviar", egui_phosphor::regular::UPLOAD_SIMPLE))
        .clicked()
    {
        msgs.push(UploadMsg::Submit);
    }

    super::error_label(ui, model.error.as_deref());

    msgs
}

/// One row per selected file: image preview, pending spinner, or icon + name.
fn render_preview_list(ui: &mut egui::Ui, model: &UploadModel) {
    for (index, file) in model.files.iter().enumerate() {
        ui.horizontal(|ui| {
            if let Some(texture) = model.previews.get(&file.path) {
                let size = texture.size_vec2();
                let max = 96.0;
                let scale = (max / size.x).min(max / size.y).min(1.0);
                ui.add(egui::Image::new((texture.id(), size * scale)));
            } else if file.is_image() && !model.preview_failed(&file.path) {
                ui.add(egui::Spinner::new().size(14.0))
                    .on_hover_text("Gerando pré-visualização");
            } else {
                ui.label(egui::RichText::new(icon_for(&file.mime)).size(20.0));
            }

            ui.vertical(|ui| {
                ui.label(format!("Arquivo: {}", file.name()));
                ui.label(
                    egui::RichText::new(format!("{} | {}", file.mime, format_bytes(file.size)))
                        .small()
                        .color(egui::Color32::from_gray(102)),
                );
            });
        });

        if index < model.files.len() - 1 {
            ui.separator();
        }
    }
}

/// Stat and classify picked paths; runs on a worker thread.
pub(crate) fn selected_files_from_paths(paths: Vec<PathBuf>) -> Vec<SelectedFile> {
    paths
        .into_iter()
        .map(|path| {
            let mime = guess_mime(&path);
            let size = path.metadata().map(|m| m.len()).unwrap_or(0);
            SelectedFile::new(path, mime, size)
        })
        .collect()
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Human-readable formatting for byte sizes with binary units.
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Decode an image file into a preview-sized `ColorImage`.
pub(crate) fn load_preview_image(path: &Path) -> Result<egui::ColorImage, String> {
    const MAX: u32 = 256;

    if is_svg(path) {
        let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
        let hint = egui::SizeHint::Size {
            width: MAX,
            height: MAX,
            maintain_aspect_ratio: true,
        };
        let options = Options::default();
        return load_svg_bytes_with_size(&bytes, hint, &options).map_err(|e| e.to_string());
    }

    let dyn_img = image::open(path).map_err(|e| e.to_string())?;
    let resized = dyn_img.thumbnail(MAX, MAX).to_rgba8();
    let size = [resized.width() as usize, resized.height() as usize];
    let pixels = resized.into_raw();
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use eframe::egui::Color32;
    use image::{ImageBuffer, Rgba};
    use tempfile::TempDir;

    use super::*;

    fn image_file(name: &str) -> SelectedFile {
        SelectedFile::new(PathBuf::from(name), "image/png".into(), 16)
    }

    fn text_file(name: &str) -> SelectedFile {
        SelectedFile::new(PathBuf::from(name), "text/plain".into(), 16)
    }

    // One image and one non-image: exactly one preview decode is requested,
    // the other row renders as a label straight away.
    #[test]
    fn files_picked_requests_previews_only_for_images() {
        let mut model = UploadModel::default();
        let mut cmds = Vec::new();

        update(
            &mut model,
            UploadMsg::FilesPicked(vec![image_file("a.png"), text_file("b.txt")]),
            &mut cmds,
        );

        assert_eq!(model.files().len(), 2);
        assert_eq!(
            cmds,
            vec![UploadCommand::LoadPreview {
                path: PathBuf::from("a.png"),
                generation: 1,
            }]
        );
    }

    // A cancelled dialog reports an empty pick; the selection must survive.
    #[test]
    fn empty_pick_keeps_current_selection() {
        let mut model = UploadModel::default();
        let mut cmds = Vec::new();
        update(
            &mut model,
            UploadMsg::FilesPicked(vec![text_file("b.txt")]),
            &mut cmds,
        );

        update(&mut model, UploadMsg::FilesPicked(Vec::new()), &mut cmds);

        assert_eq!(model.files().len(), 1);
        assert_eq!(model.generation(), 1);
    }

    #[test]
    fn stale_preview_results_are_discarded() {
        let mut model = UploadModel::default();
        let mut cmds = Vec::new();
        update(
            &mut model,
            UploadMsg::FilesPicked(vec![image_file("a.png")]),
            &mut cmds,
        );
        update(
            &mut model,
            UploadMsg::FilesPicked(vec![image_file("c.png")]),
            &mut cmds,
        );

        // Completion from the first selection arrives after the second pick.
        update(
            &mut model,
            UploadMsg::PreviewFailed {
                path: PathBuf::from("a.png"),
                generation: 1,
            },
            &mut cmds,
        );

        assert!(!model.preview_failed(&PathBuf::from("a.png")));
    }

    #[test]
    fn current_generation_preview_failure_is_recorded() {
        let mut model = UploadModel::default();
        let mut cmds = Vec::new();
        update(
            &mut model,
            UploadMsg::FilesPicked(vec![image_file("a.png")]),
            &mut cmds,
        );

        let generation = model.generation();
        update(
            &mut model,
            UploadMsg::PreviewFailed {
                path: PathBuf::from("a.png"),
                generation,
            },
            &mut cmds,
        );

        assert!(model.preview_failed(&PathBuf::from("a.png")));
    }

    #[test]
    fn clear_resets_selection_and_bumps_generation() {
        let mut model = UploadModel::default();
        model.error = Some("Erro no upload.".into());
        let mut cmds = Vec::new();
        update(
            &mut model,
            UploadMsg::FilesPicked(vec![image_file("a.png")]),
            &mut cmds,
        );

        update(&mut model, UploadMsg::Clear, &mut cmds);

        assert!(model.files().is_empty());
        assert!(model.error.is_none());
        assert_eq!(model.generation(), 2);
    }

    #[test]
    fn selected_files_from_paths_guesses_mime_and_size() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();

        let files = selected_files_from_paths(vec![path.clone()]);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].mime, "text/plain");
        assert_eq!(files[0].size, 5);
        assert_eq!(files[0].path, path);
    }

    // Raster previews should retain aspect ratio and respect max bounds.
    #[test]
    fn load_preview_image_handles_raster_image() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("thumb.png");
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(10, 12, Rgba([0, 255, 0, 255]));
        img.save(&path).expect("png saved");

        let preview = load_preview_image(&path).expect("preview created");

        assert!(preview.size[0] <= 256 && preview.size[1] <= 256);
        let aspect = preview.size[0] as f32 / preview.size[1] as f32;
        let expected_aspect = 10.0 / 12.0;
        assert!((aspect - expected_aspect).abs() < 0.05);
    }

    // SVG input should rasterize successfully within size limits.
    #[test]
    fn load_preview_image_renders_svg() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("icon.svg");
        let svg = r"<svg xmlns='http://www.w3.org/2000/svg' width='16' height='16'><rect width='16' height='16' fill='red'/></svg>";
        fs::write(&path, svg).expect("svg saved");

        let preview = load_preview_image(&path).expect("preview created");

        assert!(preview.size[0] <= 256 && preview.size[1] <= 256);
        assert!(preview.pixels.iter().any(|p| *p != Color32::TRANSPARENT));
    }

    // Invalid image data should yield an error instead of panicking.
    #[test]
    fn load_preview_image_errors_on_invalid_image() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("invalid.png");
        fs::write(&path, b"not an image").expect("file written");

        let result = load_preview_image(&path);

        assert!(result.is_err());
    }
}
