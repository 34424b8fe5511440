use super::state::NoticeKind;
use super::AgilizaApp;
use agiliza_uploader::session::ALLOWED_EXTENSIONS;
use agiliza_uploader::utils::file_size::format_size;
use eframe::egui::{self, Color32, RichText};
use rfd::FileDialog;
use std::path::Path;

/// Spreadsheet models exposed to the user: (identifier sent to the server,
/// display name, short description). The membership of this set is owned by
/// the UI layer, not the controller.
const MODEL_CHOICES: &[(&str, &str, &str)] = &[
    ("model-a", "Modelo A", "Standard spreadsheet layout"),
    ("model-b", "Modelo B", "Detailed layout with per-item breakdown"),
];

const TESSERACT_GUIDE_URL: &str = "https://tesseract-ocr.github.io/tessdoc/Installation.html";

const SUCCESS_GREEN: Color32 = Color32::from_rgb(0, 180, 0);
const DANGER_RED: Color32 = Color32::from_rgb(220, 50, 50);

impl AgilizaApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        self.handle_dropped_files(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(16.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Agiliza Converter");
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Convert TXT, PDF, Excel and images into spreadsheets")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(16.0);
                self.render_drop_zone(ui);
                ui.add_space(12.0);

                if self.state.in_flight {
                    // While a submission is in flight the file list and the
                    // buttons are hidden, exactly like the original UI.
                    self.render_loading(ui);
                } else {
                    self.render_file_list(ui);
                    ui.add_space(12.0);
                    self.render_actions(ui);
                }

                ui.add_space(12.0);
                self.render_notice(ui);
                ui.add_space(16.0);
            });
        });

        self.render_model_modal(ctx);
        self.render_ocr_hint(ctx);
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if self.state.in_flight {
            return;
        }
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let paths: Vec<_> = dropped.into_iter().filter_map(|f| f.path).collect();
        if !paths.is_empty() {
            self.stage_paths(paths);
        }
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.label(RichText::new("📂").size(32.0));
                ui.label("Drag files here, or");
                ui.add_space(4.0);
                let picker = ui.add_enabled(
                    !self.state.in_flight,
                    egui::Button::new("Select Files"),
                );
                if picker.clicked() {
                    if let Some(paths) = FileDialog::new()
                        .add_filter("Supported files", &ALLOWED_EXTENSIONS)
                        .pick_files()
                    {
                        self.stage_paths(paths);
                    }
                }
                ui.add_space(4.0);
                ui.label(
                    RichText::new("TXT, PDF, XLSX, XLS, JPG, JPEG, PNG, BMP")
                        .small()
                        .color(ui.visuals().text_color().gamma_multiply(0.6)),
                );
                ui.add_space(12.0);
            });
        });
    }

    fn render_file_list(&mut self, ui: &mut egui::Ui) {
        if self.session.is_empty() {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("No files selected")
                        .color(ui.visuals().text_color().gamma_multiply(0.5)),
                );
            });
            return;
        }

        let mut to_remove: Option<usize> = None;
        ui.group(|ui| {
            ui.label(
                RichText::new(format!("Selected files ({})", self.session.file_count())).strong(),
            );
            ui.add_space(6.0);
            for (index, file) in self.session.files().iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(file_icon(&file.name));
                    ui.label(&file.name);
                    ui.label(
                        RichText::new(format_size(file.size))
                            .small()
                            .color(ui.visuals().text_color().gamma_multiply(0.6)),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✖").clicked() {
                            to_remove = Some(index);
                        }
                    });
                });
            }
            if let Some(model) = self.session.model() {
                ui.add_space(6.0);
                ui.label(
                    RichText::new(format!("Model: {}", model_label(model)))
                        .small()
                        .color(ui.visuals().text_color().gamma_multiply(0.7)),
                );
            }
        });
        if let Some(index) = to_remove {
            self.remove_file(index);
        }
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        if self.session.is_empty() {
            return;
        }
        ui.vertical_centered(|ui| {
            ui.horizontal(|ui| {
                let spacing = (ui.available_width() - 320.0).max(0.0) / 2.0;
                ui.add_space(spacing);

                let generate = egui::Button::new("📤 Generate Spreadsheet")
                    .min_size(egui::vec2(200.0, 36.0));
                if ui.add_enabled(!self.state.in_flight, generate).clicked() {
                    self.start_upload();
                }

                ui.add_space(8.0);
                if ui
                    .add(egui::Button::new("Clear").min_size(egui::vec2(80.0, 36.0)))
                    .clicked()
                {
                    self.clear_session();
                }
            });
            if self.session.model().is_none() {
                ui.add_space(4.0);
                if ui.small_button("Choose model…").clicked() {
                    self.state.model_modal_open = true;
                }
            }
        });
    }

    fn render_loading(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.add(egui::Spinner::new().size(28.0));
            ui.add_space(6.0);
            ui.label("Processing files…");
            ui.label(
                RichText::new("This can take a while for scanned documents")
                    .small()
                    .color(ui.visuals().text_color().gamma_multiply(0.6)),
            );
            ui.add_space(12.0);
        });
    }

    fn render_notice(&mut self, ui: &mut egui::Ui) {
        if let Some(notice) = &self.state.notice {
            let color = match notice.kind {
                NoticeKind::Success => SUCCESS_GREEN,
                NoticeKind::Error => DANGER_RED,
            };
            ui.vertical_centered(|ui| {
                ui.colored_label(color, &notice.message);
            });
        }
    }

    fn render_model_modal(&mut self, ctx: &egui::Context) {
        if !self.state.model_modal_open {
            return;
        }
        let mut chosen: Option<&str> = None;
        egui::Window::new("Choose a spreadsheet model")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("The model defines the layout of the generated spreadsheet.");
                ui.add_space(8.0);
                for (id, label, description) in MODEL_CHOICES {
                    let selected = self.session.model() == Some(*id);
                    if ui
                        .selectable_label(selected, format!("{label}: {description}"))
                        .clicked()
                    {
                        chosen = Some(*id);
                    }
                    ui.add_space(4.0);
                }
            });
        // Selecting a model closes the modal immediately.
        if let Some(id) = chosen {
            self.choose_model(id);
        }
    }

    fn render_ocr_hint(&mut self, ctx: &egui::Context) {
        if !self.state.show_ocr_hint {
            return;
        }
        let mut dismiss = false;
        egui::Window::new("OCR engine required")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(
                    "This failure looks like a text-extraction problem. Converting \
                     scanned images and PDFs requires the Tesseract OCR engine to be \
                     installed on the server and available on its PATH.",
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Open install guide").clicked() {
                        if let Err(e) = open::that(TESSERACT_GUIDE_URL) {
                            tracing::warn!(error = %e, "failed to open install guide");
                        }
                    }
                    if ui.button("Dismiss").clicked() {
                        dismiss = true;
                    }
                });
            });
        if dismiss {
            self.state.show_ocr_hint = false;
        }
    }
}

fn file_icon(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("pdf") => "📕",
        Some("xlsx") | Some("xls") => "📊",
        Some("jpg") | Some("jpeg") | Some("png") | Some("bmp") => "🖼",
        _ => "📄",
    }
}

fn model_label(id: &str) -> &str {
    MODEL_CHOICES
        .iter()
        .find(|(choice_id, _, _)| *choice_id == id)
        .map(|(_, label, _)| *label)
        .unwrap_or(id)
}
