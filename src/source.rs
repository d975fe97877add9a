//! The image source: a picker dialog that may be declined.

use eframe::egui;
use futures::channel::oneshot;

use crate::background::{SelectedImage, apply_quality, crop_to_aspect};
use crate::error::PickError;
use crate::file_handler::{BrowseReceiver, ChosenFile, FileHandler};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickOptions {
    /// Let the user crop before confirming; here a center crop to `edit_aspect`
    pub allow_editing: bool,
    /// 0..=1; below 1 the picked image is downscaled
    pub quality: f32,
    /// Width over height the edit step crops to
    pub edit_aspect: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    Cancelled,
    Picked(SelectedImage),
}

/// A user-facing chooser. A request stays open until the user confirms or declines.
pub trait ImageSource {
    fn request(&mut self, options: PickOptions);

    fn is_open(&self) -> bool;

    /// Returns the resolved outcome once, then `None` until the next request.
    fn poll_outcome(&mut self) -> Option<Result<PickOutcome, PickError>>;

    /// Draws whatever UI the source needs. Sources without UI ignore this.
    fn show(&mut self, _ctx: &egui::Context) {}
}

/// Decodes a chosen file and applies the pick options.
pub fn prepare(file: &ChosenFile, options: PickOptions) -> Result<SelectedImage, PickError> {
    let decoded = image::load_from_memory(&file.bytes).map_err(|source| PickError::Decode {
        name: file.name.clone(),
        source,
    })?;
    let mut pixels = decoded.to_rgba8();
    if options.allow_editing {
        pixels = crop_to_aspect(&pixels, options.edit_aspect);
    }
    let pixels = apply_quality(pixels, options.quality);
    log::debug!("Prepared {}: {}x{}", file.name, pixels.width(), pixels.height());
    Ok(SelectedImage::new(file.name.clone(), pixels))
}

/// What the picker window asked for this frame
#[derive(Debug, Clone, PartialEq)]
enum DialogCommand {
    Cancel,
    OpenPath(std::path::PathBuf),
    #[cfg(target_arch = "wasm32")]
    Browse,
}

/// egui picker window: drop a file, type a path on native targets, or browse on the web.
#[derive(Default)]
pub struct DialogImageSource {
    pending: Option<PickOptions>,
    outcome: Option<Result<PickOutcome, PickError>>,
    path_input: String,
    file_handler: FileHandler,
    browse: Option<BrowseReceiver>,
}

impl DialogImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve(&mut self, outcome: Result<PickOutcome, PickError>) {
        self.pending = None;
        self.browse = None;
        self.outcome = Some(outcome);
    }

    fn resolve_file(&mut self, file: Result<ChosenFile, PickError>) {
        let Some(options) = self.pending else {
            return;
        };
        let outcome = file.and_then(|file| prepare(&file, options)).map(PickOutcome::Picked);
        self.resolve(outcome);
    }

    /// Hands over a file from the browser chooser once it has been read.
    fn poll_browse(&mut self) {
        let Some(receiver) = &mut self.browse else {
            return;
        };
        match receiver.try_recv() {
            Ok(None) => {}
            Ok(Some(file)) => {
                self.browse = None;
                self.resolve_file(file);
            }
            Err(oneshot::Canceled) => self.browse = None,
        }
    }

    fn apply(&mut self, command: DialogCommand) {
        match command {
            DialogCommand::Cancel => self.resolve(Ok(PickOutcome::Cancelled)),
            DialogCommand::OpenPath(path) => {
                let file = crate::file_handler::read_path(&path);
                self.resolve_file(file);
            }
            #[cfg(target_arch = "wasm32")]
            DialogCommand::Browse => match crate::file_handler::browse_for_image() {
                Ok(receiver) => self.browse = Some(receiver),
                Err(err) => self.resolve(Err(err)),
            },
        }
    }
}

impl ImageSource for DialogImageSource {
    fn request(&mut self, options: PickOptions) {
        if self.pending.is_some() {
            log::debug!("Picker already open");
            return;
        }
        self.pending = Some(options);
        self.outcome = None;
    }

    fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    fn poll_outcome(&mut self) -> Option<Result<PickOutcome, PickError>> {
        self.poll_browse();
        self.outcome.take()
    }

    fn show(&mut self, ctx: &egui::Context) {
        if self.pending.is_none() {
            return;
        }

        self.file_handler.preview_files_being_dropped(ctx);
        if self.file_handler.check_for_dropped_files(ctx) {
            if let Some(file) = self.file_handler.take_dropped_image() {
                self.resolve_file(file);
                return;
            }
        }

        let mut command = None;
        egui::Window::new("Choose a photo")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Drop an image anywhere on the window.");
                #[cfg(not(target_arch = "wasm32"))]
                {
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label("Path:");
                        let response = ui.text_edit_singleline(&mut self.path_input);
                        let entered =
                            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        let has_path = !self.path_input.trim().is_empty();
                        let open = ui.add_enabled(has_path, egui::Button::new("Open")).clicked();
                        if has_path && (entered || open) {
                            let path = std::path::PathBuf::from(self.path_input.trim());
                            command = Some(DialogCommand::OpenPath(path));
                        }
                    });
                }
                ui.horizontal(|ui| {
                    #[cfg(target_arch = "wasm32")]
                    {
                        let idle = self.browse.is_none();
                        if ui.add_enabled(idle, egui::Button::new("Browse…")).clicked() {
                            command = Some(DialogCommand::Browse);
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        command = Some(DialogCommand::Cancel);
                    }
                });
            });

        if let Some(command) = command {
            log::debug!("Picker command: {:?}", command);
            self.apply(command);
        }
    }
}
