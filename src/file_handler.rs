use eframe::egui;
use futures::channel::oneshot;
use std::sync::Arc;

use crate::error::PickError;

/// A file the user handed us, not yet decoded
#[derive(Clone)]
pub struct ChosenFile {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl std::fmt::Debug for ChosenFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChosenFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Collects files dropped onto the window while the picker is open
#[derive(Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks up newly dropped files from the UI context.
    /// Returns true if any arrived this frame.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        let mut new_dropped_files = false;

        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
                new_dropped_files = true;
            }
        });

        new_dropped_files
    }

    /// Takes the first dropped image; non-image drops are reported and skipped.
    pub fn take_dropped_image(&mut self) -> Option<Result<ChosenFile, PickError>> {
        let files = std::mem::take(&mut self.dropped_files);
        let mut first_error = None;

        for file in files {
            let file_name = display_name(&file);
            if !is_image_file(&file.mime, file.path.as_deref()) {
                log::warn!("Dropped file is not a supported type: {}", file_name);
                first_error.get_or_insert(PickError::Unsupported(file_name));
                continue;
            }
            return Some(read_dropped(file, file_name));
        }

        first_error.map(Err)
    }

    /// Darkens the window while files hover over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let painter =
            ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop to use this photo",
            egui::FontId::proportional(22.0),
            Color32::WHITE,
        );
    }
}

fn display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
pub fn is_image_file(mime: &str, path: Option<&std::path::Path>) -> bool {
    if !mime.is_empty() {
        return mime.starts_with("image/");
    }
    path.and_then(|path| path.extension())
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
        })
        .unwrap_or(false)
}

fn read_dropped(file: egui::DroppedFile, name: String) -> Result<ChosenFile, PickError> {
    if let Some(bytes) = file.bytes {
        log::info!("Using dropped image from memory: {} ({} bytes)", name, bytes.len());
        return Ok(ChosenFile { name, bytes });
    }
    match file.path {
        Some(path) => read_path(&path),
        None => Err(PickError::Unsupported(name)),
    }
}

/// Reads an image file from disk. Not available on the web, where only dropped bytes exist.
#[cfg(not(target_arch = "wasm32"))]
pub fn read_path(path: &std::path::Path) -> Result<ChosenFile, PickError> {
    let name = path.display().to_string();
    if !is_image_file("", Some(path)) {
        return Err(PickError::Unsupported(name));
    }
    log::info!("Reading image from path: {}", name);
    let bytes = std::fs::read(path).map_err(|source| PickError::Read {
        path: name.clone(),
        source,
    })?;
    Ok(ChosenFile {
        name,
        bytes: bytes.into(),
    })
}

#[cfg(target_arch = "wasm32")]
pub fn read_path(path: &std::path::Path) -> Result<ChosenFile, PickError> {
    log::warn!("File path access not supported on WASM: {}", path.display());
    Err(PickError::Unsupported(path.display().to_string()))
}

/// The file the browser chooser resolves to, delivered on a later frame
pub type BrowseReceiver = oneshot::Receiver<Result<ChosenFile, PickError>>;

/// Opens the browser's file chooser for images.
/// Nothing is sent if the user dismisses the chooser.
#[cfg(target_arch = "wasm32")]
pub fn browse_for_image() -> Result<BrowseReceiver, PickError> {
    use eframe::wasm_bindgen::JsCast as _;
    use eframe::wasm_bindgen::closure::Closure;

    let browser = |err: eframe::wasm_bindgen::JsValue| PickError::Browser(format!("{err:?}"));

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| PickError::Browser("no document".to_owned()))?;
    let input = document
        .create_element("input")
        .map_err(browser)?
        .dyn_into::<web_sys::HtmlInputElement>()
        .map_err(|_| PickError::Browser("created element is not an input".to_owned()))?;
    input.set_type("file");
    input.set_accept("image/*");

    let (sender, receiver) = oneshot::channel();
    let chooser = input.clone();
    let on_change = Closure::once_into_js(move || {
        let Some(file) = chooser.files().and_then(|files| files.get(0)) else {
            return;
        };
        wasm_bindgen_futures::spawn_local(async move {
            let name = file.name();
            let read = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await;
            let result = match read {
                Ok(buffer) => {
                    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                    log::info!("Using chosen image: {} ({} bytes)", name, bytes.len());
                    Ok(ChosenFile {
                        name,
                        bytes: bytes.into(),
                    })
                }
                Err(err) => Err(browser(err)),
            };
            // The picker may have been closed in the meantime.
            let _ = sender.send(result);
        });
    });
    input.set_onchange(Some(on_change.unchecked_ref()));
    input.click();

    Ok(receiver)
}
