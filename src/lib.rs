#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod background;
pub mod capture;
pub mod components;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod file_handler;
pub mod panels;
pub mod screen;
pub mod source;
pub mod state;
pub mod sticker;
pub mod texture_manager;
pub mod util;

pub use app::StickerApp;
pub use capture::{CaptureOptions, CapturedImage, CompositionScene, Compositor, RenderCapture};
pub use config::ScreenConfig;
pub use export::{ExportSink, Permission, Platform, SinkKind};
pub use screen::CompositionScreen;
pub use source::{ImageSource, PickOptions, PickOutcome};
pub use state::{Notice, ScreenAction, ScreenState};
pub use sticker::Sticker;
