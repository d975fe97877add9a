#![allow(dead_code)]

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use parking_lot::Mutex;
use sticker_studio::background::SelectedImage;
use sticker_studio::capture::{
    CaptureOptions, CapturedImage, CompositionScene, Compositor, RenderCapture,
};
use sticker_studio::config::{ExportDispatch, ScreenConfig};
use sticker_studio::error::{CaptureError, ExportError, PickError};
use sticker_studio::event::{EventHandler, ScreenEvent};
use sticker_studio::export::{ExportReceipt, ExportSink, Permission, SinkKind};
use sticker_studio::screen::CompositionScreen;
use sticker_studio::source::{ImageSource, PickOptions, PickOutcome};

/// Answers every request with the next scripted outcome
#[derive(Default)]
pub struct ScriptedSource {
    pub requests: Arc<Mutex<Vec<PickOptions>>>,
    outcomes: Arc<Mutex<Vec<Result<PickOutcome, PickError>>>>,
    ready: Option<Result<PickOutcome, PickError>>,
}

impl ScriptedSource {
    pub fn answering(outcomes: Vec<Result<PickOutcome, PickError>>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(outcomes)),
            ..Default::default()
        }
    }
}

impl ImageSource for ScriptedSource {
    fn request(&mut self, options: PickOptions) {
        self.requests.lock().push(options);
        let mut outcomes = self.outcomes.lock();
        if !outcomes.is_empty() {
            self.ready = Some(outcomes.remove(0));
        }
    }

    fn is_open(&self) -> bool {
        self.ready.is_some()
    }

    fn poll_outcome(&mut self) -> Option<Result<PickOutcome, PickError>> {
        self.ready.take()
    }
}

/// Records what it was asked to capture and delegates to the real compositor
#[derive(Clone, Default)]
pub struct RecordingCapture {
    pub calls: Arc<Mutex<Vec<CaptureOptions>>>,
}

impl RenderCapture for RecordingCapture {
    fn capture(
        &self,
        scene: &CompositionScene,
        options: CaptureOptions,
    ) -> Result<CapturedImage, CaptureError> {
        self.calls.lock().push(options);
        Compositor.capture(scene, options)
    }
}

/// An export sink that remembers every capture it received
pub struct FakeSink {
    pub kind: SinkKind,
    pub permission: Mutex<Permission>,
    pub permission_requests: Mutex<usize>,
    pub exported: Mutex<Vec<(u32, u32, f32)>>,
    pub fail: bool,
}

impl FakeSink {
    pub fn new(kind: SinkKind) -> Arc<Self> {
        Self::build(kind, false)
    }

    pub fn failing(kind: SinkKind) -> Arc<Self> {
        Self::build(kind, true)
    }

    fn build(kind: SinkKind, fail: bool) -> Arc<Self> {
        Arc::new(Self {
            kind,
            permission: Mutex::new(Permission::Undetermined),
            permission_requests: Mutex::new(0),
            exported: Mutex::new(Vec::new()),
            fail,
        })
    }
}

impl ExportSink for FakeSink {
    fn kind(&self) -> SinkKind {
        self.kind
    }

    fn permission(&self) -> Permission {
        *self.permission.lock()
    }

    fn request_permission(&self) -> Permission {
        *self.permission_requests.lock() += 1;
        *self.permission.lock() = Permission::Granted;
        Permission::Granted
    }

    fn export(&self, capture: &CapturedImage) -> Result<ExportReceipt, ExportError> {
        if self.fail {
            return Err(ExportError::PermissionDenied);
        }
        self.exported.lock().push((capture.width(), capture.height(), capture.quality));
        Ok(ExportReceipt {
            location: "memory".to_owned(),
            bytes_written: 0,
        })
    }
}

pub struct EventLog(pub Arc<Mutex<Vec<ScreenEvent>>>);

impl EventHandler for EventLog {
    fn handle_event(&mut self, event: &ScreenEvent) {
        self.0.lock().push(event.clone());
    }
}

pub fn inline_config() -> ScreenConfig {
    ScreenConfig {
        dispatch: ExportDispatch::Inline,
        ..Default::default()
    }
}

pub fn picked(uri: &str) -> Result<PickOutcome, PickError> {
    Ok(PickOutcome::Picked(SelectedImage::new(
        uri,
        RgbaImage::from_pixel(32, 44, Rgba([30, 90, 160, 255])),
    )))
}

pub fn screen_with(
    outcomes: Vec<Result<PickOutcome, PickError>>,
    sink: Arc<FakeSink>,
) -> (CompositionScreen, RecordingCapture) {
    let capture = RecordingCapture::default();
    let screen = CompositionScreen::new(
        inline_config(),
        Box::new(ScriptedSource::answering(outcomes)),
        Box::new(capture.clone()),
        sink,
    );
    (screen, capture)
}
