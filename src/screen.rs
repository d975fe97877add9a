//! The composition screen controller: owns the screen state and drives the picker, capture and export.
//!
//! Views never mutate state. They return a [`ScreenAction`], which goes through
//! [`CompositionScreen::dispatch`]. Asynchronous results (picker outcome, finished
//! export) are applied in [`CompositionScreen::pump`], which the app calls once per frame.

use std::collections::VecDeque;
use std::sync::Arc;

use futures::channel::oneshot;

use crate::background::Background;
use crate::capture::{CaptureOptions, CapturedImage, CompositionScene, Compositor, RenderCapture};
use crate::config::{ExportDispatch, ScreenConfig};
use crate::error::{ExportError, PickError, SaveError};
use crate::event::{EventBus, EventHandler, SaveResult, ScreenEvent};
use crate::export::{ExportReceipt, ExportSink, Permission, Platform, select_sink};
use crate::source::{DialogImageSource, ImageSource, PickOptions, PickOutcome};
use crate::state::{Notice, ScreenAction, ScreenState};
use crate::sticker::Sticker;

pub const NO_IMAGE_SELECTED: &str = "You did not select any image.";
pub const IMAGE_OPEN_FAILED: &str = "Could not open that image.";
pub const SAVE_SUCCEEDED: &str = "Image saved successfully";
pub const SAVE_FAILED: &str = "Failed to save image";

type ExportResult = Result<ExportReceipt, ExportError>;

pub struct CompositionScreen {
    config: ScreenConfig,
    state: ScreenState,
    notices: VecDeque<Notice>,
    source: Box<dyn ImageSource>,
    capture: Box<dyn RenderCapture>,
    sink: Arc<dyn ExportSink>,
    in_flight: Option<oneshot::Receiver<ExportResult>>,
    activated: bool,
    events: EventBus,
}

impl std::fmt::Debug for CompositionScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositionScreen")
            .field("state", &self.state)
            .field("notices", &self.notices)
            .field("sink", &self.sink.kind())
            .field("saving", &self.in_flight.is_some())
            .finish()
    }
}

impl CompositionScreen {
    pub fn new(
        config: ScreenConfig,
        source: Box<dyn ImageSource>,
        capture: Box<dyn RenderCapture>,
        sink: Arc<dyn ExportSink>,
    ) -> Self {
        Self {
            config,
            state: ScreenState::default(),
            notices: VecDeque::new(),
            source,
            capture,
            sink,
            in_flight: None,
            activated: false,
            events: EventBus::new(),
        }
    }

    /// Wires the dialog picker, the CPU compositor and the export sink for the running platform.
    pub fn for_platform(config: ScreenConfig) -> Self {
        let sink: Arc<dyn ExportSink> = Arc::from(select_sink(Platform::current(), &config));
        Self::new(config, Box::new(DialogImageSource::new()), Box::new(Compositor), sink)
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// The notice currently shown, if any
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_picking(&self) -> bool {
        self.source.is_open()
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    pub fn source_mut(&mut self) -> &mut dyn ImageSource {
        self.source.as_mut()
    }

    /// Runs once, when the screen first shows. Asks for storage access if nobody has yet.
    pub fn activate(&mut self) {
        if self.activated {
            return;
        }
        self.activated = true;

        let permission = match self.sink.permission() {
            Permission::Undetermined => self.sink.request_permission(),
            known => known,
        };
        self.events.emit(ScreenEvent::ActivationFinished {
            permission_granted: permission == Permission::Granted,
        });
    }

    pub fn dispatch(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::ChoosePhoto => self.choose_photo(),
            ScreenAction::UseThisPhoto => self.use_this_photo(),
            ScreenAction::Reset => self.reset(),
            ScreenAction::AddSticker => self.add_sticker(),
            ScreenAction::CloseStickerPicker => self.close_sticker_picker(),
            ScreenAction::SelectSticker(sticker) => self.select_sticker(sticker),
            ScreenAction::Save => self.save(),
            ScreenAction::DismissNotice => self.dismiss_notice(),
        }
    }

    pub fn choose_photo(&mut self) {
        self.source.request(PickOptions {
            allow_editing: self.config.pick_allows_editing,
            quality: self.config.pick_quality,
            edit_aspect: self.config.frame_aspect(),
        });
        self.events.emit(ScreenEvent::PickRequested);
    }

    /// Accepts the placeholder as the working image
    pub fn use_this_photo(&mut self) {
        self.state.show_options = true;
        self.events.emit(ScreenEvent::OptionsShown);
    }

    /// Back to the initial footer. The picked sticker stays.
    pub fn reset(&mut self) {
        self.state.show_options = false;
        self.state.selected_image = None;
        self.events.emit(ScreenEvent::Reset);
    }

    pub fn add_sticker(&mut self) {
        self.state.modal_visible = true;
        self.events.emit(ScreenEvent::StickerPickerOpened);
    }

    pub fn close_sticker_picker(&mut self) {
        self.state.modal_visible = false;
        self.events.emit(ScreenEvent::StickerPickerClosed);
    }

    pub fn select_sticker(&mut self, sticker: Sticker) {
        self.state.picked_sticker = Some(sticker);
        self.events.emit(ScreenEvent::StickerPicked(sticker));
        self.close_sticker_picker();
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    /// Captures the composed region and hands it to the export sink.
    /// A save pressed while another is still running is dropped.
    pub fn save(&mut self) {
        if self.in_flight.is_some() {
            self.events.emit(ScreenEvent::SaveDropped);
            return;
        }

        let captured = match self.capture_scene() {
            Ok(captured) => captured,
            Err(err) => {
                self.finish_save(Err(err));
                return;
            }
        };

        self.events.emit(ScreenEvent::SaveStarted);
        self.in_flight = Some(dispatch_export(self.config.dispatch, self.sink.clone(), captured));
    }

    /// The scene as currently composed on screen
    pub fn scene(&self) -> CompositionScene {
        CompositionScene::new(
            &self.config,
            Background::from_selection(self.state.selected_image.as_ref()),
            self.state.picked_sticker,
        )
    }

    fn capture_scene(&self) -> Result<CapturedImage, SaveError> {
        let options = CaptureOptions {
            height: self.config.capture_height,
            quality: self.config.capture_quality,
        };
        Ok(self.capture.capture(&self.scene(), options)?)
    }

    /// Applies results that resolved since the last frame.
    pub fn pump(&mut self) {
        if let Some(outcome) = self.source.poll_outcome() {
            self.apply_pick(outcome);
        }

        if let Some(receiver) = &mut self.in_flight {
            match receiver.try_recv() {
                Ok(None) => {}
                Ok(Some(result)) => {
                    self.in_flight = None;
                    self.finish_save(result.map_err(SaveError::from));
                }
                Err(oneshot::Canceled) => {
                    self.in_flight = None;
                    self.finish_save(Err(ExportError::Cancelled.into()));
                }
            }
        }
    }

    /// Blocks until the running save, if any, has finished and been applied.
    pub fn finish_pending_save(&mut self) {
        if let Some(receiver) = self.in_flight.take() {
            let result =
                futures::executor::block_on(receiver).unwrap_or(Err(ExportError::Cancelled));
            self.finish_save(result.map_err(SaveError::from));
        }
    }

    fn apply_pick(&mut self, outcome: Result<PickOutcome, PickError>) {
        match outcome {
            Ok(PickOutcome::Cancelled) => {
                self.notices.push_back(Notice::info(NO_IMAGE_SELECTED));
                self.events.emit(ScreenEvent::PickCancelled);
            }
            Ok(PickOutcome::Picked(image)) => {
                let uri = image.uri().to_owned();
                self.state.show_options = true;
                self.state.selected_image = Some(image);
                self.events.emit(ScreenEvent::ImageSelected { uri });
            }
            Err(err) => {
                self.notices.push_back(Notice::error(IMAGE_OPEN_FAILED));
                self.events.emit(ScreenEvent::PickFailed {
                    reason: err.to_string(),
                });
            }
        }
    }

    fn finish_save(&mut self, result: Result<ExportReceipt, SaveError>) {
        match result {
            Ok(receipt) => {
                self.notices.push_back(Notice::success(SAVE_SUCCEEDED));
                self.events.emit(ScreenEvent::SaveFinished(SaveResult::Saved {
                    location: receipt.location,
                }));
            }
            Err(err) => {
                log::error!("Saving failed: {}", err);
                self.notices.push_back(Notice::error(SAVE_FAILED));
                self.events.emit(ScreenEvent::SaveFinished(SaveResult::Failed {
                    reason: err.to_string(),
                }));
            }
        }
    }
}

fn dispatch_export(
    mode: ExportDispatch,
    sink: Arc<dyn ExportSink>,
    captured: CapturedImage,
) -> oneshot::Receiver<ExportResult> {
    let (sender, receiver) = oneshot::channel();

    // No threads in the browser.
    let mode = if cfg!(target_arch = "wasm32") { ExportDispatch::Inline } else { mode };

    match mode {
        ExportDispatch::Inline => {
            let _ = sender.send(sink.export(&captured));
        }
        ExportDispatch::Background => {
            std::thread::spawn(move || {
                let _ = sender.send(sink.export(&captured));
            });
        }
    }
    receiver
}
