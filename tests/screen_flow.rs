mod common;

use std::sync::Arc;

use common::{EventLog, FakeSink, picked, screen_with};
use parking_lot::Mutex;
use sticker_studio::event::{SaveResult, ScreenEvent};
use sticker_studio::export::{Permission, SinkKind};
use sticker_studio::screen::{IMAGE_OPEN_FAILED, NO_IMAGE_SELECTED, SAVE_FAILED, SAVE_SUCCEEDED};
use sticker_studio::source::PickOutcome;
use sticker_studio::state::{NoticeKind, ScreenAction};
use sticker_studio::{ScreenState, Sticker};

#[test]
fn test_initial_state() {
    let (screen, _) = screen_with(vec![], FakeSink::new(SinkKind::MediaStore));
    assert_eq!(*screen.state(), ScreenState::default());
    assert_eq!(screen.state().selected_uri(), "");
    assert!(screen.notice().is_none());
}

#[test]
fn test_cancelled_pick_leaves_state_unchanged() {
    let (mut screen, _) =
        screen_with(vec![Ok(PickOutcome::Cancelled)], FakeSink::new(SinkKind::MediaStore));
    let before = screen.state().clone();

    screen.dispatch(ScreenAction::ChoosePhoto);
    screen.pump();

    assert_eq!(*screen.state(), before);
    let notice = screen.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Info);
    assert_eq!(notice.message, NO_IMAGE_SELECTED);
}

#[test]
fn test_cancelled_pick_after_selection_keeps_previous_image() {
    let (mut screen, _) = screen_with(
        vec![picked("file://a.jpg"), Ok(PickOutcome::Cancelled)],
        FakeSink::new(SinkKind::MediaStore),
    );
    screen.choose_photo();
    screen.pump();
    let before = screen.state().clone();

    screen.choose_photo();
    screen.pump();

    assert_eq!(*screen.state(), before);
    assert_eq!(screen.state().selected_uri(), "file://a.jpg");
}

#[test]
fn test_successful_pick_shows_options() {
    let (mut screen, _) =
        screen_with(vec![picked("file://a.jpg")], FakeSink::new(SinkKind::MediaStore));
    assert!(!screen.state().show_options);

    screen.dispatch(ScreenAction::ChoosePhoto);
    // Nothing changes until the picker resolves.
    assert!(!screen.state().show_options);
    screen.pump();

    assert!(screen.state().show_options);
    assert_eq!(screen.state().selected_uri(), "file://a.jpg");
    assert!(screen.notice().is_none());
}

#[test]
fn test_pick_requests_editing_at_full_quality() {
    let source = common::ScriptedSource::answering(vec![Ok(PickOutcome::Cancelled)]);
    let requests = source.requests.clone();
    let mut screen = sticker_studio::CompositionScreen::new(
        common::inline_config(),
        Box::new(source),
        Box::new(sticker_studio::Compositor),
        FakeSink::new(SinkKind::MediaStore),
    );

    screen.choose_photo();

    let requests = requests.lock();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].allow_editing);
    assert_eq!(requests[0].quality, 1.0);
}

#[test]
fn test_failed_pick_reports_error() {
    let failure = Err(sticker_studio::error::PickError::Unsupported("notes.txt".to_owned()));
    let (mut screen, _) = screen_with(vec![failure], FakeSink::new(SinkKind::MediaStore));

    screen.choose_photo();
    screen.pump();

    assert_eq!(*screen.state(), ScreenState::default());
    assert_eq!(screen.notice().unwrap().message, IMAGE_OPEN_FAILED);
}

#[test]
fn test_use_this_photo_keeps_placeholder() {
    let (mut screen, _) = screen_with(vec![], FakeSink::new(SinkKind::MediaStore));
    screen.dispatch(ScreenAction::UseThisPhoto);
    assert!(screen.state().show_options);
    assert!(screen.state().selected_image.is_none());
}

#[test]
fn test_reset_keeps_sticker() {
    let (mut screen, _) =
        screen_with(vec![picked("file://a.jpg")], FakeSink::new(SinkKind::MediaStore));
    screen.choose_photo();
    screen.pump();
    screen.dispatch(ScreenAction::SelectSticker(Sticker::Heart));

    screen.dispatch(ScreenAction::Reset);

    assert!(!screen.state().show_options);
    assert_eq!(screen.state().selected_uri(), "");
    assert_eq!(screen.state().picked_sticker, Some(Sticker::Heart));
}

#[test]
fn test_opening_and_closing_picker_keeps_sticker() {
    let (mut screen, _) = screen_with(vec![], FakeSink::new(SinkKind::MediaStore));
    screen.dispatch(ScreenAction::SelectSticker(Sticker::Star));

    screen.dispatch(ScreenAction::AddSticker);
    assert!(screen.state().modal_visible);
    screen.dispatch(ScreenAction::CloseStickerPicker);

    assert!(!screen.state().modal_visible);
    assert_eq!(screen.state().picked_sticker, Some(Sticker::Star));
}

#[test]
fn test_selecting_sticker_closes_picker() {
    let (mut screen, _) = screen_with(vec![], FakeSink::new(SinkKind::MediaStore));
    screen.dispatch(ScreenAction::AddSticker);
    screen.dispatch(ScreenAction::SelectSticker(Sticker::Smile));

    assert_eq!(screen.state().picked_sticker, Some(Sticker::Smile));
    assert!(!screen.state().modal_visible);
}

#[test]
fn test_example_scenario() {
    let sink = FakeSink::new(SinkKind::MediaStore);
    let (mut screen, capture) = screen_with(vec![picked("file://a.jpg")], sink.clone());
    screen.activate();

    screen.dispatch(ScreenAction::ChoosePhoto);
    screen.pump();
    assert_eq!(screen.state().selected_uri(), "file://a.jpg");
    assert!(screen.state().show_options);

    screen.dispatch(ScreenAction::AddSticker);
    screen.dispatch(ScreenAction::SelectSticker(Sticker::Smile));
    assert_eq!(screen.state().picked_sticker, Some(Sticker::Smile));
    assert!(!screen.state().modal_visible);

    screen.dispatch(ScreenAction::Save);
    assert!(screen.is_saving());
    screen.pump();
    assert!(!screen.is_saving());

    let calls = capture.calls.lock();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].height, 440);
    assert_eq!(calls[0].quality, 1.0);
    assert_eq!(*sink.exported.lock(), vec![(320, 440, 1.0)]);

    let notice = screen.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, SAVE_SUCCEEDED);
}

#[test]
fn test_failed_export_is_reported_and_screen_stays_usable() {
    let sink = FakeSink::failing(SinkKind::MediaStore);
    let (mut screen, _) = screen_with(vec![], sink.clone());
    screen.dispatch(ScreenAction::UseThisPhoto);

    screen.dispatch(ScreenAction::Save);
    screen.pump();

    assert_eq!(screen.notice().unwrap().message, SAVE_FAILED);
    assert!(!screen.is_saving());
    screen.dispatch(ScreenAction::DismissNotice);
    assert!(screen.notice().is_none());

    screen.dispatch(ScreenAction::Reset);
    assert!(!screen.state().show_options);
}

#[test]
fn test_empty_capture_fails_without_export() {
    let sink = FakeSink::new(SinkKind::MediaStore);
    let config = sticker_studio::ScreenConfig {
        capture_height: 0,
        ..common::inline_config()
    };
    let mut screen = sticker_studio::CompositionScreen::new(
        config,
        Box::new(common::ScriptedSource::default()),
        Box::new(sticker_studio::Compositor),
        sink.clone(),
    );

    screen.save();

    assert!(!screen.is_saving());
    assert!(sink.exported.lock().is_empty());
    assert_eq!(screen.notice().unwrap().message, SAVE_FAILED);
}

#[test]
fn test_overlapping_save_is_dropped() {
    let sink = FakeSink::new(SinkKind::MediaStore);
    let (mut screen, capture) = screen_with(vec![], sink.clone());
    let events = Arc::new(Mutex::new(Vec::new()));
    screen.subscribe(Box::new(EventLog(events.clone())));

    screen.save();
    screen.save();
    screen.pump();

    assert_eq!(capture.calls.lock().len(), 1);
    assert_eq!(sink.exported.lock().len(), 1);
    assert!(events.lock().contains(&ScreenEvent::SaveDropped));

    // Once the first save lands, saving works again.
    screen.save();
    screen.pump();
    assert_eq!(sink.exported.lock().len(), 2);
}

#[test]
fn test_permission_requested_once_at_activation() {
    let sink = FakeSink::new(SinkKind::MediaStore);
    let (mut screen, _) = screen_with(vec![], sink.clone());

    screen.activate();
    screen.activate();

    assert_eq!(*sink.permission_requests.lock(), 1);
    assert_eq!(*sink.permission.lock(), Permission::Granted);
}

#[test]
fn test_known_permission_is_not_requested() {
    let sink = FakeSink::new(SinkKind::Download);
    *sink.permission.lock() = Permission::Granted;
    let (mut screen, _) = screen_with(vec![], sink.clone());

    screen.activate();

    assert_eq!(*sink.permission_requests.lock(), 0);
}

#[test]
fn test_events_follow_actions() {
    let sink = FakeSink::new(SinkKind::MediaStore);
    let (mut screen, _) = screen_with(vec![picked("file://b.png")], sink);
    let events = Arc::new(Mutex::new(Vec::new()));
    screen.subscribe(Box::new(EventLog(events.clone())));

    screen.choose_photo();
    screen.pump();
    screen.select_sticker(Sticker::Moon);
    screen.save();
    screen.pump();

    assert_eq!(
        *events.lock(),
        vec![
            ScreenEvent::PickRequested,
            ScreenEvent::ImageSelected {
                uri: "file://b.png".to_owned(),
            },
            ScreenEvent::StickerPicked(Sticker::Moon),
            ScreenEvent::StickerPickerClosed,
            ScreenEvent::SaveStarted,
            ScreenEvent::SaveFinished(SaveResult::Saved {
                location: "memory".to_owned(),
            }),
        ]
    );
}
