use crate::sticker::Sticker;

/// Broadcast after the screen changes something the user can see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    ActivationFinished { permission_granted: bool },
    PickRequested,
    PickCancelled,
    PickFailed { reason: String },
    ImageSelected { uri: String },
    OptionsShown,
    Reset,
    StickerPickerOpened,
    StickerPickerClosed,
    StickerPicked(Sticker),
    SaveStarted,
    SaveDropped,
    SaveFinished(SaveResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveResult {
    Saved { location: String },
    Failed { reason: String },
}
