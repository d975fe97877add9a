use crate::background::SelectedImage;
use crate::sticker::Sticker;

/// Everything the composition screen shows. Discarded when the screen goes away.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenState {
    /// User's chosen background; the placeholder shows when empty
    pub selected_image: Option<SelectedImage>,
    /// Toolbar (reset / add sticker / save) instead of the initial footer
    pub show_options: bool,
    /// Sticker picker overlay
    pub modal_visible: bool,
    /// Applied sticker. Survives reset.
    pub picked_sticker: Option<Sticker>,
}

impl ScreenState {
    /// Uri of the selected image, empty when nothing is selected
    pub fn selected_uri(&self) -> &str {
        self.selected_image.as_ref().map(SelectedImage::uri).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// A blocking message the user has to acknowledge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// What views ask the screen to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    ChoosePhoto,
    UseThisPhoto,
    Reset,
    AddSticker,
    CloseStickerPicker,
    SelectSticker(Sticker),
    Save,
    DismissNotice,
}
