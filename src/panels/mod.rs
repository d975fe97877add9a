mod composition_panel;
mod footer;
mod image_viewer;
mod notice;
mod options_bar;
mod sticker_picker;

pub use composition_panel::composition_panel;
pub use footer::footer;
pub use image_viewer::image_viewer;
pub use notice::notice_window;
pub use options_bar::options_bar;
pub use sticker_picker::sticker_picker;
