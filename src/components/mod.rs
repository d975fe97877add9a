mod circle_button;
mod icon_button;

pub use circle_button::CircleButton;
pub use icon_button::IconButton;
