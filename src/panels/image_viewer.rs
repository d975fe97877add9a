use eframe::egui;

use crate::background::Background;
use crate::config::ScreenConfig;
use crate::state::ScreenState;
use crate::texture_manager::{TextureKey, TextureManager};

/// Textures are rendered at this multiple of the frame size to stay crisp on high-dpi screens
const TEXTURE_SCALE: u32 = 2;

const FULL_UV: egui::Rect = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

/// Draws the background with the sticker layered on top.
pub fn image_viewer(
    ui: &mut egui::Ui,
    state: &ScreenState,
    config: &ScreenConfig,
    textures: &mut TextureManager,
) {
    let [frame_w, frame_h] = config.frame_size;
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(frame_w as f32, frame_h as f32),
        egui::Sense::hover(),
    );
    if !ui.is_rect_visible(rect) {
        return;
    }

    let ctx = ui.ctx().clone();
    let background = Background::from_selection(state.selected_image.as_ref());
    let (key, selected_id) = match &background {
        Background::Placeholder => (TextureKey::Placeholder, None),
        Background::Selected(image) => (TextureKey::Background(image.id()), Some(image.id())),
    };
    textures.retain_background(selected_id);
    let texture = textures.get_or_create(
        key,
        || background.render(frame_w * TEXTURE_SCALE, frame_h * TEXTURE_SCALE),
        &ctx,
    );

    let painter = ui.painter_at(rect);
    painter.image(texture, rect, FULL_UV, egui::Color32::WHITE);

    if let Some(sticker) = state.picked_sticker {
        let size = config.sticker_size;
        let texture = textures.get_or_create(
            TextureKey::Sticker(sticker, size * TEXTURE_SCALE),
            || sticker.rasterize(size * TEXTURE_SCALE),
            &ctx,
        );
        let offset = egui::vec2(config.sticker_offset[0] as f32, config.sticker_offset[1] as f32);
        let sticker_rect =
            egui::Rect::from_min_size(rect.min + offset, egui::Vec2::splat(size as f32));
        painter.image(texture, sticker_rect, FULL_UV, egui::Color32::WHITE);
    }
}
