use eframe::egui;

use crate::state::ScreenAction;
use crate::sticker::Sticker;
use crate::texture_manager::{TextureKey, TextureManager};

const THUMBNAIL: u32 = 100;

/// The sticker sheet that slides up from the bottom
pub fn sticker_picker(ctx: &egui::Context, textures: &mut TextureManager) -> Option<ScreenAction> {
    let mut action = None;

    egui::Window::new("sticker_picker")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_BOTTOM, egui::Vec2::ZERO)
        .fixed_size(egui::vec2(ctx.screen_rect().width().min(720.0), 160.0))
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(egui::Color32::from_rgb(37, 41, 46))
                .rounding(egui::Rounding {
                    nw: 18.0,
                    ne: 18.0,
                    sw: 0.0,
                    se: 0.0,
                }),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("Choose a sticker")
                        .color(egui::Color32::WHITE)
                        .size(16.0),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("❌").on_hover_text("Close").clicked() {
                        action = Some(ScreenAction::CloseStickerPicker);
                    }
                });
            });
            ui.separator();

            egui::ScrollArea::horizontal().show(ui, |ui| {
                ui.horizontal(|ui| {
                    for sticker in Sticker::ALL {
                        let texture = textures.get_or_create(
                            TextureKey::Sticker(sticker, THUMBNAIL),
                            || sticker.rasterize(THUMBNAIL),
                            ctx,
                        );
                        let image = egui::Image::from_texture((texture, egui::Vec2::splat(80.0)));
                        let response = ui
                            .add(egui::ImageButton::new(image).frame(false))
                            .on_hover_text(sticker.name());
                        if response.clicked() {
                            log::info!("Sticker selected from UI: {}", sticker.name());
                            action = Some(ScreenAction::SelectSticker(sticker));
                        }
                    }
                });
            });
        });

    action
}
