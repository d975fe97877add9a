use eframe::egui;

use crate::config::ScreenConfig;
use crate::state::{ScreenAction, ScreenState};
use crate::texture_manager::TextureManager;

use super::{footer, image_viewer, options_bar};

pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(37, 41, 46);

/// The whole screen: image on top, footer or options bar below
pub fn composition_panel(
    ctx: &egui::Context,
    state: &ScreenState,
    config: &ScreenConfig,
    textures: &mut TextureManager,
    saving: bool,
) -> Option<ScreenAction> {
    let mut action = None;

    egui::CentralPanel::default()
        .frame(egui::Frame::default().fill(BACKGROUND))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(58.0);
                image_viewer(ui, state, config, textures);
                ui.add_space(32.0);

                action = if state.show_options {
                    options_bar(ui, saving)
                } else {
                    footer(ui)
                };
            });
        });

    action
}
