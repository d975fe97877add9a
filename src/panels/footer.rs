use eframe::egui;

use crate::state::ScreenAction;

const BUTTON_SIZE: egui::Vec2 = egui::vec2(320.0, 52.0);

/// The initial actions shown before a photo is accepted
pub fn footer(ui: &mut egui::Ui) -> Option<ScreenAction> {
    let mut action = None;

    ui.vertical_centered(|ui| {
        let primary = egui::Button::new(
            egui::RichText::new("🖼 Choose a photo")
                .size(16.0)
                .color(egui::Color32::from_rgb(37, 41, 46)),
        )
        .fill(egui::Color32::WHITE)
        .stroke(egui::Stroke::new(4.0, egui::Color32::from_rgb(255, 211, 61)))
        .rounding(18.0);
        if ui.add_sized(BUTTON_SIZE, primary).clicked() {
            action = Some(ScreenAction::ChoosePhoto);
        }

        ui.add_space(8.0);

        let secondary =
            egui::Button::new(egui::RichText::new("Use this photo").size(16.0)).frame(false);
        if ui.add_sized(BUTTON_SIZE, secondary).clicked() {
            action = Some(ScreenAction::UseThisPhoto);
        }
    });

    action
}
