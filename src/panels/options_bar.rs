use eframe::egui;

use crate::components::{CircleButton, IconButton};
use crate::state::ScreenAction;

/// Reset, add sticker and save, shown once a photo is accepted
pub fn options_bar(ui: &mut egui::Ui, saving: bool) -> Option<ScreenAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        if IconButton::new("🔄", "Reset").show(ui).clicked() {
            action = Some(ScreenAction::Reset);
        }
        ui.add_space(24.0);
        if CircleButton::default().show(ui).clicked() {
            action = Some(ScreenAction::AddSticker);
        }
        ui.add_space(24.0);
        let label = if saving { "Saving…" } else { "Save" };
        if IconButton::new("💾", label).enabled(!saving).show(ui).clicked() {
            action = Some(ScreenAction::Save);
        }
    });

    action
}
