use eframe::egui;

/// The round "add sticker" button in the middle of the options bar
pub struct CircleButton {
    pub diameter: f32,
}

impl Default for CircleButton {
    fn default() -> Self {
        Self { diameter: 84.0 }
    }
}

impl CircleButton {
    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) =
            ui.allocate_exact_size(egui::Vec2::splat(self.diameter), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let radius = self.diameter / 2.0;
            let ring = egui::Color32::from_rgb(255, 211, 61);
            let fill = if response.hovered() {
                egui::Color32::from_gray(235)
            } else {
                egui::Color32::WHITE
            };

            ui.painter().circle_stroke(rect.center(), radius - 2.0, egui::Stroke::new(4.0, ring));
            ui.painter().circle_filled(rect.center(), radius - 8.0, fill);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "+",
                egui::FontId::proportional(radius * 0.8),
                egui::Color32::from_rgb(37, 41, 46),
            );
        }

        response.on_hover_text("Add sticker")
    }
}
