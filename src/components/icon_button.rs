use eframe::egui;

/// A glyph over a small caption, as used in the options bar
pub struct IconButton {
    pub icon: &'static str,
    pub label: &'static str,
    pub enabled: bool,
}

impl IconButton {
    pub fn new(icon: &'static str, label: &'static str) -> Self {
        Self {
            icon,
            label,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let size = egui::vec2(64.0, 56.0);
        let sense = if self.enabled { egui::Sense::click() } else { egui::Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(size, sense);

        if ui.is_rect_visible(rect) {
            let color = if !self.enabled {
                egui::Color32::from_gray(110)
            } else if response.hovered() {
                egui::Color32::from_rgb(255, 211, 61)
            } else {
                egui::Color32::WHITE
            };

            ui.painter().text(
                rect.center_top() + egui::vec2(0.0, 18.0),
                egui::Align2::CENTER_CENTER,
                self.icon,
                egui::FontId::proportional(24.0),
                color,
            );
            ui.painter().text(
                rect.center_bottom() - egui::vec2(0.0, 10.0),
                egui::Align2::CENTER_CENTER,
                self.label,
                egui::FontId::proportional(13.0),
                color,
            );
        }

        response
    }
}
