use eframe::egui;

use crate::state::{Notice, NoticeKind, ScreenAction};

/// Blocking alert; everything behind it is dimmed until OK is pressed
pub fn notice_window(ctx: &egui::Context, notice: &Notice) -> Option<ScreenAction> {
    let mut action = None;

    let screen = ctx.screen_rect();
    ctx.layer_painter(egui::LayerId::new(egui::Order::Middle, egui::Id::new("notice_dim")))
        .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(140));

    let (title, color) = match notice.kind {
        NoticeKind::Info => ("Notice", egui::Color32::LIGHT_BLUE),
        NoticeKind::Success => ("Saved", egui::Color32::LIGHT_GREEN),
        NoticeKind::Error => ("Error", egui::Color32::LIGHT_RED),
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(&notice.message).color(color));
            ui.add_space(8.0);
            if ui.button("OK").clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                action = Some(ScreenAction::DismissNotice);
            }
        });

    action
}
