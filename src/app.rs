use std::time::Duration;

use crate::config::ScreenConfig;
use crate::event::LogEventHandler;
use crate::panels::{composition_panel, notice_window, sticker_picker};
use crate::screen::CompositionScreen;
use crate::texture_manager::TextureManager;

/// Room for the background, the overlay and the sticker sheet thumbnails
const TEXTURE_CACHE_SIZE: usize = 32;

pub struct StickerApp {
    screen: CompositionScreen,
    textures: TextureManager,
}

impl StickerApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load previous app state (if any).
        let config: ScreenConfig = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        Self::with_screen(CompositionScreen::for_platform(config.with_env_overrides()))
    }

    pub fn with_screen(screen: CompositionScreen) -> Self {
        screen.subscribe(Box::new(LogEventHandler));
        Self {
            screen,
            textures: TextureManager::new(TEXTURE_CACHE_SIZE),
        }
    }
}

impl eframe::App for StickerApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.screen.config());
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Don't cut off an export that is still being written.
        self.screen.finish_pending_save();
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.screen.activate();
        self.screen.pump();
        self.textures.begin_frame();

        let mut actions = Vec::new();

        actions.extend(composition_panel(
            ctx,
            self.screen.state(),
            self.screen.config(),
            &mut self.textures,
            self.screen.is_saving(),
        ));

        if self.screen.state().modal_visible {
            actions.extend(sticker_picker(ctx, &mut self.textures));
        }

        // A notice blocks everything behind it.
        if self.screen.notice().is_some() {
            actions.clear();
        }

        self.screen.source_mut().show(ctx);

        if let Some(notice) = self.screen.notice() {
            actions.extend(notice_window(ctx, notice));
        }

        for action in actions {
            log::debug!("Dispatching {:?}", action);
            self.screen.dispatch(action);
        }

        // Results arrive off the UI thread; keep polling until they land.
        if self.screen.is_saving() || self.screen.is_picking() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}
