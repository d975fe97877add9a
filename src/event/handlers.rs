use crate::event::{EventHandler, SaveResult, ScreenEvent};

/// Writes every screen event to the log
#[derive(Debug, Default)]
pub struct LogEventHandler;

impl EventHandler for LogEventHandler {
    fn handle_event(&mut self, event: &ScreenEvent) {
        match event {
            ScreenEvent::PickFailed { reason } => log::warn!("Pick failed: {}", reason),
            ScreenEvent::SaveFinished(SaveResult::Failed { reason }) => {
                log::error!("Save failed: {}", reason)
            }
            ScreenEvent::SaveDropped => log::debug!("Save already in flight, request dropped"),
            other => log::info!("{:?}", other),
        }
    }
}
