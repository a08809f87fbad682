//! Application event system
//!
//! Sheet handlers and dismiss callbacks run inside the sheet controller, so
//! they cannot touch the application directly. They post events here and the
//! main loop drains them after each tick.

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Event handler backed by an unbounded tokio channel
pub struct EventHandler {
    /// Sender for application events
    event_sender: mpsc::UnboundedSender<AppEvent>,
    /// Receiver for application events
    event_receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        let (event_sender, event_receiver) = mpsc::unbounded_channel();

        Self {
            event_sender,
            event_receiver,
        }
    }

    /// Send an event to the application
    pub fn send_event(&self, event: AppEvent) -> AppResult<()> {
        self.event_sender
            .send(event)
            .map_err(|_| AppError::state("Failed to send application event"))?;
        Ok(())
    }

    /// Try to receive an event (non-blocking)
    pub fn try_receive_event(&mut self) -> Option<AppEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Get a cloned sender for sheet callbacks
    pub fn get_sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_sender.clone()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Sheets the demo host knows how to open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    /// Photo source picker
    Attach,
    /// Secondary sheet opened from inside a handler
    Share,
}

/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// An action's handler ran
    ActionChosen { title: String },

    /// A sheet finished its dismissal
    SheetDismissed { sheet: Uuid },

    /// A handler asked for another sheet
    OpenSheet(SheetKind),

    /// Quit the application
    Shutdown,
}
