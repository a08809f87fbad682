//! Action sheet widget
//!
//! A bottom-anchored list of actions presented over a dimmed backdrop.
//! Picking a row or tapping the backdrop animates the sheet away; a picked
//! row's handler runs only after the sheet has left the surface.

pub mod action;
pub mod animation;
pub mod backdrop;
pub mod controller;
pub mod list;
pub mod row;
pub mod surface;

pub use action::{Action, Handler, Icon};
pub use backdrop::Backdrop;
pub use controller::{SheetController, SheetState};
pub use list::{ActionList, ContentSize, ContentSizeChanged};
pub use row::{ActionRow, LineMode};
pub use surface::{
    ModalStack, OverlayLayer, OverlaySurface, PresentationHost, SharedHost, SharedSurface,
    Surface, TransitionStyle,
};

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::buffer::Buffer;
use std::time::Instant;

/// Trait for overlays drawn above the host screen
pub trait Overlay {
    /// Draw onto the host's buffer, after the host screen itself
    fn render(&mut self, buf: &mut Buffer);

    /// Handle key events
    fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> SheetResponse;

    /// Handle mouse events
    fn handle_mouse_event(&mut self, mouse: MouseEvent, now: Instant) -> SheetResponse;

    /// Advance running animations and fire their completions
    fn tick(&mut self, now: Instant);

    /// Re-measure against the current surface bounds
    fn layout(&mut self);

    /// Whether the overlay still occupies the surface
    fn is_open(&self) -> bool;
}

/// Result of feeding input to an overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetResponse {
    /// Input not consumed
    None,
    /// Consumed without changing the outcome (cursor, scroll)
    Handled,
    /// Row picked; its handler runs once the sheet is gone
    Selected(usize),
    /// Dismissal without a pick
    Dismissed,
}
