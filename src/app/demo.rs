//! Non-interactive walkthrough of one sheet presentation
//!
//! Runs the whole lifecycle against an in-memory surface and host, with a
//! simulated clock, and reports what a user would have seen.

use ratatui::layout::Rect;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::{Duration, Instant},
};
use tracing::info;

use crate::{
    config::{SharedConfiguration, SheetConfiguration},
    sheet::{
        Action, ModalStack, Overlay, OverlaySurface, SharedHost, SharedSurface, SheetController,
        SheetState,
    },
};

/// Simulated frame interval
const FRAME: Duration = Duration::from_millis(16);

/// Outcome of [`run_headless_demo`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    /// Titles whose handlers ran, in order
    pub chosen: Vec<String>,
    /// Times the dismiss callback fired
    pub dismiss_count: usize,
    /// List frame once the sheet settled
    pub resting_frame: Rect,
    pub scroll_enabled: bool,
    /// Overlay layers left on the surface at the end
    pub layers_after: usize,
    /// Simulated frames until the sheet was gone
    pub frames: usize,
}

/// Present a sheet on a `bounds`-sized surface, pick row `pick`, and run
/// until the sheet is detached
pub fn run_headless_demo(configuration: SheetConfiguration, bounds: Rect, pick: usize) -> DemoReport {
    let chosen = Rc::new(RefCell::new(Vec::new()));
    let actions: Vec<Action> = [("📷", "Camera"), ("🖼", "Library"), ("📁", "Files")]
        .into_iter()
        .map(|(icon, title)| {
            let chosen = chosen.clone();
            Action::new(title)
                .with_icon(icon)
                .with_handler(move || chosen.borrow_mut().push(title.to_string()))
        })
        .chain(std::iter::once(Action::new("Cancel")))
        .collect();

    let surface = Rc::new(RefCell::new(OverlaySurface::new(bounds)));
    let host = Rc::new(RefCell::new(ModalStack::new()));
    let shared_surface: SharedSurface = surface.clone();
    let shared_host: SharedHost = host.clone();

    let mut sheet = SheetController::new(
        actions,
        SharedConfiguration::new(configuration),
        shared_surface,
    );
    let dismiss_count = Rc::new(Cell::new(0));
    let counter = dismiss_count.clone();
    sheet.set_on_dismiss(move || counter.set(counter.get() + 1));

    let mut now = Instant::now();
    let mut frames = 0;
    sheet.present(shared_host, now);

    while sheet.state() != SheetState::Visible {
        now += FRAME;
        frames += 1;
        sheet.tick(now);
    }
    let resting_frame = sheet.list().frame();
    let scroll_enabled = sheet.list().scroll_enabled();
    info!(?resting_frame, scroll_enabled, "sheet settled");

    if !sheet.select_row(pick, now) {
        sheet.tap_backdrop(now);
    }
    while sheet.is_open() {
        now += FRAME;
        frames += 1;
        sheet.tick(now);
    }

    let chosen = chosen.borrow().clone();
    let layers_after = surface.borrow().layers().len();
    info!(?chosen, frames, "sheet detached");

    DemoReport {
        chosen,
        dismiss_count: dismiss_count.get(),
        resting_frame,
        scroll_enabled,
        layers_after,
        frames,
    }
}
