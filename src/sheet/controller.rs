//! Sheet controller: owns the backdrop and list, animates them in and out,
//! and dispatches row selection once the sheet is gone.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use serde::{Deserialize, Deserializer};
use std::{fmt, time::Instant};
use tracing::{debug, info};
use uuid::Uuid;

use super::{
    action::Action,
    animation::{SheetPose, Transition},
    backdrop::Backdrop,
    list::{ActionList, ContentSize},
    surface::{OverlayLayer, SharedHost, SharedSurface, TransitionStyle},
    Overlay, SheetResponse,
};
use crate::config::{SharedConfiguration, SheetConfiguration};

/// Callback fired once the overlay layers are gone
pub type DismissCallback = Box<dyn FnMut()>;

/// Lifecycle of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetState {
    /// Constructed, not yet handed to a host
    Unpresented,
    /// Registered with the host, layers not yet attached
    Loading,
    /// Layers attached, list parked below the surface
    Offscreen,
    AnimatingIn,
    Visible,
    AnimatingOut,
    /// Layers detached; the controller is finished
    Detached,
}

/// Modal action sheet.
///
/// The only way to build one is [`SheetController::new`]. Its backdrop and
/// list attach to the supplied surface rather than to any view of the
/// controller, and stay there from `present` until the dismiss animation
/// completes.
pub struct SheetController {
    id: Uuid,
    actions: Vec<Action>,
    configuration: SharedConfiguration,
    surface: SharedSurface,
    host: Option<SharedHost>,
    state: SheetState,
    backdrop: Option<Backdrop>,
    list: ActionList,
    list_y: f64,
    last_bounds: Option<Rect>,
    transition: Option<Transition>,
    pending_selection: Option<usize>,
    on_dismiss: Option<DismissCallback>,
}

impl SheetController {
    /// Build a sheet for `actions`. An empty list is valid and shows an empty sheet.
    pub fn new(
        actions: Vec<Action>,
        configuration: SharedConfiguration,
        surface: SharedSurface,
    ) -> Self {
        let bounds = surface.borrow().bounds();
        let list = ActionList::new(configuration.clone(), bounds);

        Self {
            id: Uuid::new_v4(),
            actions,
            configuration,
            surface,
            host: None,
            state: SheetState::Unpresented,
            backdrop: None,
            list,
            list_y: f64::from(bounds.bottom()),
            last_bounds: None,
            transition: None,
            pending_selection: None,
            on_dismiss: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SheetState {
        self.state
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn list(&self) -> &ActionList {
        &self.list
    }

    pub fn backdrop(&self) -> Option<&Backdrop> {
        self.backdrop.as_ref()
    }

    /// Current value of the (possibly shared) style configuration
    pub fn configuration(&self) -> SheetConfiguration {
        self.configuration.get()
    }

    /// Write the style configuration; visible to every holder of the same handle
    pub fn set_configuration(&self, configuration: SheetConfiguration) {
        self.configuration.set(configuration);
    }

    pub fn set_on_dismiss<F>(&mut self, callback: F)
    where
        F: FnMut() + 'static,
    {
        self.on_dismiss = Some(Box::new(callback));
    }

    fn has_layers(&self) -> bool {
        matches!(
            self.state,
            SheetState::Offscreen
                | SheetState::AnimatingIn
                | SheetState::Visible
                | SheetState::AnimatingOut
        )
    }

    fn accepts_dismissal(&self) -> bool {
        matches!(
            self.state,
            SheetState::Offscreen | SheetState::AnimatingIn | SheetState::Visible
        )
    }

    /// Hand the sheet to `host` and start the show animation
    pub fn present(&mut self, host: SharedHost, now: Instant) {
        if self.state != SheetState::Unpresented {
            debug!(sheet = %self.id, state = ?self.state, "sheet already presented");
            return;
        }

        info!(sheet = %self.id, actions = self.actions.len(), "presenting action sheet");
        self.state = SheetState::Loading;
        host.borrow_mut().present(self.id, TransitionStyle::CrossDissolve);
        self.host = Some(host);

        self.load_layers();
        self.begin_appearance(now);
    }

    fn load_layers(&mut self) {
        let bounds = self.surface.borrow().bounds();

        self.backdrop = Some(Backdrop::new(bounds));
        {
            let mut surface = self.surface.borrow_mut();
            surface.attach(self.id, OverlayLayer::Backdrop);
            surface.attach(self.id, OverlayLayer::List);
        }

        self.list_y = f64::from(bounds.bottom());
        self.list.set_frame(Rect::new(bounds.x, bounds.bottom(), bounds.width, bounds.height));
        self.state = SheetState::Offscreen;

        self.layout();
    }

    fn begin_appearance(&mut self, now: Instant) {
        let duration = self.configuration.get().animation_duration();
        let from = SheetPose::new(self.list_y, 0.0);
        let to = SheetPose::new(self.resting_y(), 1.0);

        self.transition = Some(Transition::new(from, to, duration, now));
        self.state = SheetState::AnimatingIn;
        debug!(sheet = %self.id, ?duration, target_y = to.list_y, "show animation started");
    }

    /// Origin the list rests at when fully shown
    fn resting_y(&self) -> f64 {
        let bounds = self.surface.borrow().bounds();
        f64::from(bounds.bottom().saturating_sub(self.list.frame().height))
    }

    /// Re-measure the list against the surface and settle the frame
    pub fn layout(&mut self) {
        if !self.has_layers() {
            return;
        }

        let bounds = self.surface.borrow().bounds();
        if let Some(backdrop) = self.backdrop.as_mut() {
            backdrop.set_frame(bounds);
        }

        let bounds_changed = self.last_bounds != Some(bounds);
        self.last_bounds = Some(bounds);

        match self.list.reload(&self.actions, bounds.width) {
            Some(change) => self.content_size_did_change(change.current),
            None if bounds_changed => self.content_size_did_change(self.list.content_size()),
            None => {}
        }
    }

    fn content_size_did_change(&mut self, size: ContentSize) {
        let bounds = self.surface.borrow().bounds();
        let max_height = self.configuration.get().resolved_max_height(bounds.height);

        let (height, scroll_enabled) = if size.height <= max_height {
            (size.height, false)
        } else {
            (max_height, true)
        };
        debug!(
            sheet = %self.id,
            content_height = size.height,
            max_height,
            scroll_enabled,
            "content size changed"
        );

        let frame = self.list.frame();
        self.list.set_frame(Rect::new(bounds.x, frame.y, bounds.width, height));
        self.list.set_scroll_enabled(scroll_enabled);

        let resting_y = self.resting_y();
        match self.state {
            SheetState::AnimatingIn => {
                if let Some(transition) = self.transition.as_mut() {
                    transition.retarget_list(resting_y);
                }
            }
            SheetState::Visible => self.list_y = resting_y,
            SheetState::Offscreen => self.list_y = f64::from(bounds.bottom()),
            SheetState::AnimatingOut => {
                if let Some(transition) = self.transition.as_mut() {
                    transition.retarget_list(f64::from(bounds.bottom()));
                }
            }
            _ => {}
        }
        self.sync_list_origin();
    }

    fn sync_list_origin(&mut self) {
        let frame = self.list.frame();
        let y = self.list_y.round().clamp(0.0, f64::from(u16::MAX)) as u16;
        self.list.set_frame(Rect::new(frame.x, y, frame.width, frame.height));
    }

    fn apply_pose(&mut self, pose: SheetPose) {
        self.list_y = pose.list_y;
        if let Some(backdrop) = self.backdrop.as_mut() {
            backdrop.set_opacity(pose.backdrop_opacity);
        }
        self.sync_list_origin();
    }

    fn current_pose(&self) -> SheetPose {
        let opacity = self.backdrop.as_ref().map_or(0.0, Backdrop::opacity);
        SheetPose::new(self.list_y, opacity)
    }

    /// Start the dismiss animation; `false` when a dismissal is already underway
    fn begin_dismissal(&mut self, selection: Option<usize>, now: Instant) -> bool {
        if !self.accepts_dismissal() {
            debug!(sheet = %self.id, state = ?self.state, "ignoring dismissal request");
            return false;
        }

        let bounds = self.surface.borrow().bounds();
        let duration = self.configuration.get().animation_duration();
        let from = self.current_pose();
        let to = SheetPose::new(f64::from(bounds.bottom()), 0.0);

        self.pending_selection = selection;
        self.transition = Some(Transition::new(from, to, duration, now));
        self.state = SheetState::AnimatingOut;
        debug!(sheet = %self.id, ?selection, "dismiss animation started");
        true
    }

    fn finish_dismissal(&mut self) {
        self.state = SheetState::Detached;
        {
            let mut surface = self.surface.borrow_mut();
            surface.detach(self.id, OverlayLayer::List);
            surface.detach(self.id, OverlayLayer::Backdrop);
        }
        self.backdrop = None;
        info!(sheet = %self.id, "action sheet dismissed");

        if let Some(mut on_dismiss) = self.on_dismiss.take() {
            on_dismiss();
        }

        if let Some(host) = self.host.take() {
            host.borrow_mut().dismiss(self.id, true);
        }

        if let Some(index) = self.pending_selection.take() {
            if let Some(action) = self.actions.get(index).cloned() {
                debug!(sheet = %self.id, index, title = action.title(), "running action handler");
                action.invoke_handler();
            }
        }
    }

    /// Dismiss without running any handler
    pub fn dismiss(&mut self, now: Instant) -> bool {
        self.begin_dismissal(None, now)
    }

    /// Backdrop tap: dismiss without running any handler
    pub fn tap_backdrop(&mut self, now: Instant) -> bool {
        debug!(sheet = %self.id, "backdrop tapped");
        self.dismiss(now)
    }

    /// Row tap: deselect the row, dismiss, and run its handler once the
    /// dismiss animation completes
    pub fn select_row(&mut self, index: usize, now: Instant) -> bool {
        if index >= self.actions.len() {
            return false;
        }

        self.list.select(index);
        self.list.deselect(index);
        self.begin_dismissal(Some(index), now)
    }

    fn highlight_style(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }
}

impl Overlay for SheetController {
    fn render(&mut self, buf: &mut Buffer) {
        if !self.has_layers() {
            return;
        }

        let configuration = self.configuration.get();
        if let Some(backdrop) = &self.backdrop {
            backdrop.render(
                configuration.dim_background_color,
                configuration.dim_background_alpha,
                buf,
            );
        }

        let highlight = self.highlight_style();
        self.list.render(&self.actions, buf, highlight);
    }

    fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> SheetResponse {
        if !self.accepts_dismissal() || key.kind == KeyEventKind::Release {
            return SheetResponse::None;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.list.move_cursor_up();
                SheetResponse::Handled
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.list.move_cursor_down();
                SheetResponse::Handled
            }
            KeyCode::PageUp => {
                self.list.scroll_by(-i32::from(self.list.frame().height));
                SheetResponse::Handled
            }
            KeyCode::PageDown => {
                self.list.scroll_by(i32::from(self.list.frame().height));
                SheetResponse::Handled
            }
            KeyCode::Enter => match self.list.cursor() {
                Some(index) if self.select_row(index, now) => SheetResponse::Selected(index),
                _ => SheetResponse::None,
            },
            KeyCode::Esc | KeyCode::Char('q') => {
                self.tap_backdrop(now);
                SheetResponse::Dismissed
            }
            _ => SheetResponse::None,
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent, now: Instant) -> SheetResponse {
        if !self.accepts_dismissal() {
            return SheetResponse::None;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.list.row_at(mouse.column, mouse.row) {
                    self.select_row(index, now);
                    return SheetResponse::Selected(index);
                }
                let on_list = super::backdrop::contains(self.list.frame(), mouse.column, mouse.row);
                let on_backdrop = self
                    .backdrop
                    .as_ref()
                    .map_or(false, |backdrop| backdrop.contains(mouse.column, mouse.row));
                if on_backdrop && !on_list {
                    self.tap_backdrop(now);
                    return SheetResponse::Dismissed;
                }
                SheetResponse::None
            }
            MouseEventKind::ScrollUp if self.list.scroll_by(-1) => SheetResponse::Handled,
            MouseEventKind::ScrollDown if self.list.scroll_by(1) => SheetResponse::Handled,
            _ => SheetResponse::None,
        }
    }

    fn tick(&mut self, now: Instant) {
        let (pose, complete) = match &self.transition {
            Some(transition) => (transition.pose_at(now), transition.is_complete(now)),
            None => return,
        };

        self.apply_pose(pose);
        if !complete {
            return;
        }

        self.transition = None;
        match self.state {
            SheetState::AnimatingIn => {
                self.state = SheetState::Visible;
                debug!(sheet = %self.id, "action sheet visible");
            }
            SheetState::AnimatingOut => self.finish_dismissal(),
            _ => {}
        }
    }

    fn layout(&mut self) {
        SheetController::layout(self);
    }

    fn is_open(&self) -> bool {
        self.state != SheetState::Detached
    }
}

impl fmt::Debug for SheetController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetController")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("actions", &self.actions)
            .field("list_frame", &self.list.frame())
            .finish()
    }
}

/// Restoring a sheet from serialized data is not a supported way to build one.
///
/// # Panics
///
/// Always. A sheet holds live callbacks and a surface handle; use
/// [`SheetController::new`].
impl<'de> Deserialize<'de> for SheetController {
    fn deserialize<D: Deserializer<'de>>(_deserializer: D) -> Result<Self, D::Error> {
        panic!("SheetController cannot be restored from serialized data; use SheetController::new")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::surface::{MockPresentationHost, OverlaySurface};
    use mockall::{predicate::eq, Sequence};
    use std::{cell::RefCell, rc::Rc, time::Duration};

    fn sheet_on(bounds: Rect, actions: Vec<Action>) -> SheetController {
        let surface: SharedSurface = Rc::new(RefCell::new(OverlaySurface::new(bounds)));
        SheetController::new(
            actions,
            SharedConfiguration::new(SheetConfiguration::default()),
            surface,
        )
    }

    #[test]
    fn test_host_sees_present_then_one_dismiss() {
        let mut sheet = sheet_on(Rect::new(0, 0, 40, 12), vec![Action::new("Only")]);
        let id = sheet.id();

        let mut host = MockPresentationHost::new();
        let mut sequence = Sequence::new();
        host.expect_present()
            .with(eq(id), eq(TransitionStyle::CrossDissolve))
            .times(1)
            .in_sequence(&mut sequence)
            .return_const(());
        host.expect_dismiss()
            .with(eq(id), eq(true))
            .times(1)
            .in_sequence(&mut sequence)
            .return_const(());
        let host: SharedHost = Rc::new(RefCell::new(host));

        let start = Instant::now();
        sheet.present(host, start);
        assert_eq!(sheet.state(), SheetState::AnimatingIn);

        sheet.tick(start + Duration::from_millis(250));
        assert!(sheet.select_row(0, start + Duration::from_millis(300)));
        assert!(!sheet.dismiss(start + Duration::from_millis(310)));
        sheet.tick(start + Duration::from_millis(600));

        assert_eq!(sheet.state(), SheetState::Detached);
    }

    #[test]
    fn test_dismiss_before_present_is_ignored() {
        let mut sheet = sheet_on(Rect::new(0, 0, 40, 12), Vec::new());
        assert!(!sheet.dismiss(Instant::now()));
        assert!(!sheet.select_row(0, Instant::now()));
        assert_eq!(sheet.state(), SheetState::Unpresented);
    }

    #[test]
    fn test_out_of_range_selection_is_ignored() {
        let mut sheet = sheet_on(Rect::new(0, 0, 40, 12), vec![Action::new("A")]);
        let host: SharedHost = Rc::new(RefCell::new(crate::sheet::ModalStack::new()));
        let now = Instant::now();
        sheet.present(host, now);

        assert!(!sheet.select_row(3, now));
        assert_eq!(sheet.state(), SheetState::AnimatingIn);
    }

    #[test]
    fn test_keyboard_drives_cursor_and_selection() {
        use crossterm::event::KeyModifiers;

        let mut sheet = sheet_on(
            Rect::new(0, 0, 40, 12),
            vec![Action::new("A"), Action::new("B")],
        );
        let host: SharedHost = Rc::new(RefCell::new(crate::sheet::ModalStack::new()));
        let now = Instant::now();
        sheet.present(host, now);
        let now = now + Duration::from_millis(250);
        sheet.tick(now);

        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(sheet.handle_key_event(key(KeyCode::Enter), now), SheetResponse::None);
        assert_eq!(sheet.handle_key_event(key(KeyCode::Down), now), SheetResponse::Handled);
        assert_eq!(sheet.handle_key_event(key(KeyCode::Down), now), SheetResponse::Handled);
        assert_eq!(sheet.list().cursor(), Some(1));
        assert_eq!(sheet.handle_key_event(key(KeyCode::Enter), now), SheetResponse::Selected(1));
        assert_eq!(sheet.handle_key_event(key(KeyCode::Esc), now), SheetResponse::None);
    }
}
