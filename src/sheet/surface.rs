//! Host-side collaborators of a sheet: the drawable surface its overlay
//! layers attach to, and the presentation host that tracks modal sheets.

use ratatui::layout::Rect;
use std::{cell::RefCell, rc::Rc};
use tracing::debug;
use uuid::Uuid;

/// Overlay layers a sheet puts on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayLayer {
    Backdrop,
    List,
}

/// How the host transitions a sheet in and out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStyle {
    /// Fade in place, leaving the sheet's own layers to animate
    CrossDissolve,
}

/// Top-level drawable area of the host application
pub trait Surface {
    /// Area overlays are sized against
    fn bounds(&self) -> Rect;

    fn attach(&mut self, owner: Uuid, layer: OverlayLayer);

    fn detach(&mut self, owner: Uuid, layer: OverlayLayer);

    fn is_attached(&self, owner: Uuid, layer: OverlayLayer) -> bool;
}

/// Modal presentation mechanism of the host application
#[cfg_attr(test, mockall::automock)]
pub trait PresentationHost {
    fn present(&mut self, sheet: Uuid, style: TransitionStyle);

    fn dismiss(&mut self, sheet: Uuid, animated: bool);
}

pub type SharedSurface = Rc<RefCell<dyn Surface>>;
pub type SharedHost = Rc<RefCell<dyn PresentationHost>>;

/// In-process surface: records attached layers in insertion order
#[derive(Debug, Clone)]
pub struct OverlaySurface {
    bounds: Rect,
    layers: Vec<(Uuid, OverlayLayer)>,
}

impl OverlaySurface {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            layers: Vec::new(),
        }
    }

    /// Follow a terminal resize
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Attached layers, bottom first
    pub fn layers(&self) -> &[(Uuid, OverlayLayer)] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Surface for OverlaySurface {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn attach(&mut self, owner: Uuid, layer: OverlayLayer) {
        if !self.is_attached(owner, layer) {
            debug!(%owner, ?layer, "attaching overlay layer");
            self.layers.push((owner, layer));
        }
    }

    fn detach(&mut self, owner: Uuid, layer: OverlayLayer) {
        debug!(%owner, ?layer, "detaching overlay layer");
        self.layers.retain(|entry| *entry != (owner, layer));
    }

    fn is_attached(&self, owner: Uuid, layer: OverlayLayer) -> bool {
        self.layers.contains(&(owner, layer))
    }
}

/// In-process presentation host: a stack of presented sheets
#[derive(Debug, Clone, Default)]
pub struct ModalStack {
    presented: Vec<(Uuid, TransitionStyle)>,
    dismissed: Vec<Uuid>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheet on top of the stack
    pub fn top(&self) -> Option<Uuid> {
        self.presented.last().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.presented.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presented.is_empty()
    }

    /// Sheets dismissed so far, oldest first
    pub fn dismissed(&self) -> &[Uuid] {
        &self.dismissed
    }
}

impl PresentationHost for ModalStack {
    fn present(&mut self, sheet: Uuid, style: TransitionStyle) {
        debug!(%sheet, ?style, "presenting sheet");
        self.presented.push((sheet, style));
    }

    fn dismiss(&mut self, sheet: Uuid, animated: bool) {
        debug!(%sheet, animated, "dismissing sheet");
        self.presented.retain(|(id, _)| *id != sheet);
        self.dismissed.push(sheet);
    }
}
