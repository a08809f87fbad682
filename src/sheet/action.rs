//! Action data shown as one row of the sheet

use std::{fmt, rc::Rc};

/// Zero-argument callback run after the sheet has been dismissed
pub type Handler = Rc<dyn Fn()>;

/// Glyph shown in a row's icon box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon(String);

impl Icon {
    pub fn new<S: Into<String>>(glyph: S) -> Self {
        Self(glyph.into())
    }

    pub fn glyph(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Icon {
    fn from(glyph: &str) -> Self {
        Self::new(glyph)
    }
}

/// One selectable entry: optional icon, title, optional handler.
///
/// Built once with the `with_*` methods and never changed afterwards.
#[derive(Clone)]
pub struct Action {
    icon: Option<Icon>,
    title: String,
    handler: Option<Handler>,
}

impl Action {
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            icon: None,
            title: title.into(),
            handler: None,
        }
    }

    pub fn with_icon<I: Into<Icon>>(mut self, icon: I) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.handler = Some(Rc::new(handler));
        self
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Run the handler if there is one; returns whether it ran
    pub(crate) fn invoke_handler(&self) -> bool {
        match &self.handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("icon", &self.icon)
            .field("title", &self.title)
            .field("handler", &self.handler.as_ref().map(|_| "Fn()"))
            .finish()
    }
}
