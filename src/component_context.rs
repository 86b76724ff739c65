//! Shared component rendering context
//!
//! `ComponentContext` carries what a component needs to know about where it
//! is being drawn: focus, which window owns it and whether the terminal takes
//! 24-bit colour.

use crate::window::WindowId;

#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    focused: bool,
    truecolor: bool,
    window: Option<WindowId>,
}

impl ComponentContext {
    pub const fn new(focused: bool) -> Self {
        Self {
            focused,
            truecolor: true,
            window: None,
        }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn truecolor(&self) -> bool {
        self.truecolor
    }

    /// Window the component is drawn inside, if any.
    pub const fn window(&self) -> Option<WindowId> {
        self.window
    }

    pub const fn with_truecolor(mut self, truecolor: bool) -> Self {
        self.truecolor = truecolor;
        self
    }

    pub const fn with_window(mut self, window: WindowId) -> Self {
        self.window = Some(window);
        self
    }
}

impl Default for ComponentContext {
    fn default() -> Self {
        Self::new(false)
    }
}
