//! Focus and click hooks attached to a block.
//!
//! Each block accepts one focus listener and one click listener. Registering a
//! listener replaces the previous one.

use std::fmt;

/// Called when a block gains (`true`) or loses (`false`) focus. Returns whether
/// the event was handled.
pub type FocusListener = Box<dyn FnMut(bool) -> bool>;

/// Called when a block is clicked. Returns whether the click was consumed.
pub type ClickListener = Box<dyn FnMut() -> bool>;

/// Listener registry for one block.
#[derive(Default)]
pub struct Interaction {
    focus_listener: Option<FocusListener>,
    click_listener: Option<ClickListener>,
}

impl fmt::Debug for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interaction")
            .field("focus_listener", &self.focus_listener.is_some())
            .field("click_listener", &self.click_listener.is_some())
            .finish()
    }
}

impl Interaction {
    /// Creates a registry with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the focus listener, replacing any previous one.
    pub fn set_focus_listener(&mut self, listener: impl FnMut(bool) -> bool + 'static) {
        self.focus_listener = Some(Box::new(listener));
    }

    /// Removes the focus listener.
    pub fn clear_focus_listener(&mut self) {
        self.focus_listener = None;
    }

    /// Whether a focus listener is registered.
    pub fn has_focus_listener(&self) -> bool {
        self.focus_listener.is_some()
    }

    /// Registers the click listener, replacing any previous one.
    pub fn set_click_listener(&mut self, listener: impl FnMut() -> bool + 'static) {
        self.click_listener = Some(Box::new(listener));
    }

    /// Removes the click listener.
    pub fn clear_click_listener(&mut self) {
        self.click_listener = None;
    }

    /// Whether a click listener is registered.
    pub fn has_click_listener(&self) -> bool {
        self.click_listener.is_some()
    }

    /// Delivers a focus change. Returns `None` when no listener is registered.
    pub fn focus(&mut self, focused: bool) -> Option<bool> {
        self.focus_listener.as_mut().map(|listener| listener(focused))
    }

    /// Delivers a click. Returns `false` when no listener is registered.
    pub fn click(&mut self) -> bool {
        match self.click_listener.as_mut() {
            Some(listener) => listener(),
            None => false,
        }
    }
}
