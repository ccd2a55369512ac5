//! # Toggles
//!
//! Open/closed state shared by dialogs, focus and hover tracking, with an
//! optional listener called on every actual change.

type Listener = Box<dyn FnMut(bool) + Send + Sync>;

#[derive(Default)]
pub struct Toggle {
    on: bool,
    listener: Option<Listener>,
}

/// Dialog visibility
pub type Modal = Toggle;
/// Input focus
pub type Focus = Toggle;
/// Pointer hover
pub type Hover = Toggle;

impl std::fmt::Debug for Toggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toggle")
            .field("on", &self.on)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl Toggle {
    pub fn new(on: bool) -> Self {
        Self { on, listener: None }
    }

    /// Attach a listener receiving the new state after each change.
    pub fn with_listener(mut self, listener: impl FnMut(bool) + Send + Sync + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn is_open(&self) -> bool {
        self.on
    }

    pub fn open(&mut self) {
        self.set(true);
    }

    pub fn close(&mut self) {
        self.set(false);
    }

    pub fn toggle(&mut self) {
        self.set(!self.on);
    }

    fn set(&mut self, on: bool) {
        if self.on == on {
            return;
        }
        self.on = on;
        if let Some(listener) = self.listener.as_mut() {
            listener(on);
        }
    }
}
