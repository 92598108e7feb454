//! Event Registry
//!
//! Explicit `(control, event kind) -> handler` table. DOM listeners forward into
//! [`EventRegistry::dispatch`]; tests call it directly with fake gestures.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::RegistryError;

/// Stable name of a bound control
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlId(String);

impl ControlId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Key for the `index`th element a feature binds. The element's DOM id, when it
    /// has one, is only a readable suffix: pages repeat ids across cards.
    pub fn scoped(prefix: &str, index: usize, dom_id: Option<&str>) -> Self {
        match dom_id.filter(|id| !id.is_empty()) {
            Some(id) => Self(format!("{prefix}-{index}#{id}")),
            None => Self(format!("{prefix}-{index}")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ControlId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
    Input,
    Submit,
    KeyUp,
}

impl EventKind {
    /// DOM event type name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Change => "change",
            EventKind::Input => "input",
            EventKind::Submit => "submit",
            EventKind::KeyUp => "keyup",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user gesture delivered to a handler. Handlers that take over the browser's
/// default action (navigation, form post) say so with [`Gesture::prevent_default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gesture {
    pub kind: EventKind,
    default_prevented: Cell<bool>,
}

impl Gesture {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            default_prevented: Cell::new(false),
        }
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

pub type Handler = Rc<dyn Fn(&Gesture)>;

/// Single-threaded handler table shared between page setup and DOM listeners
#[derive(Default)]
pub struct EventRegistry {
    handlers: RefCell<HashMap<(ControlId, EventKind), Handler>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `(control, kind)`. A control takes exactly one handler per kind.
    pub fn register<F>(&self, control: ControlId, kind: EventKind, handler: F) -> Result<(), RegistryError>
    where
        F: Fn(&Gesture) + 'static,
    {
        let mut handlers = self.handlers.borrow_mut();
        let key = (control, kind);
        if handlers.contains_key(&key) {
            return Err(RegistryError::AlreadyBound {
                control: key.0,
                kind,
            });
        }
        handlers.insert(key, Rc::new(handler));
        Ok(())
    }

    /// Run the handler bound to `control` for this gesture. Returns `false` when nothing is bound.
    pub fn dispatch(&self, control: &ControlId, gesture: &Gesture) -> bool {
        // Release the table before calling out; handlers may register or dispatch.
        let handler = self
            .handlers
            .borrow()
            .get(&(control.clone(), gesture.kind))
            .cloned();
        match handler {
            Some(handler) => {
                handler(gesture);
                true
            }
            None => {
                tracing::trace!(%control, kind = %gesture.kind, "no handler bound");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }
}
