//! Toast Notifications
//!
//! Alert-style messages that dismiss themselves after a fixed delay.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::runtime::Scheduler;

pub const ALERT_DISMISS_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Danger,
}

impl ToastLevel {
    /// Bootstrap alert modifier class
    pub fn alert_class(&self) -> &'static str {
        match self {
            ToastLevel::Info => "alert-info",
            ToastLevel::Success => "alert-success",
            ToastLevel::Warning => "alert-warning",
            ToastLevel::Danger => "alert-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub message: String,
    pub level: ToastLevel,
}

type Listener = Box<dyn Fn(&[Toast])>;

/// Visible toasts, oldest first
pub struct ToastQueue {
    toasts: RefCell<Vec<Toast>>,
    next_id: Cell<u32>,
    scheduler: Rc<dyn Scheduler>,
    dismiss_after_ms: u32,
    listener: RefCell<Option<Listener>>,
}

impl ToastQueue {
    pub fn new(scheduler: Rc<dyn Scheduler>, dismiss_after_ms: u32) -> Rc<Self> {
        Rc::new(Self {
            toasts: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            scheduler,
            dismiss_after_ms,
            listener: RefCell::new(None),
        })
    }

    /// Called with the full list after every change. Replaces any previous listener.
    pub fn subscribe(&self, listener: impl Fn(&[Toast]) + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    /// Show a toast and schedule its removal
    pub fn show(self: &Rc<Self>, message: impl Into<String>, level: ToastLevel) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        self.toasts.borrow_mut().push(Toast {
            id,
            message: message.into(),
            level,
        });
        self.notify();

        let queue: Weak<Self> = Rc::downgrade(self);
        self.scheduler.schedule(
            self.dismiss_after_ms,
            Box::new(move || {
                if let Some(queue) = queue.upgrade() {
                    queue.dismiss(id);
                }
            }),
        );
        id
    }

    /// Remove a toast early (close button) or on timeout. Unknown ids are ignored.
    pub fn dismiss(&self, id: u32) -> bool {
        let removed = {
            let mut toasts = self.toasts.borrow_mut();
            let before = toasts.len();
            toasts.retain(|toast| toast.id != id);
            toasts.len() != before
        };
        if removed {
            self.notify();
        }
        removed
    }

    pub fn snapshot(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    fn notify(&self) {
        let current = self.snapshot();
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener(&current);
        }
    }
}
