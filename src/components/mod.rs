//! UI Components
//!
//! Leptos components mounted alongside the server-rendered page.

mod toast_stack;

pub use toast_stack::{mount_toasts, ToastStack};
