//! AJAX Controls
//!
//! Storefront interaction core, independent of the browser:
//! one POST per gesture, result applied to the page, feedback reverted on a timer.
//! Form guards, table search, the product gallery and the mobile menu live here too.
//! The WASM frontend supplies DOM, network, timer and storage adapters.

pub mod action;
pub mod config;
pub mod control;
pub mod controller;
pub mod csrf;
pub mod error;
pub mod forms;
pub mod gallery;
pub mod menu;
pub mod price;
pub mod registry;
pub mod report;
pub mod runtime;
pub mod session;
pub mod state;
pub mod table;
pub mod tabs;
pub mod toast;

#[cfg(test)]
mod testing;

pub use action::{ActionRequest, ActionResult, Endpoint, ResultField};
pub use config::UiConfig;
pub use control::{Control, Feedback, Quantity, RequestBuilder, ResultSink, Source, TextTarget, TextUpdate};
pub use controller::{InteractionController, Phase};
pub use csrf::CsrfToken;
pub use error::{ActionError, BuildError, RegistryError};
pub use forms::{FormView, SubmitGuard};
pub use gallery::GalleryView;
pub use menu::{MenuView, MobileMenu};
pub use registry::{ControlId, EventKind, EventRegistry, Gesture};
pub use runtime::{Runtime, Scheduler, Transport};
pub use session::{MemoryStore, SessionStore};
pub use state::{ChartHandle, UiState};
pub use table::TableRows;
pub use tabs::{TabController, TabView};
pub use toast::{Toast, ToastLevel, ToastQueue};
