//! Page Bindings
//!
//! Finds the storefront's interactive elements and binds each one once.

mod alerts;
mod cart;
mod charts;
mod forms;
mod gallery;
mod menu;
mod price;
mod table;
mod tabs;
mod wishlist;

use std::rc::Rc;

use ajax_controls::{ControlId, EventKind, EventRegistry, Gesture, InteractionController, Runtime, UiConfig, UiState};
use tracing::warn;
use web_sys::{Document, Element};

use crate::dom;

pub use alerts::schedule_alert_dismissal;
pub use cart::{bind_add_to_cart_buttons, bind_add_to_cart_forms, bind_quantity_inputs};
pub use charts::render_report_charts;
pub use forms::bind_form_guards;
pub use gallery::bind_product_gallery;
pub use menu::bind_mobile_menu;
pub use price::{bind_price_filter, bind_price_sliders};
pub use table::bind_table_search;
pub use tabs::bind_profile_tabs;
pub use wishlist::bind_wishlist_buttons;

/// What every binding needs from the page load
pub struct Page {
    pub document: Document,
    pub config: Rc<UiConfig>,
    pub runtime: Runtime,
    pub registry: Rc<EventRegistry>,
    pub state: Rc<UiState>,
}

/// Register a controller for `id` and start listening on `element`
fn attach(page: &Page, element: &Element, id: ControlId, kind: EventKind, controller: InteractionController) -> bool {
    match controller.bind(&page.registry, id.clone(), kind) {
        Ok(_) => {
            dom::listen(&page.registry, element, id, kind);
            true
        }
        Err(e) => {
            warn!("skipping control: {e}");
            false
        }
    }
}

/// Register a plain handler for `id` and start listening on `element`
fn wire<F>(page: &Page, element: &Element, id: ControlId, kind: EventKind, handler: F) -> bool
where
    F: Fn(&Gesture) + 'static,
{
    match page.registry.register(id.clone(), kind, handler) {
        Ok(()) => {
            dom::listen(&page.registry, element, id, kind);
            true
        }
        Err(e) => {
            warn!("skipping control: {e}");
            false
        }
    }
}
