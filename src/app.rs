//! Storefront Page Boot
//!
//! Builds the shared runtime once per page load and binds every interaction the
//! document contains. Pages without a feature's markup simply bind nothing for it.

use std::rc::Rc;

use ajax_controls::{EventRegistry, Runtime, Scheduler, ToastQueue, UiConfig, UiState};
use tracing::{error, info, warn};
use web_sys::Document;

use crate::bindings::{self, Page};
use crate::components::mount_toasts;
use crate::dom;
use crate::fetch::FetchTransport;
use crate::storage::session_store;
use crate::timers::{BrowserSpawner, TimeoutScheduler};

const CONFIG_BLOCK: &str = "ui-config";

pub fn start(document: Document) {
    let config = Rc::new(UiConfig::from_json(dom::script_json(&document, CONFIG_BLOCK).as_deref()));

    let transport = match FetchTransport::for_page() {
        Ok(transport) => transport,
        Err(e) => {
            error!("cannot resolve page url, controls stay unbound: {e}");
            return;
        }
    };
    let token = dom::csrf_token(&document, &config);
    if token.value().is_none() {
        warn!("no anti-forgery token on page; the server will refuse cart and wishlist changes");
    }

    let scheduler: Rc<dyn Scheduler> = Rc::new(TimeoutScheduler);
    let toasts = ToastQueue::new(Rc::clone(&scheduler), config.alert_dismiss_ms);
    let runtime = Runtime {
        transport: Rc::new(transport),
        scheduler,
        spawner: Rc::new(BrowserSpawner),
        token: Rc::new(token),
        toasts: Some(Rc::clone(&toasts)),
    };
    let state = Rc::new(UiState::with_tab_key(session_store(), config.tab_session_key.clone()));
    let page = Page {
        document,
        config,
        runtime,
        registry: Rc::new(EventRegistry::new()),
        state,
    };

    // Server alerts first, before the toast stack adds alerts of its own
    let alerts = bindings::schedule_alert_dismissal(&page);
    let cart = bindings::bind_add_to_cart_buttons(&page) + bindings::bind_add_to_cart_forms(&page);
    let forms = bindings::bind_form_guards(&page);
    let quantities = bindings::bind_quantity_inputs(&page);
    let wishlist = bindings::bind_wishlist_buttons(&page);
    let price_filter = bindings::bind_price_filter(&page);
    let sliders = bindings::bind_price_sliders(&page);
    let tabs = bindings::bind_profile_tabs(&page);
    let table_search = bindings::bind_table_search(&page);
    let gallery = bindings::bind_product_gallery(&page);
    let menu = bindings::bind_mobile_menu(&page);
    let charts = bindings::render_report_charts(&page);
    mount_toasts(toasts);

    info!(
        cart,
        forms,
        quantities,
        wishlist,
        price_filter,
        sliders,
        tabs,
        table_search,
        gallery,
        menu,
        charts,
        alerts,
        handlers = page.registry.len(),
        "page bound"
    );
}
