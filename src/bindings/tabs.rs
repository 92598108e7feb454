//! Profile Tab Bindings

use std::rc::Rc;

use ajax_controls::{EventKind, TabController, TabView};
use web_sys::Document;

use super::{wire, Page};
use crate::dom;

const TAB_SELECTOR: &str = ".profile-tab";

/// `.profile-tab` buttons (`data-tab` names the pane) over `.tab-pane` elements
struct DomTabs {
    document: Document,
}

impl TabView for DomTabs {
    fn has_pane(&self, tab_id: &str) -> bool {
        self.document.get_element_by_id(tab_id).is_some()
    }

    fn clear_active(&self) {
        for el in dom::query_all(&self.document, ".profile-tab, .tab-pane") {
            let _ = el.class_list().remove_1("active");
        }
    }

    fn mark_active(&self, tab_id: &str) {
        if let Ok(Some(tab)) = self.document.query_selector(&format!("[data-tab=\"{tab_id}\"]")) {
            let _ = tab.class_list().add_1("active");
        }
        if let Some(pane) = self.document.get_element_by_id(tab_id) {
            let _ = pane.class_list().add_1("active");
        }
    }

    fn pane_has_errors(&self, tab_id: &str) -> bool {
        self.document
            .get_element_by_id(tab_id)
            .and_then(|pane| pane.query_selector(".error-message").ok().flatten())
            .is_some()
    }
}

/// Bind tab clicks, then open the pane from the URL hash, the session, or a form error.
/// Returns the number of tabs bound.
pub fn bind_profile_tabs(page: &Page) -> usize {
    let tabs = dom::query_all(&page.document, TAB_SELECTOR);
    if tabs.is_empty() {
        return 0;
    }
    let view = Rc::new(DomTabs { document: page.document.clone() });
    let controller = Rc::new(TabController::new(view, Rc::clone(&page.state), page.config.error_tab.clone()));

    let mut bound = 0;
    for (index, tab) in tabs.iter().enumerate() {
        let Some(target) = tab.get_attribute("data-tab") else {
            continue;
        };
        let switcher = Rc::clone(&controller);
        let id = dom::control_id(tab, "profile-tab", index);
        if wire(page, tab, id, EventKind::Click, move |gesture| {
            gesture.prevent_default();
            switcher.select(&target);
        }) {
            bound += 1;
        }
    }

    let hash = web_sys::window().and_then(|w| w.location().hash().ok());
    if let Some(active) = controller.restore(hash.as_deref()) {
        tracing::debug!("profile tab {active} open");
    }
    if let Ok(Some(error)) = page.document.query_selector(".error-message") {
        error.scroll_into_view();
    }
    bound
}
