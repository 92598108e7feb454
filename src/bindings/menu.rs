//! Mobile Menu Bindings
//!
//! Buttons marked `data-menu-toggle` / `data-menu-close` and the overlay drive the menu.
//! `window.toggleMenu` and `window.closeMenu` stay available to inline `onclick` markup.

use std::rc::Rc;

use ajax_controls::{EventKind, MenuView, MobileMenu};
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;
use web_sys::Document;

use super::{wire, Page};
use crate::dom;

const MENU_ID: &str = "mobileMenu";
const OVERLAY_ID: &str = "mobileMenuOverlay";

struct DomMenu {
    document: Document,
}

impl MenuView for DomMenu {
    fn is_open(&self) -> bool {
        self.document
            .get_element_by_id(MENU_ID)
            .is_some_and(|menu| menu.class_list().contains("active"))
    }

    fn set_open(&self, open: bool) {
        for id in [MENU_ID, OVERLAY_ID] {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("active", open);
            }
        }
    }

    fn lock_scroll(&self, locked: bool) {
        if let Some(body) = self.document.body() {
            let _ = body.style().set_property("overflow", if locked { "hidden" } else { "" });
        }
    }
}

fn expose(name: &str, action: impl Fn() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::<dyn Fn()>::new(action);
    if let Err(e) = js_sys::Reflect::set(&window, &JsValue::from_str(name), callback.as_ref()) {
        warn!("failed to expose {name}: {e:?}");
    }
    callback.forget();
}

pub fn bind_mobile_menu(page: &Page) -> usize {
    if page.document.get_element_by_id(MENU_ID).is_none() {
        return 0;
    }
    let menu = Rc::new(MobileMenu::new(Rc::new(DomMenu {
        document: page.document.clone(),
    })));

    let mut bound = 0;
    for (index, toggle) in dom::query_all(&page.document, "[data-menu-toggle]").iter().enumerate() {
        let menu = Rc::clone(&menu);
        let id = dom::control_id(toggle, "menu-toggle", index);
        if wire(page, toggle, id, EventKind::Click, move |gesture| {
            gesture.prevent_default();
            menu.toggle();
        }) {
            bound += 1;
        }
    }
    let closers = dom::query_all(&page.document, &format!("[data-menu-close], #{OVERLAY_ID}"));
    for (index, closer) in closers.iter().enumerate() {
        let menu = Rc::clone(&menu);
        let id = dom::control_id(closer, "menu-close", index);
        if wire(page, closer, id, EventKind::Click, move |_| menu.close()) {
            bound += 1;
        }
    }

    let toggle = Rc::clone(&menu);
    expose("toggleMenu", move || {
        toggle.toggle();
    });
    expose("closeMenu", move || menu.close());
    bound
}
