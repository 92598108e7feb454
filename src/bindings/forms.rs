//! Form Submit Bindings
//!
//! One guard per page form: logout confirmation, `.needs-validation` checks and
//! the busy submit button.

use std::rc::Rc;

use ajax_controls::forms::is_logout_action;
use ajax_controls::{EventKind, FormView, SubmitGuard};
use wasm_bindgen::JsCast;
use web_sys::HtmlFormElement;

use super::{wire, Page};
use crate::dom::{self, DomControl};

struct DomForm(HtmlFormElement);

impl FormView for DomForm {
    fn is_valid(&self) -> bool {
        self.0.check_validity()
    }

    fn mark_validated(&self) {
        let _ = self.0.class_list().add_1("was-validated");
    }

    fn confirm(&self, prompt: &str) -> bool {
        // Without a window there is nobody to ask; let the post through.
        web_sys::window()
            .and_then(|window| window.confirm_with_message(prompt).ok())
            .unwrap_or(true)
    }
}

pub fn bind_form_guards(page: &Page) -> usize {
    let mut bound = 0;
    for (index, element) in dom::query_all(&page.document, "form").into_iter().enumerate() {
        let Ok(form) = element.clone().dyn_into::<HtmlFormElement>() else {
            continue;
        };
        let classes = element.class_list();
        let mut guard = SubmitGuard::new(Rc::new(DomForm(form)), Rc::clone(&page.runtime.scheduler));
        if is_logout_action(&element.get_attribute("action").unwrap_or_default()) {
            guard = guard.confirming(page.config.logout_prompt.clone());
        }
        if classes.contains("needs-validation") {
            guard = guard.validating();
        }
        // Add-to-cart forms show their controller's feedback instead
        if !classes.contains("add-to-cart-form") {
            if let Some(button) = DomControl::submit_button(element.clone()) {
                guard = guard.holding(
                    Rc::new(button),
                    page.config.submit_busy_label.clone(),
                    page.config.submit_release_ms,
                );
            }
        }
        if guard.is_noop() {
            continue;
        }

        let id = dom::control_id(&element, "form", index);
        if wire(page, &element, id, EventKind::Submit, move |gesture| {
            if !guard.submit() {
                gesture.prevent_default();
            }
        }) {
            bound += 1;
        }
    }
    bound
}
