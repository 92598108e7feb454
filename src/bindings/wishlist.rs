//! Wishlist Bindings

use std::rc::Rc;

use ajax_controls::{ActionResult, Control, EventKind, Feedback, InteractionController, RequestBuilder, Source};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::{attach, Page};
use crate::dom::{self, DomControl};

/// Filled heart when the product is on the wishlist, outline otherwise
fn show_membership(button: &HtmlElement, added: bool) {
    if let Ok(Some(icon)) = button.query_selector("i") {
        let classes = icon.class_list();
        let (from, to) = if added { ("far", "fas") } else { ("fas", "far") };
        let _ = classes.remove_1(from);
        let _ = classes.add_1(to);
    }
    let _ = button.class_list().toggle_with_force("text-danger", added);
}

/// `.add-to-wishlist` buttons carrying `data-product-id`. The server's message is toasted.
pub fn bind_wishlist_buttons(page: &Page) -> usize {
    let mut bound = 0;
    for (index, button) in dom::query_all(&page.document, ".add-to-wishlist").into_iter().enumerate() {
        let Ok(face) = button.clone().dyn_into::<HtmlElement>() else {
            continue;
        };
        let builder = RequestBuilder::new(Source::data("product-id"));
        let heart = face.clone();
        let controller = InteractionController::new(
            Rc::new(DomControl::new(face)),
            move |control: &dyn Control| builder.build(control),
            page.config.toggle_wishlist.clone(),
            page.runtime.clone(),
        )
        .with_feedback(Feedback::quiet().announcing())
        .with_sink(move |result: &ActionResult| {
            if let Some(added) = result.added {
                show_membership(&heart, added);
            }
        });
        let id = dom::control_id(&button, "wishlist", index);
        if attach(page, &button, id, EventKind::Click, controller) {
            bound += 1;
        }
    }
    bound
}
