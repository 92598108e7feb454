//! Cart Bindings
//!
//! Add-to-cart buttons, add-to-cart forms and cart quantity inputs.

use std::rc::Rc;

use ajax_controls::{
    ActionResult, Control, EventKind, Feedback, InteractionController, Quantity, RequestBuilder, ResultField, Source,
    TextTarget, TextUpdate,
};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::{attach, Page};
use crate::dom::{self, BadgeTarget, DomControl, SelectorTarget};

const PRODUCT_ID_DATA: &str = "product-id";
const PRODUCT_ID_FIELD: &str = "product_id";
const CART_ITEM_ID_DATA: &str = "cart-item-id";

fn add_to_cart(page: &Page, control: DomControl, item: Source) -> InteractionController {
    let builder = RequestBuilder::new(item).quantity(Quantity::Fixed(1));
    InteractionController::new(
        Rc::new(control),
        move |control: &dyn Control| builder.build(control),
        page.config.add_to_cart.clone(),
        page.runtime.clone(),
    )
    .with_feedback(page.config.button_feedback.clone())
    .with_sink(TextUpdate::new(
        ResultField::Count,
        Rc::new(BadgeTarget::new(page.document.clone(), &page.config)),
    ))
}

/// `.add-to-cart` buttons carrying `data-product-id`. Buttons inside an
/// add-to-cart form are left to the form's submit binding.
pub fn bind_add_to_cart_buttons(page: &Page) -> usize {
    let mut bound = 0;
    let buttons = dom::query_all(&page.document, ".add-to-cart")
        .into_iter()
        .filter(|button| matches!(button.closest(".add-to-cart-form"), Ok(None)));
    for (index, button) in buttons.enumerate() {
        let Ok(face) = button.clone().dyn_into::<HtmlElement>() else {
            continue;
        };
        let id = dom::control_id(&button, "add-to-cart", index);
        let controller = add_to_cart(page, DomControl::new(face), Source::data(PRODUCT_ID_DATA));
        if attach(page, &button, id, EventKind::Click, controller) {
            bound += 1;
        }
    }
    bound
}

/// `.add-to-cart-form` forms with a `product_id` field, bound on submit
pub fn bind_add_to_cart_forms(page: &Page) -> usize {
    let mut bound = 0;
    for (index, form) in dom::query_all(&page.document, ".add-to-cart-form").into_iter().enumerate() {
        let Some(control) = DomControl::for_form(form.clone()) else {
            tracing::warn!("add-to-cart form without a submit button");
            continue;
        };
        let id = dom::control_id(&form, "add-to-cart-form", index);
        let controller = add_to_cart(page, control, Source::field(PRODUCT_ID_FIELD));
        if attach(page, &form, id, EventKind::Submit, controller) {
            bound += 1;
        }
    }
    bound
}

/// `.quantity-input` fields on the cart page. A change posts the new quantity and
/// refreshes the cart total and the row total; the input itself shows no feedback.
pub fn bind_quantity_inputs(page: &Page) -> usize {
    let mut bound = 0;
    for (index, input) in dom::query_all(&page.document, ".quantity-input").into_iter().enumerate() {
        let Ok(face) = input.clone().dyn_into::<HtmlElement>() else {
            continue;
        };
        let control = Rc::new(DomControl::new(face));
        let builder = RequestBuilder::new(Source::data(CART_ITEM_ID_DATA)).quantity(Quantity::From(Source::Value));

        let document = page.document.clone();
        let row = Rc::clone(&control);
        let row_total = move |result: &ActionResult| {
            let (Some(total), Some(item)) = (&result.item_total, row.data(CART_ITEM_ID_DATA)) else {
                return;
            };
            SelectorTarget::new(document.clone(), format!("#item-total-{item}")).set_text(total);
        };

        let controller = InteractionController::new(
            control,
            move |control: &dyn Control| builder.build(control),
            page.config.update_cart.clone(),
            page.runtime.clone(),
        )
        .with_feedback(Feedback::quiet())
        .with_sink(TextUpdate::new(
            ResultField::Total,
            Rc::new(SelectorTarget::new(page.document.clone(), ".cart-total")),
        ))
        .with_sink(row_total);
        let id = dom::control_id(&input, "quantity", index);
        if attach(page, &input, id, EventKind::Change, controller) {
            bound += 1;
        }
    }
    bound
}
