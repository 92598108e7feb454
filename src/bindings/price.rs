//! Price Filter Bindings
//!
//! Number inputs and range sliders for the listing's price bounds, the apply
//! button, and `$value` readouts next to sliders.

use ajax_controls::price::{apply_query, format_bound, price_label, sync_lower, sync_upper};
use ajax_controls::EventKind;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use super::{wire, Page};
use crate::dom;

const PREFIX: &str = "price-filter";

/// Copy an accepted bound into its partner control
fn mirror(page: &Page, source: &HtmlInputElement, target: HtmlInputElement, accept: impl Fn(&str) -> Option<f64> + 'static) -> bool {
    let element: &Element = source.as_ref();
    let id = dom::control_id(element, PREFIX, 0);
    let input = source.clone();
    wire(page, element, id, EventKind::Input, move |_| {
        if let Some(value) = accept(&input.value()) {
            target.set_value(&format_bound(value));
        }
    })
}

/// `#price-min`/`#price-max` inputs, `#price-range-min`/`#price-range-max` sliders
/// and `.apply-price-filter`. Returns `false` when the page has no complete filter.
pub fn bind_price_filter(page: &Page) -> bool {
    let doc = &page.document;
    let (Some(min_input), Some(max_input), Some(min_range), Some(max_range)) = (
        dom::input_by_id(doc, "price-min"),
        dom::input_by_id(doc, "price-max"),
        dom::input_by_id(doc, "price-range-min"),
        dom::input_by_id(doc, "price-range-max"),
    ) else {
        return false;
    };

    let upper = max_input.clone();
    mirror(page, &min_input, min_range.clone(), move |value| sync_lower(value, &upper.value()));
    let lower = min_input.clone();
    mirror(page, &max_input, max_range.clone(), move |value| sync_upper(value, &lower.value()));
    let upper = max_range.clone();
    mirror(page, &min_range, min_input.clone(), move |value| sync_lower(value, &upper.value()));
    let lower = min_range.clone();
    mirror(page, &max_range, max_input.clone(), move |value| sync_upper(value, &lower.value()));

    let Ok(Some(apply)) = doc.query_selector(".apply-price-filter") else {
        return true;
    };
    let id = dom::control_id(&apply, PREFIX, 0);
    wire(page, &apply, id, EventKind::Click, move |gesture| {
        gesture.prevent_default();
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return;
        };
        let search = location.search().unwrap_or_default();
        let query = apply_query(&search, &min_input.value(), &max_input.value());
        if let Err(e) = location.set_search(&query) {
            tracing::warn!("failed to apply price filter: {e:?}");
        }
    });
    true
}

/// `.price-range-slider` inputs whose `data-display` selector names a readout
pub fn bind_price_sliders(page: &Page) -> usize {
    let mut bound = 0;
    for (index, slider) in dom::query_all(&page.document, ".price-range-slider").into_iter().enumerate() {
        let Ok(input) = slider.clone().dyn_into::<HtmlInputElement>() else {
            continue;
        };
        let Some(display) = slider.get_attribute("data-display") else {
            continue;
        };
        let document = page.document.clone();
        let id = dom::control_id(&slider, "price-slider", index);
        let shown = wire(page, &slider, id, EventKind::Input, move |_| {
            if let Ok(Some(readout)) = document.query_selector(&display) {
                readout.set_text_content(Some(&price_label(&input.value())));
            }
        });
        if shown {
            bound += 1;
        }
    }
    bound
}
