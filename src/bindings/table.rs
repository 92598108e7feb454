//! Table Search Bindings

use ajax_controls::table::filter_rows;
use ajax_controls::{EventKind, TableRows};
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement};

use super::{wire, Page};
use crate::dom;

/// `tbody` rows, collected when the query changes so server-side row updates are seen
struct DomRows(Vec<HtmlElement>);

impl TableRows for DomRows {
    fn row_count(&self) -> usize {
        self.0.len()
    }

    fn row_text(&self, index: usize) -> String {
        self.0.get(index).and_then(|row| row.text_content()).unwrap_or_default()
    }

    fn set_row_visible(&self, index: usize, visible: bool) {
        if let Some(row) = self.0.get(index) {
            let _ = row.style().set_property("display", if visible { "" } else { "none" });
        }
    }
}

/// `input[data-table-search]` fields; the attribute holds the table's id
pub fn bind_table_search(page: &Page) -> usize {
    let mut bound = 0;
    for (index, element) in dom::query_all(&page.document, "input[data-table-search]").into_iter().enumerate() {
        let Ok(input) = element.clone().dyn_into::<HtmlInputElement>() else {
            continue;
        };
        let Some(table_id) = element.get_attribute("data-table-search").filter(|id| !id.is_empty()) else {
            continue;
        };
        let document = page.document.clone();
        let id = dom::control_id(&element, "table-search", index);
        if wire(page, &element, id, EventKind::KeyUp, move |_| {
            let Some(table) = document.get_element_by_id(&table_id) else {
                debug!("no table #{table_id} to search");
                return;
            };
            let rows = dom::query_within(&table, "tbody tr")
                .into_iter()
                .filter_map(|row| row.dyn_into::<HtmlElement>().ok())
                .collect();
            let shown = filter_rows(&DomRows(rows), &input.value());
            debug!("{shown} rows match in #{table_id}");
        }) {
            bound += 1;
        }
    }
    bound
}
