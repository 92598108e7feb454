//! Report Charts
//!
//! Draws the reports page with the Chart.js global loaded by the page.

use ajax_controls::report::ReportData;
use ajax_controls::ChartHandle;
use serde::Serialize;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use super::Page;
use crate::dom;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    type JsChart;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(canvas: &Element, config: &JsValue) -> Result<JsChart, JsValue>;

    #[wasm_bindgen(method, js_name = destroy)]
    fn destroy_chart(this: &JsChart);
}

struct ChartJs(JsChart);

impl ChartHandle for ChartJs {
    fn destroy(&self) {
        self.0.destroy_chart();
    }
}

/// `<script id="report-data">` JSON, or a `window.reportData` object set by an inline script
fn load_report_data(document: &Document) -> Option<ReportData> {
    if let Some(raw) = dom::script_json(document, "report-data") {
        return ReportData::from_json(&raw)
            .map_err(|e| warn!("unreadable report data: {e}"))
            .ok();
    }
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str("reportData")).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| warn!("unreadable window.reportData: {e}"))
        .ok()
}

/// Draw every chart whose canvas is on the page, replacing any chart already there.
/// Returns how many were drawn.
pub fn render_report_charts(page: &Page) -> usize {
    let Some(data) = load_report_data(&page.document) else {
        return 0;
    };
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let mut drawn = 0;
    for (canvas_id, spec) in data.charts() {
        let Some(canvas) = page.document.get_element_by_id(canvas_id) else {
            debug!("no canvas {canvas_id}");
            continue;
        };
        let config = match spec.serialize(&serializer) {
            Ok(config) => config,
            Err(e) => {
                warn!("chart {canvas_id} config: {e}");
                continue;
            }
        };
        match JsChart::new(&canvas, &config) {
            Ok(chart) => {
                page.state.install_chart(canvas_id, Box::new(ChartJs(chart)));
                drawn += 1;
            }
            Err(e) => warn!("chart {canvas_id} failed: {e:?}"),
        }
    }
    debug!("{} charts live", page.state.chart_count());
    drawn
}
