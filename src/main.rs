//! Storefront Frontend Entry Point

mod app;
mod bindings;
mod components;
mod dom;
mod fetch;
mod storage;
mod timers;

use tracing::Level;

fn main() {
    console_error_panic_hook::set_once();
    let Some(document) = dom::document() else {
        return;
    };
    // <body data-log-level="debug"> turns on request tracing
    let level = document
        .body()
        .and_then(|body| body.get_attribute("data-log-level"))
        .map(|name| console_logger::parse_level(&name))
        .unwrap_or(Level::INFO);
    console_logger::init(level);
    app::start(document);
}
