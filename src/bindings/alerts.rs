//! Flash Alerts

use super::Page;
use crate::dom;

/// Remove the server-rendered `.alert` banners once the alert delay passes.
/// `.alert-permanent` banners stay.
pub fn schedule_alert_dismissal(page: &Page) -> usize {
    let alerts = dom::query_all(&page.document, ".alert:not(.alert-permanent)");
    for alert in &alerts {
        let alert = alert.clone();
        page.runtime
            .scheduler
            .schedule(page.config.alert_dismiss_ms, Box::new(move || alert.remove()));
    }
    alerts.len()
}
