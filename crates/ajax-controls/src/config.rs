//! UI Configuration
//!
//! Endpoints, token names, delays and feedback text. Every field has a default so the
//! server only needs to inject what differs.

use serde::{Deserialize, Serialize};

use crate::action::Endpoint;
use crate::control::Feedback;
use crate::csrf::{DEFAULT_COOKIE, DEFAULT_HEADER};
use crate::forms::{LOGOUT_PROMPT, PROCESSING_LABEL, SUBMIT_RELEASE_MS};
use crate::state::ACTIVE_TAB_KEY;
use crate::toast::ALERT_DISMISS_MS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub add_to_cart: Endpoint,
    pub update_cart: Endpoint,
    pub toggle_wishlist: Endpoint,
    pub csrf_cookie: String,
    pub csrf_header: String,
    /// Add-to-cart buttons and forms
    pub button_feedback: Feedback,
    pub alert_dismiss_ms: u32,
    pub tab_session_key: String,
    /// Profile pane forced open when it renders form errors
    pub error_tab: Option<String>,
    /// Elements showing the cart count. Other navbar badges are not cart badges.
    pub cart_badge: String,
    /// Icon a new cart badge is placed beside when the page has none
    pub cart_icon: String,
    /// Submit button markup while any form posts
    pub submit_busy_label: String,
    pub submit_release_ms: u32,
    pub logout_prompt: String,
}

pub const CART_BADGE_SELECTOR: &str = ".cart-count, .navbar .fa-shopping-cart ~ .badge";
pub const CART_ICON_SELECTOR: &str = ".navbar .fa-shopping-cart";

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            add_to_cart: Endpoint::new("/payments/add-to-cart/", "product_id"),
            update_cart: Endpoint::new("/payments/update-cart/", "cart_item_id"),
            toggle_wishlist: Endpoint::new("/products/toggle-wishlist/", "product_id"),
            csrf_cookie: DEFAULT_COOKIE.to_string(),
            csrf_header: DEFAULT_HEADER.to_string(),
            button_feedback: Feedback::default(),
            alert_dismiss_ms: ALERT_DISMISS_MS,
            tab_session_key: ACTIVE_TAB_KEY.to_string(),
            error_tab: Some("change-password".to_string()),
            cart_badge: CART_BADGE_SELECTOR.to_string(),
            cart_icon: CART_ICON_SELECTOR.to_string(),
            submit_busy_label: PROCESSING_LABEL.to_string(),
            submit_release_ms: SUBMIT_RELEASE_MS,
            logout_prompt: LOGOUT_PROMPT.to_string(),
        }
    }
}

impl UiConfig {
    /// Config from an injected JSON block; missing or broken blocks fall back to defaults.
    pub fn from_json(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring invalid ui config: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_block_gives_defaults() {
        let config = UiConfig::from_json(None);
        assert_eq!(config.add_to_cart.path, "/payments/add-to-cart/");
        assert_eq!(config.button_feedback.revert_after_ms, 2000);
        assert_eq!(config.alert_dismiss_ms, 5000);
        assert_eq!(config.submit_release_ms, 5000);
        assert_eq!(config.logout_prompt, "Are you sure you want to logout?");
        assert_eq!(UiConfig::from_json(Some("  ")), config);
    }

    #[test]
    fn test_partial_block_overrides_only_given_fields() {
        let config = UiConfig::from_json(Some(
            r#"{
                "add_to_cart": {"path": "/cart/add"},
                "button_feedback": {"success_label": "In your cart"},
                "error_tab": null
            }"#,
        ));

        assert_eq!(config.add_to_cart, Endpoint::at("/cart/add"));
        assert_eq!(config.button_feedback.success_label.as_deref(), Some("In your cart"));
        assert_eq!(config.button_feedback.failure_label.as_deref(), Some("Error!"));
        assert_eq!(config.button_feedback.revert_after_ms, 2000);
        assert_eq!(config.error_tab, None);
        assert_eq!(config.update_cart.id_key, "cart_item_id");
    }

    #[test]
    fn test_cart_badge_ignores_other_navbar_badges() {
        let config = UiConfig::default();
        let selectors: Vec<_> = config.cart_badge.split(',').map(str::trim).collect();
        assert_eq!(selectors, vec![".cart-count", ".navbar .fa-shopping-cart ~ .badge"]);
        assert!(!selectors.contains(&".navbar .badge"));

        let config = UiConfig::from_json(Some(r##"{"cart_badge": "#cart-badge"}"##));
        assert_eq!(config.cart_badge, "#cart-badge");
        assert_eq!(config.cart_icon, CART_ICON_SELECTOR);
    }

    #[test]
    fn test_invalid_block_falls_back() {
        assert_eq!(UiConfig::from_json(Some("{not json")), UiConfig::default());
        assert_eq!(UiConfig::from_json(Some(r#"{"alert_dismiss_ms": "soon"}"#)), UiConfig::default());
    }
}
