//! DOM Adapters
//!
//! `web-sys` implementations of the interaction core's control and target traits,
//! plus the event bridge from DOM listeners into the registry.

use std::rc::Rc;

use ajax_controls::{Control, ControlId, CsrfToken, EventKind, EventRegistry, Gesture, TextTarget, UiConfig};
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlDocument, HtmlElement, HtmlInputElement, NodeList};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Every element matching `selector`, in document order
pub fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    elements(root.query_selector_all(selector), selector)
}

/// Descendants of `root` matching `selector`
pub fn query_within(root: &Element, selector: &str) -> Vec<Element> {
    elements(root.query_selector_all(selector), selector)
}

fn elements(list: Result<NodeList, JsValue>, selector: &str) -> Vec<Element> {
    let Ok(list) = list else {
        warn!("bad selector {selector:?}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Text of an injected `<script type="application/json">` block
pub fn script_json(document: &Document, id: &str) -> Option<String> {
    document.get_element_by_id(id)?.text_content()
}

pub fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlInputElement>().ok()
}

/// Control id scoped by `prefix` and the element's position, with its DOM `id` as a suffix.
/// An element bound by two features gets one id per feature.
pub fn control_id(element: &Element, prefix: &str, index: usize) -> ControlId {
    ControlId::scoped(prefix, index, Some(&element.id()))
}

/// Anti-forgery token: the form field rendered into the page wins over the cookie
pub fn csrf_token(document: &Document, config: &UiConfig) -> CsrfToken {
    let form_value = document
        .query_selector("[name=csrfmiddlewaretoken]")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value());
    let cookies = document
        .dyn_ref::<HtmlDocument>()
        .and_then(|doc| doc.cookie().ok())
        .unwrap_or_default();
    CsrfToken::resolve(&config.csrf_header, form_value, &cookies, &config.csrf_cookie)
}

/// Forward `kind` events on `element` to whatever the registry holds for `id`
pub fn listen(registry: &Rc<EventRegistry>, element: &Element, id: ControlId, kind: EventKind) {
    let registry = Rc::clone(registry);
    let on_event = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        let gesture = Gesture::new(kind);
        if !registry.dispatch(&id, &gesture) {
            debug!("no {kind} handler for {id}");
        }
        if gesture.is_default_prevented() {
            ev.prevent_default();
        }
    });
    if let Err(e) = element.add_event_listener_with_callback(kind.as_str(), on_event.as_ref().unchecked_ref()) {
        warn!("failed to listen for {kind}: {e:?}");
    }
    on_event.forget();
}

/// A page control. `scope` answers data and field lookups; `face` shows the feedback.
///
/// For a plain button both are the same element. For a form the face is its submit button.
pub struct DomControl {
    scope: Element,
    face: HtmlElement,
}

impl DomControl {
    pub fn new(element: HtmlElement) -> Self {
        Self { scope: element.clone().into(), face: element }
    }

    pub fn for_form(form: Element) -> Option<Self> {
        Self::in_form(form, ".add-to-cart, button[type=submit], button:not([type])")
    }

    /// The form's explicit `type=submit` button
    pub fn submit_button(form: Element) -> Option<Self> {
        Self::in_form(form, "button[type=submit]")
    }

    fn in_form(form: Element, selector: &str) -> Option<Self> {
        let face = form.query_selector(selector).ok()??.dyn_into::<HtmlElement>().ok()?;
        Some(Self { scope: form, face })
    }
}

impl Control for DomControl {
    fn label(&self) -> String {
        self.face.inner_html()
    }

    fn set_label(&self, label: &str) {
        self.face.set_inner_html(label);
    }

    fn is_disabled(&self) -> bool {
        self.face.has_attribute("disabled")
    }

    fn set_disabled(&self, disabled: bool) {
        let result = if disabled {
            self.face.set_attribute("disabled", "")
        } else {
            self.face.remove_attribute("disabled")
        };
        if let Err(e) = result {
            warn!("failed to toggle disabled: {e:?}");
        }
    }

    fn add_class(&self, class: &str) {
        let _ = self.face.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.face.class_list().remove_1(class);
    }

    fn data(&self, key: &str) -> Option<String> {
        let attr = format!("data-{key}");
        self.scope.closest(&format!("[{attr}]")).ok()??.get_attribute(&attr)
    }

    fn field(&self, name: &str) -> Option<String> {
        self.scope
            .query_selector(&format!("[name=\"{name}\"]"))
            .ok()??
            .dyn_into::<HtmlInputElement>()
            .ok()
            .map(|input| input.value())
    }

    fn value(&self) -> Option<String> {
        self.face.dyn_ref::<HtmlInputElement>().map(|input| input.value())
    }
}

/// First element matching a selector, looked up when the text arrives
pub struct SelectorTarget {
    document: Document,
    selector: String,
}

impl SelectorTarget {
    pub fn new(document: Document, selector: impl Into<String>) -> Self {
        Self { document, selector: selector.into() }
    }
}

impl TextTarget for SelectorTarget {
    fn set_text(&self, text: &str) {
        match self.document.query_selector(&self.selector) {
            Ok(Some(el)) => el.set_text_content(Some(text)),
            _ => debug!("no {} to update", self.selector),
        }
    }
}

/// Cart count badges. Updates every existing badge; with none on the page,
/// creates one beside the navbar cart icon.
pub struct BadgeTarget {
    document: Document,
    badges: String,
    icon: String,
}

impl BadgeTarget {
    pub fn new(document: Document, config: &UiConfig) -> Self {
        Self {
            document,
            badges: config.cart_badge.clone(),
            icon: config.cart_icon.clone(),
        }
    }

    fn create(&self, text: &str) {
        let Ok(Some(icon)) = self.document.query_selector(&self.icon) else {
            debug!("no cart icon for a badge");
            return;
        };
        let Some(parent) = icon.parent_element() else {
            return;
        };
        match self.document.create_element("span") {
            Ok(badge) => {
                badge.set_class_name("badge bg-danger");
                badge.set_text_content(Some(text));
                if let Err(e) = parent.append_child(&badge) {
                    warn!("failed to insert cart badge: {e:?}");
                }
            }
            Err(e) => warn!("failed to create cart badge: {e:?}"),
        }
    }
}

impl TextTarget for BadgeTarget {
    fn set_text(&self, text: &str) {
        let badges = query_all(&self.document, &self.badges);
        if badges.is_empty() {
            self.create(text);
            return;
        }
        for badge in badges {
            badge.set_text_content(Some(text));
        }
    }
}
