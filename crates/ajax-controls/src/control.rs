//! Control Abstractions
//!
//! What the controller needs from a DOM element, and how requests and result
//! updates are read from / written to the page.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::action::{ActionRequest, ActionResult, ResultField};
use crate::error::BuildError;

/// An interactive element (button, input, form) bound to one gesture handler
pub trait Control {
    /// Current label markup
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    /// `data-{key}` on this control or the closest ancestor carrying it
    fn data(&self, key: &str) -> Option<String>;
    /// Value of a named input inside the control (forms)
    fn field(&self, name: &str) -> Option<String>;
    /// Current value of an input control
    fn value(&self) -> Option<String>;
}

/// Element whose text shows a value from a result (badge, running total)
pub trait TextTarget {
    fn set_text(&self, text: &str);
}

/// Applies a successful result to the page
pub trait ResultSink {
    fn apply(&self, result: &ActionResult);
}

impl<F> ResultSink for F
where
    F: Fn(&ActionResult),
{
    fn apply(&self, result: &ActionResult) {
        self(result)
    }
}

/// Copies one field of the result into a text target, when the result carries it
pub struct TextUpdate {
    field: ResultField,
    target: Rc<dyn TextTarget>,
}

impl TextUpdate {
    pub fn new(field: ResultField, target: Rc<dyn TextTarget>) -> Self {
        Self { field, target }
    }
}

impl ResultSink for TextUpdate {
    fn apply(&self, result: &ActionResult) {
        if let Some(text) = self.field.read(result) {
            self.target.set_text(&text);
        }
    }
}

/// Where a request value is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `data-*` attribute on the control or an ancestor
    Data(String),
    /// Named input inside the control
    Field(String),
    /// The control's own value
    Value,
}

impl Source {
    pub fn data(key: impl Into<String>) -> Self {
        Source::Data(key.into())
    }

    pub fn field(name: impl Into<String>) -> Self {
        Source::Field(name.into())
    }

    fn read(&self, control: &dyn Control) -> Result<String, BuildError> {
        let raw = match self {
            Source::Data(key) => control.data(key).ok_or_else(|| BuildError::MissingData(key.clone())),
            Source::Field(name) => control.field(name).ok_or_else(|| BuildError::MissingField(name.clone())),
            Source::Value => control.value().ok_or(BuildError::MissingValue),
        }?;
        Ok(raw.trim().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quantity {
    Omit,
    Fixed(u32),
    From(Source),
}

/// Reads an [`ActionRequest`] off a control's state at gesture time. Never mutates the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    item: Source,
    quantity: Quantity,
}

impl RequestBuilder {
    pub fn new(item: Source) -> Self {
        Self {
            item,
            quantity: Quantity::Omit,
        }
    }

    pub fn quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn build(&self, control: &dyn Control) -> Result<ActionRequest, BuildError> {
        let item_id = self.item.read(control)?;
        if item_id.is_empty() {
            return Err(match &self.item {
                Source::Data(key) => BuildError::MissingData(key.clone()),
                Source::Field(name) => BuildError::MissingField(name.clone()),
                Source::Value => BuildError::MissingValue,
            });
        }
        let request = ActionRequest::new(item_id);
        match &self.quantity {
            Quantity::Omit => Ok(request),
            Quantity::Fixed(quantity) => Ok(request.with_quantity(*quantity)),
            Quantity::From(source) => {
                let raw = source.read(control)?;
                let quantity = raw.parse::<u32>().map_err(|_| BuildError::BadQuantity(raw))?;
                Ok(request.with_quantity(quantity))
            }
        }
    }
}

/// Transient labels and classes shown while a control is busy or settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feedback {
    pub busy_label: Option<String>,
    pub success_label: Option<String>,
    pub failure_label: Option<String>,
    /// Class the control wears at rest, swapped out while feedback shows
    pub idle_class: Option<String>,
    pub success_class: Option<String>,
    pub failure_class: Option<String>,
    /// Delay before the control reverts to its pre-gesture look
    pub revert_after_ms: u32,
    /// Also raise a toast with the server message
    pub announce: bool,
}

pub const BUTTON_REVERT_MS: u32 = 2000;

impl Default for Feedback {
    fn default() -> Self {
        Self {
            busy_label: Some("Adding...".to_string()),
            success_label: Some("Added!".to_string()),
            failure_label: Some("Error!".to_string()),
            idle_class: None,
            success_class: Some("btn-success".to_string()),
            failure_class: Some("btn-danger".to_string()),
            revert_after_ms: BUTTON_REVERT_MS,
            announce: false,
        }
    }
}

impl Feedback {
    /// No label or class changes; only the disabled flag moves (quantity inputs)
    pub fn quiet() -> Self {
        Self {
            busy_label: None,
            success_label: None,
            failure_label: None,
            idle_class: None,
            success_class: None,
            failure_class: None,
            revert_after_ms: 0,
            announce: false,
        }
    }

    pub fn announcing(mut self) -> Self {
        self.announce = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeControl, FakeTarget};

    #[test]
    fn test_builder_reads_data_and_fixed_quantity() {
        let control = FakeControl::new("Add to Cart").with_data("product-id", "42");
        let request = RequestBuilder::new(Source::data("product-id"))
            .quantity(Quantity::Fixed(1))
            .build(&control)
            .unwrap();

        assert_eq!(request, ActionRequest::new("42").with_quantity(1));
    }

    #[test]
    fn test_builder_reads_input_value_as_quantity() {
        let control = FakeControl::new("").with_data("cart-item-id", "7").with_value(" 3 ");
        let request = RequestBuilder::new(Source::data("cart-item-id"))
            .quantity(Quantity::From(Source::Value))
            .build(&control)
            .unwrap();

        assert_eq!(request.quantity, Some(3));
    }

    #[test]
    fn test_builder_reads_form_field() {
        let control = FakeControl::new("Add").with_field("product_id", "15");
        let request = RequestBuilder::new(Source::field("product_id")).build(&control).unwrap();
        assert_eq!(request.item_id, "15");
        assert_eq!(request.quantity, None);
    }

    #[test]
    fn test_builder_errors() {
        let control = FakeControl::new("Add").with_value("-1").with_data("product-id", "  ");

        assert_eq!(
            RequestBuilder::new(Source::data("missing")).build(&control),
            Err(BuildError::MissingData("missing".to_string()))
        );
        assert_eq!(
            RequestBuilder::new(Source::data("product-id")).build(&control),
            Err(BuildError::MissingData("product-id".to_string()))
        );

        let control = FakeControl::new("Add").with_data("product-id", "5").with_value("-1");
        assert_eq!(
            RequestBuilder::new(Source::data("product-id"))
                .quantity(Quantity::From(Source::Value))
                .build(&control),
            Err(BuildError::BadQuantity("-1".to_string()))
        );
    }

    #[test]
    fn test_builder_leaves_control_untouched() {
        let control = FakeControl::new("Add to Cart").with_data("product-id", "42");
        RequestBuilder::new(Source::data("product-id")).build(&control).unwrap();

        assert_eq!(control.label(), "Add to Cart");
        assert!(!control.is_disabled());
        assert!(control.classes().is_empty());
    }

    #[test]
    fn test_text_update_skips_absent_fields() {
        let target = Rc::new(FakeTarget::new("1"));
        let update = TextUpdate::new(ResultField::Count, target.clone());

        update.apply(&ActionResult { success: true, ..Default::default() });
        assert_eq!(target.text(), "1");
        assert_eq!(target.writes(), 0);

        update.apply(&ActionResult {
            success: true,
            updated_count: Some(4),
            ..Default::default()
        });
        assert_eq!(target.text(), "4");
    }
}
