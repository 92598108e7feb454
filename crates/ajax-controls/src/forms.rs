//! Form Guards
//!
//! Rules applied when any page form submits: logout confirmation, client-side
//! validation, and a busy submit button released after a fallback delay.

use std::rc::Rc;

use tracing::debug;

use crate::control::Control;
use crate::runtime::Scheduler;

pub const PROCESSING_LABEL: &str = r#"<i class="fas fa-spinner fa-spin me-2"></i>Processing..."#;
/// The page normally navigates away long before this fires
pub const SUBMIT_RELEASE_MS: u32 = 5000;
pub const LOGOUT_PROMPT: &str = "Are you sure you want to logout?";

/// What a guard needs from a `<form>`
pub trait FormView {
    /// Browser constraint validation
    fn is_valid(&self) -> bool;
    /// Show validation styling from now on
    fn mark_validated(&self);
    /// Ask the user; `true` lets the submit go ahead
    fn confirm(&self, prompt: &str) -> bool;
}

/// Forms posting to a logout url
pub fn is_logout_action(action: &str) -> bool {
    action.contains("logout")
}

/// Disable `button` with `busy_label`, then restore it after `release_after_ms`.
/// A button that is already disabled is left alone and `false` returned.
pub fn hold_button(
    button: &Rc<dyn Control>,
    busy_label: &str,
    release_after_ms: u32,
    scheduler: &dyn Scheduler,
) -> bool {
    if button.is_disabled() {
        return false;
    }
    let original = button.label();
    button.set_disabled(true);
    button.set_label(busy_label);

    let button = Rc::clone(button);
    scheduler.schedule(
        release_after_ms,
        Box::new(move || {
            button.set_disabled(false);
            button.set_label(&original);
        }),
    );
    true
}

struct Hold {
    button: Rc<dyn Control>,
    busy_label: String,
    release_after_ms: u32,
}

/// Everything that happens on one form's submit, in order: confirm, validate, hold
pub struct SubmitGuard {
    view: Rc<dyn FormView>,
    scheduler: Rc<dyn Scheduler>,
    prompt: Option<String>,
    validate: bool,
    hold: Option<Hold>,
}

impl SubmitGuard {
    pub fn new(view: Rc<dyn FormView>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            view,
            scheduler,
            prompt: None,
            validate: false,
            hold: None,
        }
    }

    pub fn confirming(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn validating(mut self) -> Self {
        self.validate = true;
        self
    }

    pub fn holding(mut self, button: Rc<dyn Control>, busy_label: impl Into<String>, release_after_ms: u32) -> Self {
        self.hold = Some(Hold {
            button,
            busy_label: busy_label.into(),
            release_after_ms,
        });
        self
    }

    /// Whether nothing is left to do on submit
    pub fn is_noop(&self) -> bool {
        self.prompt.is_none() && !self.validate && self.hold.is_none()
    }

    /// Run the guard for one submit. `false` means the submit must be stopped.
    pub fn submit(&self) -> bool {
        if let Some(prompt) = &self.prompt {
            if !self.view.confirm(prompt) {
                debug!("submit cancelled by user");
                return false;
            }
        }
        if self.validate {
            self.view.mark_validated();
            if !self.view.is_valid() {
                debug!("submit blocked, form invalid");
                return false;
            }
        }
        if let Some(hold) = &self.hold {
            hold_button(&hold.button, &hold.busy_label, hold.release_after_ms, self.scheduler.as_ref());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeControl, ManualScheduler};
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakeForm {
        valid: Cell<bool>,
        validated: Cell<bool>,
        answer: Cell<bool>,
        prompts: RefCell<Vec<String>>,
    }

    impl FormView for FakeForm {
        fn is_valid(&self) -> bool {
            self.valid.get()
        }

        fn mark_validated(&self) {
            self.validated.set(true);
        }

        fn confirm(&self, prompt: &str) -> bool {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.answer.get()
        }
    }

    fn button() -> (Rc<FakeControl>, Rc<dyn Control>) {
        let fake = Rc::new(FakeControl::new("Save"));
        let button: Rc<dyn Control> = fake.clone();
        (fake, button)
    }

    #[test]
    fn test_submit_button_shows_processing_then_releases() {
        let scheduler = Rc::new(ManualScheduler::new());
        let form = Rc::new(FakeForm::default());
        let (fake, button) = button();
        let guard = SubmitGuard::new(form, scheduler.clone()).holding(button, PROCESSING_LABEL, SUBMIT_RELEASE_MS);

        assert!(guard.submit());
        assert!(fake.is_disabled());
        assert!(fake.label().ends_with("Processing..."));

        scheduler.advance(4999);
        assert!(fake.is_disabled());
        scheduler.advance(1);
        assert!(!fake.is_disabled());
        assert_eq!(fake.label(), "Save");
    }

    #[test]
    fn test_disabled_button_is_not_held_again() {
        let scheduler = ManualScheduler::new();
        let (fake, button) = button();
        fake.set_disabled(true);

        assert!(!hold_button(&button, PROCESSING_LABEL, SUBMIT_RELEASE_MS, &scheduler));
        assert_eq!(fake.label(), "Save");
        scheduler.advance(SUBMIT_RELEASE_MS);
        assert!(fake.is_disabled());
    }

    #[test]
    fn test_cancelled_logout_stops_submit_before_hold() {
        let scheduler = Rc::new(ManualScheduler::new());
        let form = Rc::new(FakeForm::default());
        let (fake, button) = button();
        let guard = SubmitGuard::new(form.clone(), scheduler)
            .confirming(LOGOUT_PROMPT)
            .holding(button, PROCESSING_LABEL, SUBMIT_RELEASE_MS);

        assert!(!guard.submit());
        assert_eq!(*form.prompts.borrow(), vec![LOGOUT_PROMPT.to_string()]);
        assert!(!fake.is_disabled());

        form.answer.set(true);
        assert!(guard.submit());
        assert!(fake.is_disabled());
    }

    #[test]
    fn test_invalid_form_is_marked_and_blocked() {
        let scheduler = Rc::new(ManualScheduler::new());
        let form = Rc::new(FakeForm::default());
        let (fake, button) = button();
        let guard = SubmitGuard::new(form.clone(), scheduler)
            .validating()
            .holding(button, PROCESSING_LABEL, SUBMIT_RELEASE_MS);

        assert!(!guard.submit());
        assert!(form.validated.get());
        assert!(!fake.is_disabled());

        form.valid.set(true);
        assert!(guard.submit());
    }

    #[test]
    fn test_logout_action_match() {
        assert!(is_logout_action("/accounts/logout/"));
        assert!(!is_logout_action("/accounts/login/"));
        let guard = SubmitGuard::new(Rc::new(FakeForm::default()), Rc::new(ManualScheduler::new()));
        assert!(guard.is_noop());
    }
}
