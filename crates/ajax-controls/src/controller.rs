//! Interaction Controller
//!
//! Turns one gesture into exactly one POST, reflects the outcome on the control,
//! then reverts the control after a fixed delay.
//!
//! Per-control lifecycle: `Idle -> Pending -> {Success, Failure} -> Idle`.
//! The control stays disabled from `Pending` until the revert fires, which is what
//! keeps a control to one request in flight and one revert timer pending.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use futures::task::LocalSpawnExt;
use tracing::{debug, info, warn};

use crate::action::{ActionRequest, ActionResult, Endpoint};
use crate::control::{Control, Feedback, ResultSink};
use crate::error::{ActionError, BuildError, RegistryError};
use crate::registry::{ControlId, EventKind, EventRegistry};
use crate::runtime::Runtime;
use crate::toast::ToastLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Success,
    Failure,
}

type BuildFn = Box<dyn Fn(&dyn Control) -> Result<ActionRequest, BuildError>>;

pub struct InteractionController {
    control: Rc<dyn Control>,
    build: BuildFn,
    endpoint: Endpoint,
    feedback: Feedback,
    sinks: Vec<Box<dyn ResultSink>>,
    runtime: Runtime,
    phase: Cell<Phase>,
    /// Label captured when the gesture started, restored on revert
    original_label: RefCell<Option<String>>,
}

impl InteractionController {
    /// `build` is called on every gesture against the control's current state.
    pub fn new<B>(control: Rc<dyn Control>, build: B, endpoint: Endpoint, runtime: Runtime) -> Self
    where
        B: Fn(&dyn Control) -> Result<ActionRequest, BuildError> + 'static,
    {
        Self {
            control,
            build: Box::new(build),
            endpoint,
            feedback: Feedback::default(),
            sinks: Vec::new(),
            runtime,
            phase: Cell::new(Phase::Idle),
            original_label: RefCell::new(None),
        }
    }

    pub fn with_feedback(mut self, feedback: Feedback) -> Self {
        self.feedback = feedback;
        self
    }

    /// Add a page update applied on `success: true`
    pub fn with_sink(mut self, sink: impl ResultSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Register this controller as the `kind` handler of `id`
    pub fn bind(self, registry: &EventRegistry, id: ControlId, kind: EventKind) -> Result<Rc<Self>, RegistryError> {
        let controller = Rc::new(self);
        let handler = Rc::clone(&controller);
        let control_id = id.clone();
        registry.register(id, kind, move |gesture| {
            // The request replaces the navigation or form post, even when it is ignored.
            gesture.prevent_default();
            let Some(task) = handler.gesture() else {
                return;
            };
            if let Err(e) = handler.runtime.spawner.spawn_local(task.map(|_| ())) {
                // Nothing will settle this request; put the control back right away.
                warn!(control = %control_id, "failed to spawn request: {e}");
                handler.revert();
            }
        })?;
        Ok(controller)
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    /// Start a request cycle, or `None` if the gesture is ignored.
    ///
    /// Everything up to the network call happens synchronously, so a second gesture
    /// arriving before the returned future is polled already sees a disabled control.
    pub fn gesture(self: &Rc<Self>) -> Option<LocalBoxFuture<'static, Phase>> {
        if self.control.is_disabled() || self.phase.get() != Phase::Idle {
            debug!(path = %self.endpoint.path, "gesture ignored, request in flight");
            return None;
        }
        let request = match (self.build)(self.control.as_ref()) {
            Ok(request) => request,
            Err(e) => {
                warn!(path = %self.endpoint.path, "gesture ignored: {e}");
                return None;
            }
        };

        self.phase.set(Phase::Pending);
        self.control.set_disabled(true);
        *self.original_label.borrow_mut() = Some(self.control.label());
        if let Some(busy) = &self.feedback.busy_label {
            self.control.set_label(busy);
        }
        debug!(path = %self.endpoint.path, item = %request.item_id, "sending");

        let this = Rc::clone(self);
        Some(
            async move {
                let outcome = this.send(&request).await;
                this.settle(outcome)
            }
            .boxed_local(),
        )
    }

    async fn send(&self, request: &ActionRequest) -> Result<ActionResult, ActionError> {
        let body = self.endpoint.body(request);
        let headers: Vec<(&str, &str)> = self.runtime.token.header().into_iter().collect();
        let text = self
            .runtime
            .transport
            .post_json(&self.endpoint.path, &headers, &body)
            .await?;
        ActionResult::from_body(&text)?.accepted()
    }

    fn settle(self: &Rc<Self>, outcome: Result<ActionResult, ActionError>) -> Phase {
        let phase = match outcome {
            Ok(result) => {
                info!(path = %self.endpoint.path, "action succeeded");
                for sink in &self.sinks {
                    sink.apply(&result);
                }
                self.show(self.feedback.success_label.as_deref(), self.feedback.success_class.as_deref());
                if self.feedback.announce {
                    if let Some(message) = result.message.as_deref() {
                        self.toast(message, ToastLevel::Success);
                    }
                }
                Phase::Success
            }
            Err(e) => {
                warn!(path = %self.endpoint.path, "action failed: {e}");
                self.show(self.feedback.failure_label.as_deref(), self.feedback.failure_class.as_deref());
                if self.feedback.announce {
                    self.toast(e.message().unwrap_or("Something went wrong"), ToastLevel::Danger);
                }
                Phase::Failure
            }
        };
        self.phase.set(phase);

        let this = Rc::clone(self);
        self.runtime
            .scheduler
            .schedule(self.feedback.revert_after_ms, Box::new(move || this.revert()));
        phase
    }

    fn show(&self, label: Option<&str>, class: Option<&str>) {
        if let Some(label) = label {
            self.control.set_label(label);
        }
        if let Some(class) = class {
            if let Some(idle) = &self.feedback.idle_class {
                self.control.remove_class(idle);
            }
            self.control.add_class(class);
        }
    }

    fn toast(&self, message: &str, level: ToastLevel) {
        if let Some(toasts) = &self.runtime.toasts {
            toasts.show(message, level);
        }
    }

    /// Restore the pre-gesture look and accept gestures again
    fn revert(&self) {
        if let Some(label) = self.original_label.borrow_mut().take() {
            if self.feedback.busy_label.is_some()
                || self.feedback.success_label.is_some()
                || self.feedback.failure_label.is_some()
            {
                self.control.set_label(&label);
            }
        }
        for class in [&self.feedback.success_class, &self.feedback.failure_class].into_iter().flatten() {
            self.control.remove_class(class);
        }
        if let Some(idle) = &self.feedback.idle_class {
            self.control.add_class(idle);
        }
        self.control.set_disabled(false);
        self.phase.set(Phase::Idle);
    }
}
