//! Test doubles: in-memory control, display target, transport and timer.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::LocalPool;
use serde_json::Value;

use crate::control::{Control, TextTarget};
use crate::csrf::{CsrfToken, DEFAULT_HEADER};
use crate::error::ActionError;
use crate::registry::EventRegistry;
use crate::runtime::{Runtime, Scheduler, Transport};
use crate::toast::{ToastQueue, ALERT_DISMISS_MS};

#[derive(Default)]
pub struct FakeControl {
    label: RefCell<String>,
    label_writes: Cell<u32>,
    disabled: Cell<bool>,
    classes: RefCell<BTreeSet<String>>,
    data: RefCell<HashMap<String, String>>,
    fields: RefCell<HashMap<String, String>>,
    value: RefCell<Option<String>>,
}

impl FakeControl {
    pub fn new(label: &str) -> Self {
        Self {
            label: RefCell::new(label.to_string()),
            ..Default::default()
        }
    }

    pub fn with_data(self, key: &str, value: &str) -> Self {
        self.set_data(key, value);
        self
    }

    pub fn with_field(self, name: &str, value: &str) -> Self {
        self.fields.borrow_mut().insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        *self.value.borrow_mut() = Some(value.to_string());
        self
    }

    pub fn set_data(&self, key: &str, value: &str) {
        self.data.borrow_mut().insert(key.to_string(), value.to_string());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }

    pub fn label_writes(&self) -> u32 {
        self.label_writes.get()
    }
}

impl Control for FakeControl {
    fn label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_label(&self, label: &str) {
        self.label_writes.set(self.label_writes.get() + 1);
        *self.label.borrow_mut() = label.to_string();
    }

    fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    fn add_class(&self, class: &str) {
        self.classes.borrow_mut().insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().remove(class);
    }

    fn data(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }

    fn field(&self, name: &str) -> Option<String> {
        self.fields.borrow().get(name).cloned()
    }

    fn value(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

pub struct FakeTarget {
    text: RefCell<String>,
    writes: Cell<u32>,
}

impl FakeTarget {
    pub fn new(text: &str) -> Self {
        Self {
            text: RefCell::new(text.to_string()),
            writes: Cell::new(0),
        }
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl TextTarget for FakeTarget {
    fn set_text(&self, text: &str) {
        self.writes.set(self.writes.get() + 1);
        *self.text.borrow_mut() = text.to_string();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

type Reply = Result<String, ActionError>;

enum Queued {
    Ready(Reply),
    Held(oneshot::Receiver<Reply>),
}

/// Replies are handed out in call order
#[derive(Default)]
pub struct FakeTransport {
    calls: RefCell<Vec<RecordedCall>>,
    replies: RefCell<VecDeque<Queued>>,
}

impl FakeTransport {
    /// Queue an immediate reply
    pub fn reply(&self, reply: Reply) {
        self.replies.borrow_mut().push_back(Queued::Ready(reply));
    }

    /// Queue a reply that stays in flight until the returned sender fires
    pub fn hold(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Queued::Held(rx));
        tx
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn post_json(&self, path: &str, headers: &[(&str, &str)], body: &Value) -> Result<String, ActionError> {
        self.calls.borrow_mut().push(RecordedCall {
            path: path.to_string(),
            headers: headers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            body: body.clone(),
        });
        let queued = self.replies.borrow_mut().pop_front();
        match queued {
            Some(Queued::Ready(reply)) => reply,
            Some(Queued::Held(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ActionError::Transport("reply dropped".to_string()))),
            None => Err(ActionError::Transport("no reply queued".to_string())),
        }
    }
}

type Task = Box<dyn FnOnce()>;

/// Timers that fire only when the test advances the clock
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<u64>,
    pending: RefCell<Vec<(u64, u64, Task)>>,
    seq: Cell<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward, running due tasks in due-time then insertion order
    pub fn advance(&self, ms: u32) {
        let target = self.now.get() + u64::from(ms);
        loop {
            let next = {
                let mut pending = self.pending.borrow_mut();
                let due = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _, _))| *at <= target)
                    .min_by_key(|(_, (at, seq, _))| (*at, *seq))
                    .map(|(index, _)| index);
                due.map(|index| pending.remove(index))
            };
            match next {
                Some((at, _, task)) => {
                    self.now.set(at);
                    task();
                }
                None => break,
            }
        }
        self.now.set(target);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.pending
            .borrow_mut()
            .push((self.now.get() + u64::from(delay_ms), seq, task));
    }
}

/// Wiring shared by controller tests
pub struct Harness {
    pub pool: LocalPool,
    pub registry: EventRegistry,
    pub transport: Rc<FakeTransport>,
    pub scheduler: Rc<ManualScheduler>,
    pub toasts: Rc<ToastQueue>,
    pub runtime: Runtime,
}

impl Harness {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let transport = Rc::new(FakeTransport::default());
        let scheduler = Rc::new(ManualScheduler::new());
        let toasts = ToastQueue::new(scheduler.clone(), ALERT_DISMISS_MS);
        let runtime = Runtime {
            transport: transport.clone(),
            scheduler: scheduler.clone(),
            spawner: Rc::new(pool.spawner()),
            token: Rc::new(CsrfToken::new(DEFAULT_HEADER, Some("test-token".to_string()))),
            toasts: Some(toasts.clone()),
        };
        Self {
            pool,
            registry: EventRegistry::new(),
            transport,
            scheduler,
            toasts,
            runtime,
        }
    }
}
