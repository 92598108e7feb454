//! Runtime Seams
//!
//! Network, timers and task spawning behind traits so the controller runs the same
//! in the browser and under test.

use std::rc::Rc;

use async_trait::async_trait;
use futures::task::LocalSpawn;
use serde_json::Value;

use crate::csrf::CsrfToken;
use crate::error::ActionError;
use crate::toast::ToastQueue;

/// One-shot JSON POST
#[async_trait(?Send)]
pub trait Transport {
    /// Send `body` as JSON to `path` with extra `headers`, returning the raw response text.
    ///
    /// Any status code counts as a response; only failures to get one are errors.
    async fn post_json(&self, path: &str, headers: &[(&str, &str)], body: &Value) -> Result<String, ActionError>;
}

/// Deferred callbacks on the UI event loop
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Everything a bound control shares with the rest of the page
#[derive(Clone)]
pub struct Runtime {
    pub transport: Rc<dyn Transport>,
    pub scheduler: Rc<dyn Scheduler>,
    pub spawner: Rc<dyn LocalSpawn>,
    /// Read once at page load, never refreshed
    pub token: Rc<CsrfToken>,
    pub toasts: Option<Rc<ToastQueue>>,
}
