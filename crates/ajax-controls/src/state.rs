//! Shared UI State
//!
//! The page-wide state the tab and chart controllers read and write, passed to them
//! explicitly instead of living in globals.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::session::SessionStore;

/// Session key holding the last selected profile tab
pub const ACTIVE_TAB_KEY: &str = "activeProfileTab";

/// A rendered chart owned by the external chart library
pub trait ChartHandle {
    fn destroy(&self);
}

/// At most one live chart per canvas
#[derive(Default)]
pub struct ChartRegistry {
    charts: HashMap<String, Box<dyn ChartHandle>>,
}

impl ChartRegistry {
    /// Store `chart` for `canvas_id`, destroying the chart it replaces. Returns whether one was replaced.
    pub fn replace(&mut self, canvas_id: &str, chart: Box<dyn ChartHandle>) -> bool {
        match self.charts.insert(canvas_id.to_string(), chart) {
            Some(previous) => {
                previous.destroy();
                true
            }
            None => false,
        }
    }

}

pub struct UiState {
    session: Rc<dyn SessionStore>,
    tab_key: String,
    charts: RefCell<ChartRegistry>,
}

impl UiState {
    pub fn new(session: Rc<dyn SessionStore>) -> Self {
        Self::with_tab_key(session, ACTIVE_TAB_KEY)
    }

    pub fn with_tab_key(session: Rc<dyn SessionStore>, tab_key: impl Into<String>) -> Self {
        Self {
            session,
            tab_key: tab_key.into(),
            charts: RefCell::new(ChartRegistry::default()),
        }
    }

    /// Tab remembered from earlier in this session
    pub fn saved_tab(&self) -> Option<String> {
        self.session.get(&self.tab_key).filter(|id| !id.is_empty())
    }

    pub fn remember_tab(&self, tab_id: &str) {
        self.session.set(&self.tab_key, tab_id);
    }

    /// Install a chart, replacing whatever was drawn on the same canvas
    pub fn install_chart(&self, canvas_id: &str, chart: Box<dyn ChartHandle>) -> bool {
        self.charts.borrow_mut().replace(canvas_id, chart)
    }

    /// Charts currently live on the page
    pub fn chart_count(&self) -> usize {
        self.charts.borrow().charts.len()
    }
}
