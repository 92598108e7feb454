//! Tab Controller
//!
//! Profile-page tabs: one active tab/pane pair, remembered for the session.

use std::rc::Rc;

use crate::state::UiState;

/// Tab buttons and panes on the page
pub trait TabView {
    fn has_pane(&self, tab_id: &str) -> bool;
    /// Deactivate every tab and pane
    fn clear_active(&self);
    fn mark_active(&self, tab_id: &str);
    /// Whether the pane shows validation errors
    fn pane_has_errors(&self, tab_id: &str) -> bool;
}

pub struct TabController {
    view: Rc<dyn TabView>,
    state: Rc<UiState>,
    /// Pane forced active when it holds form errors
    error_tab: Option<String>,
}

impl TabController {
    pub fn new(view: Rc<dyn TabView>, state: Rc<UiState>, error_tab: Option<String>) -> Self {
        Self { view, state, error_tab }
    }

    /// Show `tab_id` if its pane exists
    pub fn activate(&self, tab_id: &str) -> bool {
        if !self.view.has_pane(tab_id) {
            tracing::debug!(tab = tab_id, "no pane for tab");
            return false;
        }
        self.view.clear_active();
        self.view.mark_active(tab_id);
        true
    }

    /// User clicked a tab
    pub fn select(&self, tab_id: &str) -> bool {
        let shown = self.activate(tab_id);
        if shown {
            self.state.remember_tab(tab_id);
        }
        shown
    }

    /// Page load: URL hash first, then the remembered tab; an erroring pane overrides both.
    /// Returns the tab left active, if any was chosen.
    pub fn restore(&self, hash: Option<&str>) -> Option<String> {
        let from_hash = hash
            .map(|h| h.trim_start_matches('#'))
            .filter(|h| !h.is_empty() && self.view.has_pane(h))
            .map(str::to_string);
        let chosen = from_hash.or_else(|| self.state.saved_tab().filter(|id| self.view.has_pane(id)));
        if let Some(id) = &chosen {
            self.activate(id);
        }

        if let Some(error_tab) = &self.error_tab {
            if self.view.pane_has_errors(error_tab) && self.activate(error_tab) {
                return Some(error_tab.clone());
            }
        }
        chosen
    }
}
