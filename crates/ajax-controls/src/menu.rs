//! Mobile Menu
//!
//! Slide-in navigation with an overlay. The page behind it stops scrolling while open.

use std::rc::Rc;

pub trait MenuView {
    fn is_open(&self) -> bool;
    /// Show or hide the menu and its overlay together
    fn set_open(&self, open: bool);
    fn lock_scroll(&self, locked: bool);
}

pub struct MobileMenu {
    view: Rc<dyn MenuView>,
}

impl MobileMenu {
    pub fn new(view: Rc<dyn MenuView>) -> Self {
        Self { view }
    }

    /// Flip the menu; returns whether it is now open
    pub fn toggle(&self) -> bool {
        let open = !self.view.is_open();
        self.view.set_open(open);
        self.view.lock_scroll(open);
        open
    }

    pub fn close(&self) {
        self.view.set_open(false);
        self.view.lock_scroll(false);
    }
}
