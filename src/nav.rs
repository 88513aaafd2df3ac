use std::cell::Cell;

use web_sys::Element;

use crate::dom;

pub const ACTIVE_CLASS: &str = "active";

/// Open/closed state of the mobile menu.
#[derive(Debug, Default)]
pub struct NavMenu {
    open: Cell<bool>,
}

impl NavMenu {
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn toggle(&self) -> bool {
        let open = !self.open.get();
        self.open.set(open);
        open
    }

    pub fn close(&self) {
        self.open.set(false);
    }
}

/// The hamburger button and the panel it reveals.
pub struct NavElements {
    pub hamburger: Element,
    pub menu: Element,
}

impl NavElements {
    pub fn render(&self, state: &NavMenu) {
        dom::set_class(&self.hamburger, ACTIVE_CLASS, state.is_open());
        dom::set_class(&self.menu, ACTIVE_CLASS, state.is_open());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        assert!(!NavMenu::default().is_open());
    }

    #[test]
    fn toggle_flips_and_close_resets() {
        let menu = NavMenu::default();
        assert!(menu.toggle());
        assert!(menu.is_open());
        assert!(!menu.toggle());
        menu.toggle();
        menu.close();
        assert!(!menu.is_open());
        menu.close();
        assert!(!menu.is_open());
    }
}
