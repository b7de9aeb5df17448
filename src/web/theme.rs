use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Element, HtmlElement};

use super::dom::{listen, QueryAll};
use crate::config::SiteConfig;
use crate::store::KvStore;
use crate::theme::{ThemeSurface, ThemeToggle};

const DARK_CLASS: &str = "dark";

struct DomTheme {
    body: HtmlElement,
    icons: Vec<Element>,
}

impl ThemeSurface for DomTheme {
    fn body_is_dark(&self) -> bool {
        self.body.class_list().contains(DARK_CLASS)
    }

    fn set_body_dark(&mut self, dark: bool) {
        let _ = self.body.class_list().toggle_with_force(DARK_CLASS, dark);
    }

    fn set_icon_class(&mut self, class: &str) {
        for icon in &self.icons {
            icon.set_class_name(class);
        }
    }
}

/// Bind every `.theme-toggle` button. Returns false when there are none.
pub fn init(doc: &Document, store: Rc<dyn KvStore>, config: &SiteConfig) -> bool {
    let buttons = doc.query_all(".theme-toggle");
    let Some(body) = doc.body() else {
        return false;
    };
    let icons = buttons
        .iter()
        .filter_map(|b| b.query_selector(".theme-icon").ok().flatten())
        .collect();

    let Some(toggle) = ThemeToggle::attach(store, DomTheme { body, icons }, &config.theme_key, buttons.len())
    else {
        return false;
    };
    let toggle = Rc::new(RefCell::new(toggle));

    for button in &buttons {
        let toggle = Rc::clone(&toggle);
        let bound = listen(button, "click", move |_| {
            let now = toggle.borrow_mut().toggle();
            log::debug!("[stud] theme switched to {now}");
        });
        if let Err(e) = bound {
            log::error!("[stud] theme toggle bind failed: {e}");
        }
    }
    true
}
