//! Browser bindings: implements each feature's surface trait with web-sys and
//! wires DOM events to the feature components.
//!
//! Every feature binds independently; a page missing one feature's markup
//! still gets the others.

mod color_swap;
mod dom;
mod nav;
mod reveal;
mod size_guide;
mod storage;
mod theme;

use std::fmt;
use std::rc::Rc;

use web_sys::{window, Document, Window};

pub use reveal::GsapEngine;
pub use storage::{site_store, LocalStore};

use crate::config::{SiteConfig, CONFIG_ELEMENT_ID};
use crate::platform;

/// Which features found their markup and bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Activated {
    pub theme: bool,
    pub reveal: bool,
    pub nav: bool,
    pub color_swap: bool,
    pub size_guide: bool,
}

impl fmt::Display for Activated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "theme={} reveal={} nav={} color_swap={} size_guide={}",
            self.theme, self.reveal, self.nav, self.color_swap, self.size_guide
        )
    }
}

fn load_config(doc: &Document) -> SiteConfig {
    let raw = doc
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    SiteConfig::from_json_or_default(raw.as_deref())
}

/// Bind all features against the current document.
pub fn init_all(win: &Window, doc: &Document, config: SiteConfig) -> Activated {
    let store = site_store(win);
    let config = Rc::new(config);
    let activated = Activated {
        theme: theme::init(doc, Rc::clone(&store), &config),
        reveal: reveal::init(win, doc, &config),
        nav: nav::init(win, doc, Rc::clone(&store), &config),
        color_swap: color_swap::init(doc, &config),
        size_guide: size_guide::init(doc, &config),
    };
    log::debug!("[stud] features: {activated}");
    activated
}

/// Page entry: set up logging, read config, and bind features once the DOM is parsed.
pub fn boot() {
    platform::install_panic_hook();
    platform::init_logging(log::Level::Info);

    let Some(win) = window() else {
        return;
    };
    let Some(doc) = win.document() else {
        return;
    };

    let config = load_config(&doc);
    if let Ok(level) = config.level() {
        platform::init_logging(level);
    }

    if doc.ready_state() == "loading" {
        let (w, d) = (win.clone(), doc.clone());
        let mut config = Some(config);
        let bound = dom::listen(&doc, "DOMContentLoaded", move |_| {
            if let Some(config) = config.take() {
                init_all(&w, &d, config);
            }
        });
        if let Err(e) = bound {
            log::error!("[stud] could not wait for DOMContentLoaded: {e}");
        }
    } else {
        init_all(&win, &doc, config);
    }
}
