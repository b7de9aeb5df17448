use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::Function;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, Node, Window};

use super::dom::{callback, listen, QueryAll};
use crate::config::SiteConfig;
use crate::nav::{active_link_indexes, ClickTarget, DrawerSurface, NavController, NavKey, ACTIVE_CLASS};
use crate::store::KvStore;

const OPEN_CLASS: &str = "open";
const SHOW_CLASS: &str = "show";
const BACKDROP_CLASS: &str = "menu-backdrop";
const CHEVRON_CLASS: &str = "fa-chevron-down";
const FOCUSABLE: &str = "a.nav-link, button";

type Controller = NavController<Rc<dyn KvStore>, DomDrawer>;

pub struct DomDrawer {
    doc: Document,
    toggle: Element,
    drawer: Element,
    icon: Option<Element>,
    backdrop: Option<Element>,
    keydown: Option<Function>,
    backdrop_click: Option<Function>,
}

impl DomDrawer {
    fn new(doc: Document, toggle: Element, drawer: Element) -> Self {
        let icon = toggle.query_selector("i").ok().flatten();
        Self {
            doc,
            toggle,
            drawer,
            icon,
            backdrop: None,
            keydown: None,
            backdrop_click: None,
        }
    }

    /// Find or create the single backdrop, binding its click handler once.
    fn ensure_backdrop(&mut self) -> Option<Element> {
        if self.backdrop.is_none() {
            self.backdrop = match self.doc.query_selector(&format!(".{BACKDROP_CLASS}")).ok().flatten() {
                Some(existing) => Some(existing),
                None => {
                    let el = self.doc.create_element("div").ok()?;
                    el.set_class_name(BACKDROP_CLASS);
                    self.doc.body()?.append_child(&el).ok()?;
                    Some(el)
                }
            };
        }
        let backdrop = self.backdrop.clone()?;
        if backdrop.get_attribute("data-bound").is_none() {
            if let Some(f) = &self.backdrop_click {
                if backdrop.add_event_listener_with_callback("click", f).is_ok() {
                    let _ = backdrop.set_attribute("data-bound", "true");
                }
            }
        }
        Some(backdrop)
    }

    fn classify(&self, target: &Node) -> ClickTarget {
        if self.backdrop.as_ref().is_some_and(|b| AsRef::<Node>::as_ref(b) == target) {
            ClickTarget::Backdrop
        } else if self.drawer.contains(Some(target)) {
            ClickTarget::Drawer
        } else if self.toggle.contains(Some(target)) {
            ClickTarget::Toggle
        } else {
            ClickTarget::Outside
        }
    }
}

impl DrawerSurface for DomDrawer {
    type Focus = HtmlElement;

    fn set_open(&mut self, open: bool) {
        let _ = self.drawer.class_list().toggle_with_force(OPEN_CLASS, open);
        let _ = self
            .toggle
            .set_attribute("aria-expanded", if open { "true" } else { "false" });
        let _ = self
            .toggle
            .set_attribute("aria-label", if open { "Close menu" } else { "Open menu" });
        // CSS rotates the chevron off aria-expanded; only the base icon is kept here.
        if let Some(icon) = &self.icon {
            if !icon.class_list().contains(CHEVRON_CLASS) {
                icon.set_class_name("fas fa-chevron-down");
            }
        }
    }

    fn active_element(&self) -> Option<HtmlElement> {
        self.doc.active_element()?.dyn_into::<HtmlElement>().ok()
    }

    fn focusables(&self) -> Vec<HtmlElement> {
        self.drawer
            .query_all(FOCUSABLE)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn focus(&mut self, target: &HtmlElement) {
        let _ = target.focus();
    }

    fn show_backdrop(&mut self, show: bool) {
        let backdrop = if show {
            self.ensure_backdrop()
        } else {
            self.backdrop.clone()
        };
        if let Some(b) = backdrop {
            let _ = b.class_list().toggle_with_force(SHOW_CLASS, show);
        }
    }

    fn set_key_listener(&mut self, installed: bool) {
        let Some(f) = &self.keydown else {
            return;
        };
        let res = if installed {
            self.doc.add_event_listener_with_callback("keydown", f)
        } else {
            self.doc.remove_event_listener_with_callback("keydown", f)
        };
        if let Err(e) = res {
            log::debug!("[stud] keydown listener update failed: {e:?}");
        }
    }
}

/// Run `f` on the controller unless a handler further up the stack holds it.
fn with_controller(ctrl: &Rc<RefCell<Controller>>, f: impl FnOnce(&mut Controller)) {
    let Ok(mut ctrl) = ctrl.try_borrow_mut() else {
        log::debug!("[stud] drawer busy; event dropped");
        return;
    };
    f(&mut ctrl);
}

fn viewport_width(win: &Window) -> Option<f64> {
    win.inner_width().ok()?.as_f64()
}

/// Mark every `a.nav-link` pointing at the current page.
fn mark_active_links(win: &Window, doc: &Document) -> usize {
    let pathname = win.location().pathname().unwrap_or_default();
    let links = doc.query_all("a.nav-link");
    let hrefs: Vec<Option<String>> = links.iter().map(|a| a.get_attribute("href")).collect();
    let active = active_link_indexes(hrefs.iter().map(Option::as_deref), &pathname);
    for &i in &active {
        let _ = links[i].class_list().add_1(ACTIVE_CLASS);
    }
    active.len()
}

/// Active-link marking plus the mobile drawer. Returns true when the drawer
/// (`#mobile-toggle` + `#mobile-navigation`) is present and bound.
pub fn init(win: &Window, doc: &Document, store: Rc<dyn KvStore>, config: &SiteConfig) -> bool {
    let marked = mark_active_links(win, doc);
    log::debug!("[stud] {marked} nav links marked active");

    let (Some(toggle), Some(drawer)) = (
        doc.get_element_by_id("mobile-toggle"),
        doc.get_element_by_id("mobile-navigation"),
    ) else {
        return false;
    };

    let ctrl = Rc::new(RefCell::new(NavController::new(
        store,
        DomDrawer::new(doc.clone(), toggle.clone(), drawer.clone()),
        config,
    )));

    {
        let w = Rc::clone(&ctrl);
        let keydown = callback(move |e: Event| {
            let Some(k) = e.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = NavKey::from_event(&k.key(), k.shift_key());
            with_controller(&w, |c| {
                if c.on_key(key) {
                    e.prevent_default();
                }
            });
        });
        let w = Rc::clone(&ctrl);
        let backdrop_click = callback(move |_| with_controller(&w, |c| c.on_backdrop_click()));
        let mut c = ctrl.borrow_mut();
        c.surface_mut().keydown = Some(keydown);
        c.surface_mut().backdrop_click = Some(backdrop_click);
    }

    let w = Rc::clone(&ctrl);
    if let Err(e) = listen(&toggle, "click", move |_| with_controller(&w, |c| c.toggle())) {
        log::error!("[stud] drawer toggle bind failed: {e}");
        return false;
    }

    let delay = config.nav_close_delay_ms;
    for link in drawer.query_all("a.nav-link") {
        let w = Rc::clone(&ctrl);
        let href = link.get_attribute("href").unwrap_or_default();
        let _ = listen(&link, "click", move |_| {
            log::debug!("[stud] nav link clicked: {href}");
            let open = w.try_borrow().is_ok_and(|c| c.on_link_click());
            if open {
                // Deferred so the browser starts navigating before the drawer animates shut.
                let w = Rc::clone(&w);
                Timeout::new(delay, move || {
                    with_controller(&w, |c| {
                        c.finish_link_close();
                    })
                })
                .forget();
            }
        });
    }

    let w = Rc::clone(&ctrl);
    let _ = listen(doc, "click", move |e: Event| {
        let Some(target) = e.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
            return;
        };
        with_controller(&w, |c| {
            let hit = c.surface().classify(&target);
            c.on_document_click(hit);
        });
    });

    let (w, win_resize) = (Rc::clone(&ctrl), win.clone());
    let _ = listen(win, "resize", move |_| {
        if let Some(width) = viewport_width(&win_resize) {
            with_controller(&w, |c| c.on_resize(width));
        }
    });

    if let Some(width) = viewport_width(win) {
        ctrl.borrow_mut().restore(width);
    }
    true
}
