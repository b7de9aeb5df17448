//! Navigation: active-link detection and the mobile drawer state machine.
//!
//! The drawer is `Closed` initially. Opening captures the focused element,
//! moves focus into the drawer, shows the backdrop, persists the open flag
//! and installs the keydown focus trap. Every close path undoes all of that
//! and hands focus back.

use std::fmt;

use crate::config::SiteConfig;
use crate::store::{self, KvStore};

/// Class added to links that point at the current page
pub const ACTIVE_CLASS: &str = "active-nav";

/// Page name used when the path ends in `/`
pub const INDEX_PAGE: &str = "index.html";

/// Strip query and fragment from a URL or path
#[inline]
fn strip_query_frag(s: &str) -> &str {
    match s.find(['?', '#']) {
        Some(i) => &s[..i],
        None => s,
    }
}

#[inline]
fn last_segment(s: &str) -> &str {
    s.rsplit('/').next().unwrap_or_default()
}

/// Lowercased filename of the current page (`index.html` for directory paths).
pub fn page_name(pathname: &str) -> String {
    let seg = last_segment(strip_query_frag(pathname));
    if seg.is_empty() {
        INDEX_PAGE.to_string()
    } else {
        seg.to_ascii_lowercase()
    }
}

/// Lowercased filename a link points at (may be empty, e.g. for `#top`).
pub fn href_target(href: &str) -> String {
    last_segment(strip_query_frag(href.trim())).to_ascii_lowercase()
}

/// Indexes of the links whose target is the current page.
pub fn active_link_indexes<'a, I>(hrefs: I, pathname: &str) -> Vec<usize>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let page = page_name(pathname);
    hrefs
        .into_iter()
        .enumerate()
        .filter_map(|(i, href)| {
            let target = href_target(href.unwrap_or_default());
            (!target.is_empty() && target == page).then_some(i)
        })
        .collect()
}

/// Keys the focus trap cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Tab,
    ShiftTab,
    Escape,
    Other,
}

impl NavKey {
    /// Map a `KeyboardEvent.key` plus shift state.
    pub fn from_event(key: &str, shift: bool) -> Self {
        match key {
            "Tab" if shift => NavKey::ShiftTab,
            "Tab" => NavKey::Tab,
            "Escape" | "Esc" => NavKey::Escape,
            _ => NavKey::Other,
        }
    }
}

/// Where a document-level click landed, relative to the drawer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Drawer,
    Toggle,
    Outside,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    Toggle,
    Escape,
    Backdrop,
    OutsideClick,
    LinkClick,
    Resize,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CloseReason::Toggle => "toggle",
            CloseReason::Escape => "escape",
            CloseReason::Backdrop => "backdrop",
            CloseReason::OutsideClick => "outside-click",
            CloseReason::LinkClick => "link-click",
            CloseReason::Resize => "resize",
        };
        f.write_str(s)
    }
}

/// What the drawer controller needs from the page.
pub trait DrawerSurface {
    /// Handle to a focusable element.
    type Focus: Clone + PartialEq;

    /// Reflect open/closed on the drawer and its toggle (class, aria state, icon).
    fn set_open(&mut self, open: bool);
    fn active_element(&self) -> Option<Self::Focus>;
    /// Focusable elements inside the drawer, in document order.
    fn focusables(&self) -> Vec<Self::Focus>;
    fn focus(&mut self, target: &Self::Focus);
    /// Show or hide the backdrop, creating it on first use.
    fn show_backdrop(&mut self, show: bool);
    /// Install or remove the document keydown listener.
    fn set_key_listener(&mut self, installed: bool);
}

#[derive(Clone, Debug, PartialEq)]
enum DrawerState<F> {
    Closed,
    Open { restore_focus: Option<F> },
}

pub struct NavController<S: KvStore, D: DrawerSurface> {
    store: S,
    surface: D,
    menu_key: String,
    breakpoint_px: u32,
    state: DrawerState<D::Focus>,
}

impl<S: KvStore, D: DrawerSurface> NavController<S, D> {
    pub fn new(store: S, surface: D, config: &SiteConfig) -> Self {
        Self {
            store,
            surface,
            menu_key: config.menu_key.clone(),
            breakpoint_px: config.nav_breakpoint_px,
            state: DrawerState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DrawerState::Open { .. })
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    fn is_narrow(&self, width: f64) -> bool {
        width <= f64::from(self.breakpoint_px)
    }

    /// Reopen the drawer on load if it was left open on a narrow viewport.
    pub fn restore(&mut self, viewport_width: f64) -> bool {
        if self.is_narrow(viewport_width) && store::get_flag(&self.store, &self.menu_key) {
            log::debug!("[stud] restoring open drawer");
            self.open();
            true
        } else {
            false
        }
    }

    /// Toggle control activated.
    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close(CloseReason::Toggle);
        } else {
            self.open();
        }
    }

    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.surface.set_open(true);
        let restore_focus = self.surface.active_element();
        if let Some(first) = self.surface.focusables().first() {
            self.surface.focus(first);
        }
        self.surface.show_backdrop(true);
        store::set_flag(&self.store, &self.menu_key, true);
        self.surface.set_key_listener(true);
        self.state = DrawerState::Open { restore_focus };
    }

    /// Close the drawer. Returns false if it was already closed.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        let restore_focus = match std::mem::replace(&mut self.state, DrawerState::Closed) {
            DrawerState::Closed => return false,
            DrawerState::Open { restore_focus } => restore_focus,
        };
        self.surface.set_open(false);
        store::set_flag(&self.store, &self.menu_key, false);
        self.surface.show_backdrop(false);
        self.surface.set_key_listener(false);
        if let Some(target) = restore_focus {
            self.surface.focus(&target);
        }
        log::debug!("[stud] drawer closed ({reason})");
        true
    }

    /// Keydown while open. Returns true when the browser default must be prevented.
    pub fn on_key(&mut self, key: NavKey) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            NavKey::Tab | NavKey::ShiftTab => {
                let focusables = self.surface.focusables();
                let (Some(first), Some(last)) = (focusables.first(), focusables.last()) else {
                    return false;
                };
                let active = self.surface.active_element();
                let idx = active
                    .as_ref()
                    .and_then(|a| focusables.iter().position(|f| f == a));
                if key == NavKey::ShiftTab {
                    if matches!(idx, None | Some(0)) {
                        self.surface.focus(last);
                        return true;
                    }
                } else if idx == Some(focusables.len() - 1) {
                    self.surface.focus(first);
                    return true;
                }
                false
            }
            NavKey::Escape => {
                self.close(CloseReason::Escape);
                false
            }
            NavKey::Other => false,
        }
    }

    /// Click anywhere in the document.
    pub fn on_document_click(&mut self, target: ClickTarget) {
        if !self.is_open() {
            return;
        }
        match target {
            ClickTarget::Backdrop => {
                self.close(CloseReason::Backdrop);
            }
            ClickTarget::Outside => {
                self.close(CloseReason::OutsideClick);
            }
            ClickTarget::Drawer | ClickTarget::Toggle => {}
        }
    }

    /// Click bound directly on the backdrop element.
    pub fn on_backdrop_click(&mut self) {
        self.close(CloseReason::Backdrop);
    }

    /// A link inside the drawer was clicked. Returns true if a deferred close
    /// should be scheduled; the caller then invokes [`Self::finish_link_close`].
    pub fn on_link_click(&self) -> bool {
        self.is_open()
    }

    pub fn finish_link_close(&mut self) -> bool {
        self.close(CloseReason::LinkClick)
    }

    pub fn on_resize(&mut self, viewport_width: f64) {
        if !self.is_narrow(viewport_width) {
            self.close(CloseReason::Resize);
        }
    }
}
