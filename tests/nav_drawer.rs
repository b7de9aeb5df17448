//! Mobile drawer tests - state machine, backdrop, focus trap and persistence

use std::rc::Rc;

use studsite::config::SiteConfig;
use studsite::nav::{ClickTarget, CloseReason, DrawerSurface, NavController, NavKey};
use studsite::store::{KvStore, MemoryStore};

/// Element the user had focused before opening the drawer.
const PAGE_BUTTON: &str = "page-button";

#[derive(Debug)]
struct FakeDrawer {
    open: bool,
    focusables: Vec<&'static str>,
    active: Option<&'static str>,
    backdrops_created: usize,
    backdrop_shown: bool,
    key_listener: bool,
}

impl FakeDrawer {
    fn with_links(links: &[&'static str]) -> Self {
        Self {
            open: false,
            focusables: links.to_vec(),
            active: Some(PAGE_BUTTON),
            backdrops_created: 0,
            backdrop_shown: false,
            key_listener: false,
        }
    }
}

impl DrawerSurface for FakeDrawer {
    type Focus = &'static str;

    fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    fn active_element(&self) -> Option<&'static str> {
        self.active
    }

    fn focusables(&self) -> Vec<&'static str> {
        self.focusables.clone()
    }

    fn focus(&mut self, target: &&'static str) {
        self.active = Some(*target);
    }

    fn show_backdrop(&mut self, show: bool) {
        if show && self.backdrops_created == 0 {
            self.backdrops_created += 1;
        }
        self.backdrop_shown = show && self.backdrops_created > 0;
    }

    fn set_key_listener(&mut self, installed: bool) {
        self.key_listener = installed;
    }
}

type Ctrl = NavController<Rc<MemoryStore>, FakeDrawer>;

fn controller() -> (Ctrl, Rc<MemoryStore>) {
    controller_with(MemoryStore::new())
}

fn controller_with(store: MemoryStore) -> (Ctrl, Rc<MemoryStore>) {
    let store = Rc::new(store);
    let drawer = FakeDrawer::with_links(&["home", "shop", "close-btn"]);
    let ctrl = NavController::new(Rc::clone(&store), drawer, &SiteConfig::default());
    (ctrl, store)
}

fn assert_closed(ctrl: &Ctrl, store: &MemoryStore) {
    let d = ctrl.surface();
    assert!(!ctrl.is_open());
    assert!(!d.open);
    assert!(!d.backdrop_shown, "backdrop must be hidden");
    assert!(!d.key_listener, "keydown listener must be removed");
    assert_eq!(d.active, Some(PAGE_BUTTON), "focus must return to the opener");
    assert_eq!(store.get("menuOpen").as_deref(), Some("false"));
}

#[test]
fn opening_sets_up_drawer() {
    let (mut ctrl, store) = controller();
    ctrl.toggle();

    let d = ctrl.surface();
    assert!(ctrl.is_open());
    assert!(d.open);
    assert!(d.backdrop_shown);
    assert!(d.key_listener);
    assert_eq!(d.active, Some("home"));
    assert_eq!(store.get("menuOpen").as_deref(), Some("true"));
}

#[test]
fn every_close_trigger_restores_closed_state() {
    type Trigger = fn(&mut Ctrl);
    let triggers: [(&str, Trigger); 6] = [
        ("toggle", |c| c.toggle()),
        ("escape", |c| {
            c.on_key(NavKey::Escape);
        }),
        ("backdrop", |c| c.on_backdrop_click()),
        ("outside", |c| c.on_document_click(ClickTarget::Outside)),
        ("link", |c| {
            assert!(c.on_link_click());
            assert!(c.finish_link_close());
        }),
        ("resize", |c| c.on_resize(1200.0)),
    ];

    for (name, trigger) in triggers {
        let (mut ctrl, store) = controller();
        ctrl.toggle();
        assert!(ctrl.is_open(), "{name}: drawer should open");
        trigger(&mut ctrl);
        assert_closed(&ctrl, &store);
    }
}

#[test]
fn mixed_sequence_ends_closed() {
    let (mut ctrl, store) = controller();
    ctrl.toggle();
    ctrl.on_key(NavKey::Tab);
    ctrl.on_document_click(ClickTarget::Drawer);
    ctrl.on_document_click(ClickTarget::Backdrop);
    ctrl.toggle();
    ctrl.on_resize(500.0);
    ctrl.on_key(NavKey::Escape);
    assert_closed(&ctrl, &store);
}

#[test]
fn backdrop_is_created_once() {
    let (mut ctrl, _store) = controller();
    for _ in 0..3 {
        ctrl.toggle();
        ctrl.toggle();
    }
    assert_eq!(ctrl.surface().backdrops_created, 1);
}

#[test]
fn clicks_inside_drawer_or_on_toggle_keep_it_open() {
    let (mut ctrl, _store) = controller();
    ctrl.toggle();
    ctrl.on_document_click(ClickTarget::Drawer);
    ctrl.on_document_click(ClickTarget::Toggle);
    assert!(ctrl.is_open());
}

#[test]
fn tab_on_last_wraps_to_first() {
    let (mut ctrl, _store) = controller();
    ctrl.toggle();
    ctrl.surface_mut().focus(&"close-btn");

    assert!(ctrl.on_key(NavKey::Tab));
    assert_eq!(ctrl.surface().active, Some("home"));
}

#[test]
fn shift_tab_on_first_wraps_to_last() {
    let (mut ctrl, _store) = controller();
    ctrl.toggle();
    assert_eq!(ctrl.surface().active, Some("home"));

    assert!(ctrl.on_key(NavKey::ShiftTab));
    assert_eq!(ctrl.surface().active, Some("close-btn"));
}

#[test]
fn tab_in_the_middle_is_left_to_the_browser() {
    let (mut ctrl, _store) = controller();
    ctrl.toggle();
    ctrl.surface_mut().focus(&"shop");

    assert!(!ctrl.on_key(NavKey::Tab));
    assert!(!ctrl.on_key(NavKey::ShiftTab));
    assert_eq!(ctrl.surface().active, Some("shop"));
}

#[test]
fn shift_tab_from_outside_drawer_wraps_to_last() {
    let (mut ctrl, _store) = controller();
    ctrl.toggle();
    ctrl.surface_mut().focus(&"somewhere-else");

    assert!(ctrl.on_key(NavKey::ShiftTab));
    assert_eq!(ctrl.surface().active, Some("close-btn"));
}

#[test]
fn trap_without_focusables_does_nothing() {
    let store = Rc::new(MemoryStore::new());
    let mut ctrl = NavController::new(Rc::clone(&store), FakeDrawer::with_links(&[]), &SiteConfig::default());
    ctrl.toggle();
    assert_eq!(ctrl.surface().active, Some(PAGE_BUTTON));
    assert!(!ctrl.on_key(NavKey::Tab));
    assert!(!ctrl.on_key(NavKey::ShiftTab));
}

#[test]
fn keys_are_ignored_while_closed() {
    let (mut ctrl, store) = controller();
    assert!(!ctrl.on_key(NavKey::Tab));
    ctrl.on_key(NavKey::Escape);
    assert!(!ctrl.is_open());
    assert_eq!(store.get("menuOpen"), None);
}

#[test]
fn close_when_already_closed_is_a_no_op() {
    let (mut ctrl, store) = controller();
    assert!(!ctrl.close(CloseReason::Escape));
    ctrl.on_resize(1600.0);
    ctrl.on_backdrop_click();
    ctrl.on_document_click(ClickTarget::Outside);
    assert!(!ctrl.on_link_click());
    assert!(store.is_empty());
    assert_eq!(ctrl.surface().backdrops_created, 0);
}

#[test]
fn narrow_resize_keeps_drawer_open() {
    let (mut ctrl, _store) = controller();
    ctrl.toggle();
    ctrl.on_resize(760.0);
    assert!(ctrl.is_open());
    ctrl.on_resize(761.0);
    assert!(!ctrl.is_open());
}

#[test]
fn restore_reopens_on_narrow_viewport() {
    let (mut ctrl, _store) = controller_with(MemoryStore::with(&[("menuOpen", "true")]));
    assert!(ctrl.restore(375.0));
    assert!(ctrl.is_open());
    assert!(ctrl.surface().key_listener);
}

#[test]
fn restore_skipped_on_wide_viewport_or_closed_flag() {
    let (mut wide, _) = controller_with(MemoryStore::with(&[("menuOpen", "true")]));
    assert!(!wide.restore(1024.0));
    assert!(!wide.is_open());

    let (mut closed, _) = controller_with(MemoryStore::with(&[("menuOpen", "false")]));
    assert!(!closed.restore(375.0));
    assert!(!closed.is_open());
}

#[test]
fn custom_breakpoint_and_key_are_honored() {
    let config = SiteConfig::from_json(r#"{"menu_key": "drawer", "nav_breakpoint_px": 900}"#).unwrap();
    let store = Rc::new(MemoryStore::with(&[("drawer", "true")]));
    let mut ctrl = NavController::new(Rc::clone(&store), FakeDrawer::with_links(&["a"]), &config);

    assert!(ctrl.restore(880.0));
    ctrl.on_resize(901.0);
    assert!(!ctrl.is_open());
    assert_eq!(store.get("drawer").as_deref(), Some("false"));
    assert_eq!(store.get("menuOpen"), None);
}
