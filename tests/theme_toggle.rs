//! Theme toggle tests - body class, icons and persisted preference stay in step

use std::rc::Rc;

use studsite::store::{KvStore, MemoryStore};
use studsite::theme::{ThemePreference, ThemeSurface, ThemeToggle, ICON_DARK, ICON_LIGHT};

#[derive(Debug, Default)]
struct FakePage {
    body_dark: bool,
    icon: String,
}

impl ThemeSurface for FakePage {
    fn body_is_dark(&self) -> bool {
        self.body_dark
    }

    fn set_body_dark(&mut self, dark: bool) {
        self.body_dark = dark;
    }

    fn set_icon_class(&mut self, class: &str) {
        self.icon = class.to_string();
    }
}

#[test]
fn defaults_to_light_without_stored_value() {
    let store = Rc::new(MemoryStore::new());
    let toggle = ThemeToggle::attach(Rc::clone(&store), FakePage::default(), "theme", 1).unwrap();

    assert_eq!(toggle.current(), ThemePreference::Light);
    assert!(!toggle.surface().body_dark);
    assert_eq!(toggle.surface().icon, ICON_LIGHT);
    // Nothing is written until the user toggles.
    assert!(store.is_empty());
}

#[test]
fn stored_dark_preference_is_applied_on_load() {
    let store = MemoryStore::with(&[("theme", "dark")]);
    let toggle = ThemeToggle::attach(store, FakePage::default(), "theme", 2).unwrap();

    assert!(toggle.surface().body_dark);
    assert_eq!(toggle.surface().icon, ICON_DARK);
}

#[test]
fn toggle_persists_applied_state() {
    let store = Rc::new(MemoryStore::new());
    let mut toggle = ThemeToggle::attach(Rc::clone(&store), FakePage::default(), "theme", 1).unwrap();

    for _ in 0..5 {
        let now = toggle.toggle();
        assert_eq!(store.get("theme"), Some(now.to_string()));
        assert_eq!(toggle.surface().body_dark, now.is_dark());
        assert_eq!(toggle.surface().icon, now.icon_class());
    }
}

#[test]
fn toggling_twice_restores_original_state() {
    let store = MemoryStore::with(&[("theme", "dark")]);
    let mut toggle = ThemeToggle::attach(store, FakePage::default(), "theme", 1).unwrap();

    let before = (toggle.surface().body_dark, toggle.surface().icon.clone());
    toggle.toggle();
    assert_ne!(toggle.surface().body_dark, before.0);
    toggle.toggle();
    assert_eq!((toggle.surface().body_dark, toggle.surface().icon.clone()), before);
}

#[test]
fn no_buttons_means_no_component_and_no_changes() {
    let store = Rc::new(MemoryStore::with(&[("theme", "dark")]));
    let toggle = ThemeToggle::attach(
        Rc::clone(&store),
        FakePage::default(),
        "theme",
        0,
    );

    assert!(toggle.is_none());
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
}
