//! Light/dark theme toggle.
//!
//! The preference lives in the store under `SiteConfig::theme_key` and is
//! reflected as the `dark` class on `<body>` plus the icon class of every
//! `.theme-toggle` button.

use std::fmt;

use crate::store::KvStore;

/// Icon classes for the toggle buttons
pub const ICON_DARK: &str = "theme-icon fas fa-moon";
pub const ICON_LIGHT: &str = "theme-icon fas fa-sun";

/// Persisted theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// Parse a stored value. Anything other than "dark" reads as light,
    /// matching how the body class is applied.
    pub fn from_stored(s: Option<&str>) -> Self {
        match s {
            Some("dark") => ThemePreference::Dark,
            _ => ThemePreference::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemePreference::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            ThemePreference::Light => ICON_LIGHT,
            ThemePreference::Dark => ICON_DARK,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemePreference::Light => write!(f, "light"),
            ThemePreference::Dark => write!(f, "dark"),
        }
    }
}

/// What the toggle needs from the page.
pub trait ThemeSurface {
    /// Whether `<body>` currently carries the `dark` class.
    fn body_is_dark(&self) -> bool;
    fn set_body_dark(&mut self, dark: bool);
    /// Set the icon class on every toggle button's `.theme-icon` child.
    fn set_icon_class(&mut self, class: &str);
}

pub struct ThemeToggle<S: KvStore, V: ThemeSurface> {
    store: S,
    surface: V,
    key: String,
    current: ThemePreference,
}

impl<S: KvStore, V: ThemeSurface> ThemeToggle<S, V> {
    /// Read the stored preference and apply it. Returns `None` (and touches
    /// nothing) when the page has no toggle buttons.
    pub fn attach(store: S, surface: V, key: &str, button_count: usize) -> Option<Self> {
        if button_count == 0 {
            return None;
        }
        let current = ThemePreference::from_stored(store.get(key).as_deref());
        let mut toggle = Self {
            store,
            surface,
            key: key.to_string(),
            current,
        };
        toggle.apply();
        log::debug!("[stud] theme applied: {current}");
        Some(toggle)
    }

    /// Flip the theme based on what the body currently shows, apply and persist it.
    pub fn toggle(&mut self) -> ThemePreference {
        let shown = if self.surface.body_is_dark() {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        };
        self.current = shown.toggled();
        self.apply();
        self.store.set(&self.key, &self.current.to_string());
        self.current
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    fn apply(&mut self) {
        self.surface.set_body_dark(self.current.is_dark());
        self.surface.set_icon_class(self.current.icon_class());
    }
}
