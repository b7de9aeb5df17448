//! Reveal animations and card tilt.
//!
//! The tween library (GSAP in the browser) is an optional capability: pages
//! that do not load it get every `.reveal` element made visible immediately.
//! Tween parameters are plain serde structs handed to the engine as JS objects.

use anyhow::Result;
use serde::Serialize;

/// Hero targets within `.hero`
pub const HERO_PARTS_SELECTOR: &str = "h1, p, .btn";

/// Max card tilt in degrees at the element edge
pub const TILT_DEGREES: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Hidden,
    Visible,
}

/// `scrollTrigger` block; the trigger element itself is attached by the engine.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollTriggerVars {
    pub start: String,
    pub toggle_actions: String,
}

/// Tween vars, serialized in GSAP's camelCase shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tween {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagger: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ease: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_perspective: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_origin: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_trigger: Option<ScrollTriggerVars>,
}

impl Tween {
    /// Offset, transparent, hidden.
    pub fn hidden_start() -> Self {
        Self {
            y: Some(50.0),
            opacity: Some(0.0),
            visibility: Some(Visibility::Hidden),
            ..Self::default()
        }
    }

    fn shown() -> Self {
        Self {
            y: Some(0.0),
            opacity: Some(1.0),
            visibility: Some(Visibility::Visible),
            ..Self::default()
        }
    }

    /// Hero entrance: staggered, after a short initial delay.
    pub fn hero_end() -> Self {
        Self {
            duration: Some(1.0),
            stagger: Some(0.2),
            ease: Some("power3.out"),
            delay: Some(0.2),
            ..Self::shown()
        }
    }

    /// Per-element reveal; scroll-driven when `start` is given.
    pub fn reveal_end(start: Option<&str>) -> Self {
        Self {
            duration: Some(0.8),
            ease: Some("power2.out"),
            scroll_trigger: start.map(|start| ScrollTriggerVars {
                start: start.to_string(),
                toggle_actions: "play none none reverse".to_string(),
            }),
            ..Self::shown()
        }
    }

    /// Card tilt toward the pointer. Coordinates are relative to the card's
    /// top-left corner.
    pub fn tilt(x: f64, y: f64, width: f64, height: f64) -> Self {
        let (ry, rx) = if width > 0.0 && height > 0.0 {
            (
                ((x - width / 2.0) / width) * TILT_DEGREES,
                ((y - height / 2.0) / height) * -TILT_DEGREES,
            )
        } else {
            (0.0, 0.0)
        };
        Self {
            duration: Some(0.5),
            rotation_x: Some(rx),
            rotation_y: Some(ry),
            ease: Some("power2.out"),
            transform_perspective: Some(1000.0),
            transform_origin: Some("center"),
            ..Self::default()
        }
    }

    /// Tilt for a pointer at viewport coordinates over a card's box.
    pub fn tilt_toward(client_x: f64, client_y: f64, card: &CardBox) -> Self {
        Self::tilt(client_x - card.left, client_y - card.top, card.width, card.height)
    }

    pub fn tilt_reset() -> Self {
        Self {
            duration: Some(0.5),
            rotation_x: Some(0.0),
            rotation_y: Some(0.0),
            ease: Some("power2.out"),
            ..Self::default()
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A card's bounding box in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// The optional tween library.
pub trait AnimationEngine<E> {
    /// Whether the scroll-observer plugin is loaded.
    fn has_scroll_trigger(&self) -> bool;
    fn register_scroll_trigger(&self) -> Result<()>;
    /// Animate `targets` from `from` to `to`. When `to` carries a scroll
    /// trigger, the single target is the trigger element.
    fn from_to(&self, targets: &[E], from: &Tween, to: &Tween) -> Result<()>;
    fn to(&self, target: &E, to: &Tween) -> Result<()>;
}

/// An element tagged `.reveal`, with whether it sits inside the hero.
#[derive(Clone, Debug)]
pub struct RevealTarget<E> {
    pub element: E,
    pub in_hero: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Tweens installed.
    Animated {
        hero_parts: usize,
        revealed: usize,
        cards: usize,
        scroll_driven: bool,
    },
    /// No engine on the page; everything forced visible.
    FallbackMissing,
    /// The engine faulted; everything forced visible.
    FallbackFault,
}

impl RevealOutcome {
    pub fn animated(&self) -> bool {
        matches!(self, RevealOutcome::Animated { .. })
    }
}

/// Install the hero and reveal tweens and bind card tilt, or make every
/// reveal element visible.
///
/// `hero_parts` is `None` when the page has no hero region. `bind_card` hooks
/// the tilt listeners onto one card and only runs once the engine is known
/// to be present. Faults from the engine or from card binding are logged and
/// end in the same visibility fallback as a missing engine, so reveal
/// elements are never left hidden.
pub fn init_reveal<E>(
    engine: Option<&dyn AnimationEngine<E>>,
    hero_parts: Option<&[E]>,
    targets: &[RevealTarget<E>],
    cards: &[E],
    scroll_start: &str,
    mut make_visible: impl FnMut(&E),
    bind_card: impl FnMut(&E) -> Result<()>,
) -> RevealOutcome {
    let Some(engine) = engine else {
        log::warn!("[stud] GSAP not loaded, using visibility fallback");
        targets.iter().for_each(|t| make_visible(&t.element));
        return RevealOutcome::FallbackMissing;
    };

    match install(engine, hero_parts, targets, cards, scroll_start, bind_card) {
        Ok(outcome) => {
            log::info!("[stud] Animations initialized");
            outcome
        }
        Err(e) => {
            log::error!("[stud] Animation init error: {e:#}");
            targets.iter().for_each(|t| make_visible(&t.element));
            RevealOutcome::FallbackFault
        }
    }
}

fn install<E>(
    engine: &dyn AnimationEngine<E>,
    hero_parts: Option<&[E]>,
    targets: &[RevealTarget<E>],
    cards: &[E],
    scroll_start: &str,
    mut bind_card: impl FnMut(&E) -> Result<()>,
) -> Result<RevealOutcome> {
    let scroll_driven = engine.has_scroll_trigger();
    if scroll_driven {
        engine.register_scroll_trigger()?;
    } else {
        log::warn!("[stud] ScrollTrigger missing, proceeding without scroll animations");
    }

    let from = Tween::hidden_start();
    let mut hero_count = 0;
    if let Some(parts) = hero_parts {
        engine.from_to(parts, &from, &Tween::hero_end())?;
        hero_count = parts.len();
    }

    let end = Tween::reveal_end(scroll_driven.then_some(scroll_start));
    let mut revealed = 0;
    for target in targets.iter().filter(|t| !t.in_hero) {
        engine.from_to(std::slice::from_ref(&target.element), &from, &end)?;
        revealed += 1;
    }

    for card in cards {
        bind_card(card)?;
    }
    log::debug!("[stud] tilt bound to {} cards", cards.len());

    Ok(RevealOutcome::Animated {
        hero_parts: hero_count,
        revealed,
        cards: cards.len(),
        scroll_driven,
    })
}
