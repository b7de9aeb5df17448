use std::rc::Rc;

use anyhow::{anyhow, Result};
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, MouseEvent, Window};

use super::dom::{force_visible, js_err, listen, QueryAll};
use crate::config::SiteConfig;
use crate::reveal::{init_reveal, AnimationEngine, CardBox, RevealTarget, Tween, HERO_PARTS_SELECTOR};

/// GSAP (and optionally its ScrollTrigger plugin) found on `window`.
pub struct GsapEngine {
    gsap: JsValue,
    scroll_trigger: Option<JsValue>,
}

fn global(win: &Window, name: &str) -> Option<JsValue> {
    Reflect::get(win, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn vars(tween: &Tween) -> Result<JsValue> {
    js_sys::JSON::parse(&tween.to_json()?).map_err(js_err)
}

impl GsapEngine {
    pub fn detect(win: &Window) -> Option<Self> {
        let gsap = global(win, "gsap")?;
        Some(Self {
            gsap,
            scroll_trigger: global(win, "ScrollTrigger"),
        })
    }

    fn method(&self, name: &str) -> Result<Function> {
        Reflect::get(&self.gsap, &JsValue::from_str(name))
            .map_err(js_err)?
            .dyn_into::<Function>()
            .map_err(|_| anyhow!("gsap.{name} is not a function"))
    }
}

impl AnimationEngine<Element> for GsapEngine {
    fn has_scroll_trigger(&self) -> bool {
        self.scroll_trigger.is_some()
    }

    fn register_scroll_trigger(&self) -> Result<()> {
        let Some(plugin) = &self.scroll_trigger else {
            return Ok(());
        };
        self.method("registerPlugin")?
            .call1(&self.gsap, plugin)
            .map_err(js_err)?;
        Ok(())
    }

    fn from_to(&self, targets: &[Element], from: &Tween, to: &Tween) -> Result<()> {
        let list: Array = targets.iter().collect();
        let to_vars = vars(to)?;
        if let (Some(_), [trigger]) = (&to.scroll_trigger, targets) {
            let st = Reflect::get(&to_vars, &JsValue::from_str("scrollTrigger")).map_err(js_err)?;
            Reflect::set(&st, &JsValue::from_str("trigger"), trigger).map_err(js_err)?;
        }
        self.method("fromTo")?
            .call3(&self.gsap, &list, &vars(from)?, &to_vars)
            .map_err(js_err)?;
        Ok(())
    }

    fn to(&self, target: &Element, to: &Tween) -> Result<()> {
        self.method("to")?
            .call2(&self.gsap, target, &vars(to)?)
            .map_err(js_err)?;
        Ok(())
    }
}

/// Hook pointer tilt onto one card.
fn bind_tilt(engine: &Rc<GsapEngine>, card: &Element) -> Result<()> {
    let (engine_move, el) = (Rc::clone(engine), card.clone());
    listen(card, "mousemove", move |e: Event| {
        let Some(m) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        let rect = el.get_bounding_client_rect();
        let card_box = CardBox {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        };
        let tween = Tween::tilt_toward(f64::from(m.client_x()), f64::from(m.client_y()), &card_box);
        if let Err(e) = engine_move.to(&el, &tween) {
            log::debug!("[stud] tilt failed: {e}");
        }
    })?;

    let (engine_leave, el) = (Rc::clone(engine), card.clone());
    listen(card, "mouseleave", move |_| {
        if let Err(e) = engine_leave.to(&el, &Tween::tilt_reset()) {
            log::debug!("[stud] tilt reset failed: {e}");
        }
    })
}

/// Install reveal and tilt animations. Returns true when GSAP drove them;
/// false means every `.reveal` element was made visible instead.
pub fn init(win: &Window, doc: &Document, config: &SiteConfig) -> bool {
    let hero = doc.query_selector(".hero").ok().flatten();
    let hero_parts = hero.as_ref().map(|h| h.query_all(HERO_PARTS_SELECTOR));
    let targets: Vec<RevealTarget<Element>> = doc
        .query_all(".reveal")
        .into_iter()
        .map(|element| RevealTarget {
            in_hero: hero.as_ref().is_some_and(|h| h.contains(Some(&element))),
            element,
        })
        .collect();
    let cards = doc.query_all(".card");

    let engine = GsapEngine::detect(win).map(Rc::new);
    let outcome = init_reveal(
        engine.as_deref().map(|e| e as &dyn AnimationEngine<Element>),
        hero_parts.as_deref(),
        &targets,
        &cards,
        &config.reveal_start,
        force_visible,
        |card| match &engine {
            Some(engine) => bind_tilt(engine, card),
            None => Ok(()),
        },
    );
    outcome.animated()
}
