//! Small web-sys helpers shared by the feature bindings.

use anyhow::{anyhow, Result};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList};

/// Convert a thrown JS value into an error.
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{e:?}")
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// `querySelectorAll` returning elements; an invalid selector yields nothing.
pub trait QueryAll {
    fn query_all(&self, selector: &str) -> Vec<Element>;
}

impl QueryAll for Document {
    fn query_all(&self, selector: &str) -> Vec<Element> {
        self.query_selector_all(selector).map(elements).unwrap_or_default()
    }
}

impl QueryAll for Element {
    fn query_all(&self, selector: &str) -> Vec<Element> {
        self.query_selector_all(selector).map(elements).unwrap_or_default()
    }
}

/// Wrap a handler as a JS callback that lives for the rest of the page.
pub fn callback(handler: impl FnMut(Event) + 'static) -> js_sys::Function {
    let cb = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
    let f: js_sys::Function = cb.as_ref().unchecked_ref::<js_sys::Function>().clone();
    cb.forget();
    f
}

/// Add an event listener for the lifetime of the page.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let f = callback(handler);
    target
        .add_event_listener_with_callback(event, &f)
        .map_err(js_err)
}

/// Force an element visible via inline style.
pub fn force_visible(el: &Element) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        if let Err(e) = el.style().set_property("visibility", "visible") {
            log::debug!("[stud] could not set visibility: {e:?}");
        }
    }
}
