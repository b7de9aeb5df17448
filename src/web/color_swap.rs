use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement};

use super::dom::{listen, QueryAll};
use crate::color_swap::{activate, ProductSurface, SELECTED_CLASS};
use crate::config::SiteConfig;

struct DomProduct {
    container: Element,
    swatches: Vec<Element>,
}

impl DomProduct {
    fn image(&self, selector: &str) -> Option<HtmlImageElement> {
        self.container
            .query_selector(selector)
            .ok()
            .flatten()?
            .dyn_into::<HtmlImageElement>()
            .ok()
    }
}

impl ProductSurface for DomProduct {
    fn mapping_json(&self) -> Option<String> {
        self.container.get_attribute("data-product")
    }

    fn swatch_count(&self) -> usize {
        self.swatches.len()
    }

    fn swatch_color(&self, index: usize) -> Option<String> {
        self.swatches.get(index)?.get_attribute("data-color")
    }

    fn set_fit_src(&mut self, src: &str) {
        if let Some(img) = self.image(".img-fit") {
            img.set_src(src);
        }
    }

    fn set_fabric_src(&mut self, src: &str) {
        if let Some(img) = self.image(".img-fabric") {
            img.set_src(src);
        }
    }

    fn set_color_label(&mut self, text: &str) {
        if let Ok(Some(label)) = self.container.query_selector(r#"[id$="selected-color-name"]"#) {
            label.set_text_content(Some(text));
        }
    }

    fn set_swatch_selected(&mut self, index: usize, selected: bool) {
        if let Some(s) = self.swatches.get(index) {
            let _ = s.class_list().toggle_with_force(SELECTED_CLASS, selected);
        }
    }
}

/// Bind every `.color-swatch`. Returns false when the page has none.
pub fn init(doc: &Document, config: &Rc<SiteConfig>) -> bool {
    let swatches = doc.query_all(".color-swatch");
    if swatches.is_empty() {
        return false;
    }
    for swatch in swatches {
        let (config, el) = (Rc::clone(config), swatch.clone());
        let bound = listen(&swatch, "click", move |_| {
            let Some(container) = el.closest("[data-product]").ok().flatten() else {
                return;
            };
            let siblings = container.query_all(".color-swatch");
            let Some(index) = siblings.iter().position(|s| s == &el) else {
                return;
            };
            let mut product = DomProduct {
                container,
                swatches: siblings,
            };
            activate(&mut product, index, &config);
        });
        if let Err(e) = bound {
            log::error!("[stud] swatch bind failed: {e}");
        }
    }
    true
}
