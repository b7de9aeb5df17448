use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlImageElement};

use super::dom::listen;
use crate::config::SiteConfig;
use crate::size_guide::{Diagram, Gender, SizeGuide, SizeGuideSurface, INACTIVE_BUTTON_BG, PRIMARY_CLASS};

struct DomSizeGuide {
    table: HtmlElement,
    diagram: Option<HtmlImageElement>,
    men: Option<HtmlElement>,
    women: Option<HtmlElement>,
}

impl SizeGuideSurface for DomSizeGuide {
    fn set_table_html(&mut self, html: &str) {
        self.table.set_inner_html(html);
    }

    fn set_diagram(&mut self, diagram: &Diagram) {
        if let Some(img) = &self.diagram {
            img.set_src(&diagram.src);
            img.set_alt(diagram.alt);
            let _ = img.style().set_property("max-width", diagram.max_width);
        }
    }

    fn set_active_button(&mut self, gender: Gender) {
        let (Some(men), Some(women)) = (&self.men, &self.women) else {
            return;
        };
        let (active, inactive) = match gender {
            Gender::Men => (men, women),
            Gender::Women => (women, men),
        };
        let _ = active.class_list().add_1(PRIMARY_CLASS);
        let _ = active.style().remove_property("background");
        let _ = inactive.class_list().remove_1(PRIMARY_CLASS);
        let _ = inactive.style().set_property("background", INACTIVE_BUTTON_BG);
    }
}

fn html_by_id<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    doc.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Render the size table and bind the gender buttons. Returns false when the
/// page has no `#size-table-container`.
pub fn init(doc: &Document, config: &SiteConfig) -> bool {
    let Some(table) = html_by_id::<HtmlElement>(doc, "size-table-container") else {
        return false;
    };
    let guide = SizeGuide::new(table.get_attribute("data-sizes").as_deref(), config);
    if !guide.has_data() {
        log::debug!("[stud] size table has no usable data");
    }
    let surface = DomSizeGuide {
        table,
        diagram: html_by_id(doc, "size-diagram"),
        men: html_by_id(doc, "toggle-men"),
        women: html_by_id(doc, "toggle-women"),
    };
    let buttons = [(surface.men.clone(), Gender::Men), (surface.women.clone(), Gender::Women)];
    let state = Rc::new(RefCell::new((guide, surface)));

    for (button, gender) in buttons {
        let Some(button) = button else {
            continue;
        };
        let state = Rc::clone(&state);
        let bound = listen(&button, "click", move |_| {
            let mut state = state.borrow_mut();
            let (guide, surface) = &mut *state;
            guide.render(gender, surface);
        });
        if let Err(e) = bound {
            log::error!("[stud] size toggle bind failed: {e}");
        }
    }

    {
        let mut state = state.borrow_mut();
        let (guide, surface) = &mut *state;
        guide.render(Gender::Men, surface);
    }
    true
}
