//! Product color swatches.
//!
//! Each `[data-product]` container embeds a JSON map from color name to the
//! two product shots for that color:
//!
//! ```json
//! { "red": { "fit": "tee-red-fit.png", "fabric": "tee-red-fabric.png" } }
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::SiteConfig;

pub const SELECTED_CLASS: &str = "selected";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ColorAssets {
    pub fit: String,
    pub fabric: String,
}

/// Color name to raw entry. Entries are only decoded when their color is
/// activated, so one bad entry does not hide the others.
pub type ProductColorMapping = Map<String, Value>;

/// Parse a container's mapping. Invalid JSON or a non-object reads as no mapping.
pub fn parse_mapping(raw: Option<&str>) -> Option<ProductColorMapping> {
    let raw = raw?;
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(mapping)) => Some(mapping),
        Ok(_) => {
            log::debug!("[stud] color mapping is not an object; ignoring");
            None
        }
        Err(e) => {
            log::debug!("[stud] ignoring malformed color mapping: {e}");
            None
        }
    }
}

/// Assets for one color. A missing or malformed entry reads as none.
pub fn lookup(raw: Option<&str>, color: &str) -> Option<ColorAssets> {
    let entry = parse_mapping(raw)?.remove(color)?;
    match serde_json::from_value::<ColorAssets>(entry) {
        Ok(assets) => Some(assets),
        Err(e) => {
            log::debug!("[stud] ignoring malformed assets for {color}: {e}");
            None
        }
    }
}

/// What the page needs to show after a swatch is activated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwatchUpdate {
    pub fit_src: Option<String>,
    pub fabric_src: Option<String>,
    pub label: Option<String>,
}

/// Resolve the image sources and label for `color` against a raw mapping.
pub fn resolve(raw_mapping: Option<&str>, color: Option<&str>, config: &SiteConfig) -> SwatchUpdate {
    let Some(color) = color else {
        return SwatchUpdate::default();
    };
    let assets = lookup(raw_mapping, color);
    SwatchUpdate {
        fit_src: assets.as_ref().map(|a| config.image_path(&a.fit)),
        fabric_src: assets.as_ref().map(|a| config.image_path(&a.fabric)),
        label: Some(color.to_string()),
    }
}

/// One product container as seen by the swatch handler.
pub trait ProductSurface {
    fn mapping_json(&self) -> Option<String>;
    fn swatch_count(&self) -> usize;
    fn swatch_color(&self, index: usize) -> Option<String>;
    fn set_fit_src(&mut self, src: &str);
    fn set_fabric_src(&mut self, src: &str);
    fn set_color_label(&mut self, text: &str);
    fn set_swatch_selected(&mut self, index: usize, selected: bool);
}

/// Handle activation of swatch `index` within `product`.
///
/// Images change only when the mapping knows the color; the selection
/// highlight always moves to the activated swatch.
pub fn activate<P: ProductSurface>(product: &mut P, index: usize, config: &SiteConfig) -> SwatchUpdate {
    let color = product.swatch_color(index);
    let update = resolve(product.mapping_json().as_deref(), color.as_deref(), config);

    if let Some(src) = &update.fit_src {
        product.set_fit_src(src);
    }
    if let Some(src) = &update.fabric_src {
        product.set_fabric_src(src);
    }
    if let Some(label) = &update.label {
        product.set_color_label(label);
    }
    for i in 0..product.swatch_count() {
        product.set_swatch_selected(i, i == index);
    }
    update
}
