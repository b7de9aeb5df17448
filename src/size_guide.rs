//! Size guide table.
//!
//! `#size-table-container` embeds the measurements as JSON keyed by gender,
//! then size label, then measurement name. Row and column order follow the
//! JSON as written.

use std::fmt::{self, Write as _};

use serde_json::{Map, Value};

use crate::config::SiteConfig;

pub const MISSING_HTML: &str = r#"<div class="card">Size data missing</div>"#;

/// Inline background for the inactive gender button
pub const INACTIVE_BUTTON_BG: &str = "var(--color-border)";
pub const PRIMARY_CLASS: &str = "btn-primary";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    Men,
    Women,
}

impl Gender {
    pub fn key(self) -> &'static str {
        match self {
            Gender::Men => "men",
            Gender::Women => "women",
        }
    }

    pub fn headers(self) -> [&'static str; 4] {
        match self {
            Gender::Men => ["Size", "Chest (in)", "Length (in)", "Sleeve (in)"],
            Gender::Women => ["Size", "Bust (in)", "Length (in)", "Sleeve (in)"],
        }
    }

    fn diagram_file(self) -> &'static str {
        match self {
            Gender::Men => "men-size-diagram.png",
            Gender::Women => "women-sizing-diagram.png",
        }
    }

    fn diagram_alt(self) -> &'static str {
        match self {
            Gender::Men => "Men's sizing diagram: chest, length, sleeve measurements",
            Gender::Women => "Women's sizing diagram: bust, length, sleeve measurements",
        }
    }

    fn diagram_max_width(self) -> &'static str {
        match self {
            Gender::Men => "420px",
            Gender::Women => "300px",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Parsed `data-sizes` payload.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeDataset {
    genders: Map<String, Value>,
}

impl SizeDataset {
    /// Parse the embedded JSON. Invalid JSON or a non-object reads as no data.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(genders)) => Some(Self { genders }),
            Ok(_) => {
                log::debug!("[stud] size data is not an object; ignoring");
                None
            }
            Err(e) => {
                log::debug!("[stud] ignoring malformed size data: {e}");
                None
            }
        }
    }

    /// Rows for one gender, or `None` when that gender has no sizes.
    pub fn rows(&self, gender: Gender) -> Option<Vec<SizeRow>> {
        let sizes = self.genders.get(gender.key())?.as_object()?;
        if sizes.is_empty() {
            return None;
        }
        Some(
            sizes
                .iter()
                .map(|(label, measurements)| SizeRow::new(label, measurements))
                .collect(),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeRow {
    pub label: String,
    pub values: [String; 3],
}

impl SizeRow {
    fn new(label: &str, measurements: &Value) -> Self {
        let cells: Vec<String> = match measurements {
            Value::Object(m) => m.values().take(3).map(cell_text).collect(),
            Value::Array(a) => a.iter().take(3).map(cell_text).collect(),
            _ => Vec::new(),
        };
        let mut values: [String; 3] = Default::default();
        for (slot, cell) in values.iter_mut().zip(cells) {
            *slot = cell;
        }
        Self {
            label: label.to_string(),
            values,
        }
    }
}

fn cell_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeTable {
    pub headers: [&'static str; 4],
    pub rows: Vec<SizeRow>,
}

impl SizeTable {
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<table class="min-w-full"><thead><tr>"#);
        for h in self.headers {
            let _ = write!(html, r#"<th style="text-align:left;padding:.6rem">{h}</th>"#);
        }
        html.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            let _ = write!(
                html,
                r#"<tr><td style="padding:.6rem;font-weight:700">{}</td>"#,
                escape_html(&row.label)
            );
            for v in &row.values {
                let _ = write!(html, r#"<td style="padding:.6rem">{}</td>"#, escape_html(v));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        html
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagram {
    pub src: String,
    pub alt: &'static str,
    pub max_width: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SizeGuideView {
    Table {
        gender: Gender,
        diagram: Diagram,
        table: SizeTable,
    },
    Missing {
        gender: Gender,
    },
}

impl SizeGuideView {
    pub fn gender(&self) -> Gender {
        match self {
            SizeGuideView::Table { gender, .. } | SizeGuideView::Missing { gender } => *gender,
        }
    }

    /// Markup for the table container.
    pub fn body_html(&self) -> String {
        match self {
            SizeGuideView::Table { table, .. } => table.to_html(),
            SizeGuideView::Missing { .. } => MISSING_HTML.to_string(),
        }
    }
}

/// What the size guide writes to the page.
pub trait SizeGuideSurface {
    fn set_table_html(&mut self, html: &str);
    fn set_diagram(&mut self, diagram: &Diagram);
    /// Primary-style the active gender's button, de-emphasize the other.
    fn set_active_button(&mut self, gender: Gender);
}

pub struct SizeGuide {
    data: Option<SizeDataset>,
    gender: Gender,
    image_prefix: String,
}

impl SizeGuide {
    pub fn new(raw: Option<&str>, config: &SiteConfig) -> Self {
        Self {
            data: SizeDataset::parse(raw),
            gender: Gender::default(),
            image_prefix: config.image_prefix.clone(),
        }
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Build the view for `gender` and make it the active one.
    pub fn select(&mut self, gender: Gender) -> SizeGuideView {
        self.gender = gender;
        match self.data.as_ref().and_then(|d| d.rows(gender)) {
            Some(rows) => SizeGuideView::Table {
                gender,
                diagram: Diagram {
                    src: format!("{}{}", self.image_prefix, gender.diagram_file()),
                    alt: gender.diagram_alt(),
                    max_width: gender.diagram_max_width(),
                },
                table: SizeTable {
                    headers: gender.headers(),
                    rows,
                },
            },
            None => SizeGuideView::Missing { gender },
        }
    }

    /// Select `gender` and push the result to the page. A missing dataset
    /// only replaces the table body; diagram and buttons stay as they were.
    pub fn render<S: SizeGuideSurface>(&mut self, gender: Gender, surface: &mut S) -> SizeGuideView {
        let view = self.select(gender);
        if let SizeGuideView::Table { diagram, .. } = &view {
            surface.set_diagram(diagram);
            surface.set_active_button(gender);
        }
        surface.set_table_html(&view.body_html());
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_keep_declared_order() {
        let raw = r#"{"men": {"XL": {"chest": 44, "length": 30, "sleeve": 26},
                              "S": {"chest": 36, "length": 27, "sleeve": 24}}}"#;
        let data = SizeDataset::parse(Some(raw)).unwrap();
        let labels: Vec<_> = data.rows(Gender::Men).unwrap().into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["XL", "S"]);
    }

    #[test]
    fn measurement_columns_follow_declared_order() {
        let raw = r#"{"men": {"M": {"sleeve": 25, "chest": 40.5, "length": "28"}}}"#;
        let rows = SizeDataset::parse(Some(raw)).unwrap().rows(Gender::Men).unwrap();
        assert_eq!(rows[0].values, ["25".to_string(), "40.5".to_string(), "28".to_string()]);
    }

    #[test]
    fn short_rows_pad_with_blanks() {
        let raw = r#"{"women": {"XS": [30]}}"#;
        let rows = SizeDataset::parse(Some(raw)).unwrap().rows(Gender::Women).unwrap();
        assert_eq!(rows[0].values, ["30".to_string(), String::new(), String::new()]);
    }

    #[test]
    fn invalid_payloads_are_absent() {
        assert!(SizeDataset::parse(Some("{oops")).is_none());
        assert!(SizeDataset::parse(Some("[1,2]")).is_none());
        assert!(SizeDataset::parse(Some("  ")).is_none());
        assert!(SizeDataset::parse(None).is_none());
    }

    #[test]
    fn table_text_is_escaped() {
        let table = SizeTable {
            headers: Gender::Men.headers(),
            rows: vec![SizeRow {
                label: "<b>".to_string(),
                values: ["1".to_string(), "2".to_string(), "a&b".to_string()],
            }],
        };
        let html = table.to_html();
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("a&amp;b"));
        assert!(!html.contains("<b>"));
    }
}
