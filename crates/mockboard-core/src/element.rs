//! Element definitions for the canvas.
//!
//! An element is pure data: geometry, content, a fully populated style and
//! tabular field metadata. How a kind looks and which defaults it gets lives
//! in the [`registry`](crate::registry).

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Smallest width or height an element can be resized to.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;

/// Kind-specific settings (variant, option lists, row counts, ...).
pub type Props = Map<String, Value>;

/// Tag selecting an element's kind in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    // Basic
    Button,
    Text,
    Icon,
    // Input
    Input,
    RangeInput,
    Dropdown,
    SearchBox,
    TextArea,
    Checkbox,
    RadioButton,
    Switch,
    // Layout
    Card,
    Table,
    Form,
    Section,
    Tab,
    GroupBox,
    Toolbar,
    // Flow
    ProcessBox,
    Banner,
    ArrowRight,
    ArrowLeft,
    ArrowUp,
    ArrowDown,
    Rectangle,
    Diamond,
    Terminator,
    Line,
    DashedLine,
    Polyline,
    PolylineArrow,
    DashedArrow,
}

impl ElementKind {
    /// Every kind, in catalog order.
    pub const ALL: [ElementKind; 32] = [
        ElementKind::Button,
        ElementKind::Text,
        ElementKind::Icon,
        ElementKind::Input,
        ElementKind::RangeInput,
        ElementKind::Dropdown,
        ElementKind::SearchBox,
        ElementKind::TextArea,
        ElementKind::Checkbox,
        ElementKind::RadioButton,
        ElementKind::Switch,
        ElementKind::Card,
        ElementKind::Table,
        ElementKind::Form,
        ElementKind::Section,
        ElementKind::Tab,
        ElementKind::GroupBox,
        ElementKind::Toolbar,
        ElementKind::ProcessBox,
        ElementKind::Banner,
        ElementKind::ArrowRight,
        ElementKind::ArrowLeft,
        ElementKind::ArrowUp,
        ElementKind::ArrowDown,
        ElementKind::Rectangle,
        ElementKind::Diamond,
        ElementKind::Terminator,
        ElementKind::Line,
        ElementKind::DashedLine,
        ElementKind::Polyline,
        ElementKind::PolylineArrow,
        ElementKind::DashedArrow,
    ];

    /// The serialized tag of this kind.
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Button => "button",
            ElementKind::Text => "text",
            ElementKind::Icon => "icon",
            ElementKind::Input => "input",
            ElementKind::RangeInput => "range-input",
            ElementKind::Dropdown => "dropdown",
            ElementKind::SearchBox => "search-box",
            ElementKind::TextArea => "text-area",
            ElementKind::Checkbox => "checkbox",
            ElementKind::RadioButton => "radio-button",
            ElementKind::Switch => "switch",
            ElementKind::Card => "card",
            ElementKind::Table => "table",
            ElementKind::Form => "form",
            ElementKind::Section => "section",
            ElementKind::Tab => "tab",
            ElementKind::GroupBox => "group-box",
            ElementKind::Toolbar => "toolbar",
            ElementKind::ProcessBox => "process-box",
            ElementKind::Banner => "banner",
            ElementKind::ArrowRight => "arrow-right",
            ElementKind::ArrowLeft => "arrow-left",
            ElementKind::ArrowUp => "arrow-up",
            ElementKind::ArrowDown => "arrow-down",
            ElementKind::Rectangle => "rectangle",
            ElementKind::Diamond => "diamond",
            ElementKind::Terminator => "terminator",
            ElementKind::Line => "line",
            ElementKind::DashedLine => "dashed-line",
            ElementKind::Polyline => "polyline",
            ElementKind::PolylineArrow => "polyline-arrow",
            ElementKind::DashedArrow => "dashed-arrow",
        }
    }

    /// Look a kind up by its serialized tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "bold")]
    Bold,
    #[serde(rename = "300")]
    Light,
    #[serde(rename = "500")]
    Medium,
    #[serde(rename = "700")]
    Heavy,
}

/// Border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    None,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Presentation of an element. Always fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub font_color: String,
    pub background_color: String,
    pub border_color: String,
    pub border_width: f64,
    pub border_radius: f64,
    pub border_style: BorderStyle,
    /// Opacity (0.0 - 1.0).
    pub opacity: f64,
    pub text_align: TextAlign,
    pub padding: f64,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            font_weight: FontWeight::Normal,
            font_color: "#1d2d3e".to_string(),
            background_color: "#ffffff".to_string(),
            border_color: "#bcc3ca".to_string(),
            border_width: 1.0,
            border_radius: 8.0,
            border_style: BorderStyle::Solid,
            opacity: 1.0,
            text_align: TextAlign::Left,
            padding: 8.0,
        }
    }
}

/// A partial style, shallow-merged over an [`ElementStyle`].
///
/// Also used by the registry for a kind's declared default style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleUpdate {
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub font_color: Option<String>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
    pub border_radius: Option<f64>,
    pub border_style: Option<BorderStyle>,
    pub opacity: Option<f64>,
    pub text_align: Option<TextAlign>,
    pub padding: Option<f64>,
}

impl StyleUpdate {
    /// Merge the given fields into `style`, leaving the rest untouched.
    pub fn apply_to(&self, style: &mut ElementStyle) {
        if let Some(v) = self.font_size {
            style.font_size = v;
        }
        if let Some(v) = self.font_weight {
            style.font_weight = v;
        }
        if let Some(v) = &self.font_color {
            style.font_color = v.clone();
        }
        if let Some(v) = &self.background_color {
            style.background_color = v.clone();
        }
        if let Some(v) = &self.border_color {
            style.border_color = v.clone();
        }
        if let Some(v) = self.border_width {
            style.border_width = v;
        }
        if let Some(v) = self.border_radius {
            style.border_radius = v;
        }
        if let Some(v) = self.border_style {
            style.border_style = v;
        }
        if let Some(v) = self.opacity {
            style.opacity = v.clamp(0.0, 1.0);
        }
        if let Some(v) = self.text_align {
            style.text_align = v;
        }
        if let Some(v) = self.padding {
            style.padding = v;
        }
    }

    /// The global default style with these fields merged over it.
    pub fn resolve(&self) -> ElementStyle {
        let mut style = ElementStyle::default();
        self.apply_to(&mut style);
        style
    }
}

/// Per-element tabular annotation, used by the field table and its exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldMeta {
    pub field_id: String,
    pub technical_field: String,
    pub description: String,
    pub field_type: String,
    pub data_type: String,
    pub length: String,
    pub sample: String,
    pub logic: String,
    pub remarks: String,
}

/// Column of the field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldColumn {
    FieldId,
    TechnicalField,
    Description,
    FieldType,
    DataType,
    Length,
    Sample,
    Logic,
    Remarks,
}

impl FieldColumn {
    /// All columns in table order.
    pub const ALL: [FieldColumn; 9] = [
        FieldColumn::FieldId,
        FieldColumn::TechnicalField,
        FieldColumn::Description,
        FieldColumn::FieldType,
        FieldColumn::DataType,
        FieldColumn::Length,
        FieldColumn::Sample,
        FieldColumn::Logic,
        FieldColumn::Remarks,
    ];

    /// Column header.
    pub fn title(self) -> &'static str {
        match self {
            FieldColumn::FieldId => "Field ID",
            FieldColumn::TechnicalField => "Technical Field",
            FieldColumn::Description => "Description",
            FieldColumn::FieldType => "Field Type",
            FieldColumn::DataType => "Data Type",
            FieldColumn::Length => "Length",
            FieldColumn::Sample => "Sample",
            FieldColumn::Logic => "Logic",
            FieldColumn::Remarks => "Remarks",
        }
    }
}

impl FieldMeta {
    /// Read one column.
    pub fn get(&self, column: FieldColumn) -> &str {
        match column {
            FieldColumn::FieldId => &self.field_id,
            FieldColumn::TechnicalField => &self.technical_field,
            FieldColumn::Description => &self.description,
            FieldColumn::FieldType => &self.field_type,
            FieldColumn::DataType => &self.data_type,
            FieldColumn::Length => &self.length,
            FieldColumn::Sample => &self.sample,
            FieldColumn::Logic => &self.logic,
            FieldColumn::Remarks => &self.remarks,
        }
    }

    /// Overwrite one column.
    pub fn set(&mut self, column: FieldColumn, value: impl Into<String>) {
        let slot = match column {
            FieldColumn::FieldId => &mut self.field_id,
            FieldColumn::TechnicalField => &mut self.technical_field,
            FieldColumn::Description => &mut self.description,
            FieldColumn::FieldType => &mut self.field_type,
            FieldColumn::DataType => &mut self.data_type,
            FieldColumn::Length => &mut self.length,
            FieldColumn::Sample => &mut self.sample,
            FieldColumn::Logic => &mut self.logic,
            FieldColumn::Remarks => &mut self.remarks,
        };
        *slot = value.into();
    }
}

/// Format a field id from a zero-based element count ("001", "002", ...).
pub fn field_id_for(count: usize) -> String {
    format!("{:03}", count + 1)
}

fn default_visible() -> bool {
    true
}

/// A positioned, styled, typed visual unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub(crate) id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Left edge in canvas units.
    pub x: f64,
    /// Top edge in canvas units.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Reserved; always 0.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Locked elements cannot be moved or resized.
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub style: ElementStyle,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub field_meta: FieldMeta,
}

impl Element {
    /// Create an element with default style and no props at the given geometry.
    pub fn new(kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            label: String::new(),
            value: String::new(),
            visible: true,
            locked: false,
            style: ElementStyle::default(),
            props: Props::new(),
            field_meta: FieldMeta::default(),
        }
    }

    /// The element's identifier.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Give this element a fresh identifier.
    pub fn regenerate_id(&mut self) {
        self.id = Uuid::new_v4();
    }

    /// Top-left corner.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bounding box in canvas units.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Strict overlap test: touching edges do not count.
    pub fn intersects(&self, rect: Rect) -> bool {
        self.x < rect.x1 && self.x + self.width > rect.x0 && self.y < rect.y1 && self.y + self.height > rect.y0
    }

    /// Whether the point lies inside the element's box (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.x + self.width && point.y >= self.y && point.y <= self.y + self.height
    }
}

/// A partial element, shallow-merged by [`CanvasStore::update`](crate::canvas::CanvasStore::update).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub label: Option<String>,
    pub value: Option<String>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    pub style: Option<ElementStyle>,
    pub props: Option<Props>,
    pub field_meta: Option<FieldMeta>,
}

impl ElementUpdate {
    /// Update that only changes the label.
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Update that only changes the position.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Merge the given fields into `element`.
    pub fn apply_to(self, element: &mut Element) {
        if let Some(v) = self.x {
            element.x = v;
        }
        if let Some(v) = self.y {
            element.y = v;
        }
        if let Some(v) = self.width {
            element.width = v.max(MIN_ELEMENT_SIZE);
        }
        if let Some(v) = self.height {
            element.height = v.max(MIN_ELEMENT_SIZE);
        }
        if let Some(v) = self.rotation {
            element.rotation = v;
        }
        if let Some(v) = self.label {
            element.label = v;
        }
        if let Some(v) = self.value {
            element.value = v;
        }
        if let Some(v) = self.visible {
            element.visible = v;
        }
        if let Some(v) = self.locked {
            element.locked = v;
        }
        if let Some(v) = self.style {
            element.style = v;
        }
        if let Some(v) = self.props {
            element.props = v;
        }
        if let Some(v) = self.field_meta {
            element.field_meta = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_id_padding() {
        assert_eq!(field_id_for(0), "001");
        assert_eq!(field_id_for(6), "007");
        assert_eq!(field_id_for(999), "1000");
    }

    #[test]
    fn test_kind_tag_roundtrip() {
        for kind in ElementKind::ALL {
            assert_eq!(ElementKind::from_tag(kind.tag()), Some(kind));
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.tag()));
        }
        assert_eq!(ElementKind::from_tag("nope"), None);
    }

    #[test]
    fn test_style_update_merges_only_given_fields() {
        let mut style = ElementStyle::default();
        StyleUpdate {
            font_size: Some(20.0),
            opacity: Some(3.0),
            ..StyleUpdate::default()
        }
        .apply_to(&mut style);

        assert_eq!(style.font_size, 20.0);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.font_color, ElementStyle::default().font_color);
    }

    #[test]
    fn test_update_floors_size() {
        let mut el = Element::new(ElementKind::Button, 0.0, 0.0, 100.0, 40.0);
        ElementUpdate {
            width: Some(5.0),
            label: Some("OK".into()),
            ..ElementUpdate::default()
        }
        .apply_to(&mut el);

        assert_eq!(el.width, MIN_ELEMENT_SIZE);
        assert_eq!(el.height, 40.0);
        assert_eq!(el.label, "OK");
    }

    #[test]
    fn test_intersects_is_strict() {
        let el = Element::new(ElementKind::Text, 50.0, 50.0, 20.0, 20.0);
        assert!(el.intersects(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(!el.intersects(Rect::new(0.0, 0.0, 50.0, 50.0)));
        assert!(!el.intersects(Rect::new(200.0, 200.0, 220.0, 220.0)));
    }

    #[test]
    fn test_element_json_field_names() {
        let el = Element::new(ElementKind::Button, 1.0, 2.0, 120.0, 36.0);
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "button");
        assert!(json.get("fieldMeta").is_some());
        assert_eq!(json["style"]["fontWeight"], "normal");
        assert_eq!(json["style"]["borderStyle"], "solid");
    }
}
