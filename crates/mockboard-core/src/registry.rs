//! Kind registry: per-kind defaults and editable property fields.
//!
//! The store consults the registry only when creating elements. It never
//! special-cases a kind by name.

use crate::element::{
    BorderStyle, ElementKind, ElementStyle, FieldMeta, FontWeight, Props, StyleUpdate,
};
use crate::error::{CanvasError, CanvasResult};
use kurbo::Size;
use serde_json::{Value, json};
use std::collections::HashMap;

/// Library category a kind is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindCategory {
    Basic,
    Input,
    Layout,
    Flow,
}

/// Editor widget used for a kind-specific property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyInput {
    Text,
    Number { min: Option<f64>, max: Option<f64> },
    Select(Vec<(&'static str, &'static str)>),
    Color,
    Boolean,
}

/// A kind-specific editable property, stored under `key` in the element's props.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyField {
    pub key: &'static str,
    pub label: &'static str,
    pub input: PropertyInput,
}

impl PropertyField {
    fn new(key: &'static str, label: &'static str, input: PropertyInput) -> Self {
        Self { key, label, input }
    }
}

/// Everything the store needs to know about a kind.
#[derive(Debug, Clone)]
pub struct KindDescriptor {
    pub kind: ElementKind,
    pub display_name: &'static str,
    pub category: KindCategory,
    /// Short glyph shown in the library.
    pub icon: &'static str,
    pub default_size: Size,
    pub default_props: Props,
    /// Declared default style, merged over the global default.
    pub default_style: StyleUpdate,
    pub property_fields: Vec<PropertyField>,
    /// Field type, data type and length pre-filled into the field table.
    pub default_field_meta: (&'static str, &'static str, &'static str),
}

impl KindDescriptor {
    fn new(
        kind: ElementKind,
        display_name: &'static str,
        category: KindCategory,
        icon: &'static str,
        size: (f64, f64),
    ) -> Self {
        Self {
            kind,
            display_name,
            category,
            icon,
            default_size: Size::new(size.0, size.1),
            default_props: Props::new(),
            default_style: StyleUpdate::default(),
            property_fields: Vec::new(),
            default_field_meta: ("", "", ""),
        }
    }

    fn props(mut self, props: Value) -> Self {
        if let Value::Object(map) = props {
            self.default_props = map;
        }
        self
    }

    fn style(mut self, style: StyleUpdate) -> Self {
        self.default_style = style;
        self
    }

    fn fields(mut self, fields: Vec<PropertyField>) -> Self {
        self.property_fields = fields;
        self
    }

    fn field_meta(mut self, field_type: &'static str, data_type: &'static str, length: &'static str) -> Self {
        self.default_field_meta = (field_type, data_type, length);
        self
    }

    /// Fully resolved style for a new element of this kind.
    pub fn resolved_style(&self) -> ElementStyle {
        self.default_style.resolve()
    }

    /// Field metadata for a new element of this kind.
    pub fn field_meta_for(&self, field_id: String) -> FieldMeta {
        let (field_type, data_type, length) = self.default_field_meta;
        FieldMeta {
            field_id,
            description: self.display_name.to_string(),
            field_type: field_type.to_string(),
            data_type: data_type.to_string(),
            length: length.to_string(),
            ..FieldMeta::default()
        }
    }
}

/// Lookup table from kind to descriptor.
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    descriptors: HashMap<ElementKind, KindDescriptor>,
}

impl KindRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a descriptor.
    pub fn register(&mut self, descriptor: KindDescriptor) {
        self.descriptors.insert(descriptor.kind, descriptor);
    }

    /// Look up a kind. Unregistered kinds are a lookup failure.
    pub fn get(&self, kind: ElementKind) -> CanvasResult<&KindDescriptor> {
        self.descriptors.get(&kind).ok_or(CanvasError::UnknownKind(kind))
    }

    /// Descriptors in one category, in catalog order.
    pub fn by_category(&self, category: KindCategory) -> Vec<&KindDescriptor> {
        self.all().into_iter().filter(|d| d.category == category).collect()
    }

    /// All descriptors in catalog order.
    pub fn all(&self) -> Vec<&KindDescriptor> {
        ElementKind::ALL
            .iter()
            .filter_map(|kind| self.descriptors.get(kind))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Registry with the full built-in catalog.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for descriptor in builtin_descriptors() {
            registry.register(descriptor);
        }
        registry
    }
}

/// Style for kinds drawn without a frame of their own.
fn frameless(font_size: f64, font_color: &str) -> StyleUpdate {
    StyleUpdate {
        font_size: Some(font_size),
        font_weight: Some(FontWeight::Normal),
        font_color: Some(font_color.to_string()),
        background_color: Some("transparent".to_string()),
        border_width: Some(0.0),
        border_style: Some(BorderStyle::None),
        ..StyleUpdate::default()
    }
}

fn framed(font_size: f64, background: &str, radius: Option<f64>) -> StyleUpdate {
    StyleUpdate {
        font_size: Some(font_size),
        font_weight: Some(FontWeight::Normal),
        font_color: Some("#1d2d3e".to_string()),
        background_color: Some(background.to_string()),
        border_radius: radius,
        ..StyleUpdate::default()
    }
}

fn flow_shape(font_size: f64, radius: Option<f64>) -> StyleUpdate {
    StyleUpdate {
        font_color: Some("#556b82".to_string()),
        ..framed(font_size, "#ffffff", radius)
    }
}

fn text_list(key: &'static str, label: &'static str) -> PropertyField {
    PropertyField::new(key, label, PropertyInput::Text)
}

fn builtin_descriptors() -> Vec<KindDescriptor> {
    use ElementKind as K;
    use KindCategory::{Basic, Flow, Input, Layout};

    let connector = |kind, name, icon, size| {
        KindDescriptor::new(kind, name, Flow, icon, size)
            .style(frameless(14.0, "#556b82"))
            .field_meta("Connector", "", "")
    };
    let arrow = |kind, name, icon, size| {
        KindDescriptor::new(kind, name, Flow, icon, size)
            .style(frameless(14.0, "#556b82"))
            .field_meta("Arrow", "", "")
    };

    vec![
        KindDescriptor::new(K::Button, "Button", Basic, "B", (120.0, 36.0))
            .props(json!({ "variant": "default" }))
            .style(framed(14.0, "#ffffff", Some(8.0)))
            .fields(vec![PropertyField::new(
                "variant",
                "Variant",
                PropertyInput::Select(vec![
                    ("default", "Default"),
                    ("emphasized", "Emphasized"),
                    ("ghost", "Ghost"),
                    ("transparent", "Transparent"),
                ]),
            )])
            .field_meta("Button", "CHAR", "20"),
        KindDescriptor::new(K::Text, "Text", Basic, "T", (160.0, 32.0))
            .style(StyleUpdate {
                padding: Some(4.0),
                ..frameless(14.0, "#1d2d3e")
            })
            .field_meta("Text", "CHAR", "50"),
        KindDescriptor::new(K::Icon, "Icon", Basic, "★", (60.0, 60.0))
            .props(json!({ "icon": "⚙" }))
            .style(frameless(20.0, "#0070f2"))
            .fields(vec![text_list("icon", "Icon Character")])
            .field_meta("Icon", "CHAR", "4"),
        KindDescriptor::new(K::Input, "Input", Input, "▭", (240.0, 56.0))
            .props(json!({ "placeholder": "Enter value..." }))
            .style(frameless(14.0, "#1d2d3e"))
            .fields(vec![text_list("placeholder", "Placeholder")])
            .field_meta("Input", "CHAR", "40"),
        KindDescriptor::new(K::RangeInput, "Range Input", Input, "⇔", (360.0, 56.0))
            .style(frameless(14.0, "#1d2d3e"))
            .field_meta("RangeInput", "CHAR", "40"),
        KindDescriptor::new(K::Dropdown, "Dropdown", Input, "▾", (240.0, 56.0))
            .props(json!({ "options": "Option 1, Option 2, Option 3" }))
            .style(frameless(14.0, "#1d2d3e"))
            .fields(vec![text_list("options", "Options (comma separated)")])
            .field_meta("Dropdown", "CHAR", "20"),
        KindDescriptor::new(K::SearchBox, "Search", Input, "⌕", (260.0, 36.0))
            .style(framed(14.0, "#ffffff", Some(8.0)))
            .field_meta("Search", "CHAR", "40"),
        KindDescriptor::new(K::TextArea, "Text Area", Input, "≡", (300.0, 120.0))
            .style(frameless(14.0, "#1d2d3e"))
            .field_meta("TextArea", "STRING", "255"),
        KindDescriptor::new(K::Checkbox, "Checkbox", Input, "☑", (160.0, 32.0))
            .props(json!({ "checked": true }))
            .style(frameless(14.0, "#1d2d3e"))
            .fields(vec![PropertyField::new("checked", "Checked", PropertyInput::Boolean)])
            .field_meta("Checkbox", "CHAR", "1"),
        KindDescriptor::new(K::RadioButton, "Radio Button", Input, "◉", (160.0, 32.0))
            .props(json!({ "selected": true }))
            .style(frameless(14.0, "#1d2d3e"))
            .fields(vec![PropertyField::new("selected", "Selected", PropertyInput::Boolean)])
            .field_meta("RadioButton", "CHAR", "1"),
        KindDescriptor::new(K::Switch, "Switch", Input, "⊙", (160.0, 36.0))
            .props(json!({ "on": true }))
            .style(frameless(14.0, "#1d2d3e"))
            .fields(vec![PropertyField::new("on", "On", PropertyInput::Boolean)])
            .field_meta("Switch", "CHAR", "1"),
        KindDescriptor::new(K::Card, "Card", Layout, "☐", (320.0, 200.0))
            .style(framed(14.0, "#ffffff", Some(12.0)))
            .field_meta("Card", "", ""),
        KindDescriptor::new(K::Table, "Table", Layout, "⊞", (500.0, 240.0))
            .props(json!({ "columns": "Column 1, Column 2, Column 3", "rows": 5 }))
            .style(framed(13.0, "#ffffff", Some(8.0)))
            .fields(vec![
                text_list("columns", "Columns (comma separated)"),
                PropertyField::new(
                    "rows",
                    "Row count",
                    PropertyInput::Number {
                        min: Some(1.0),
                        max: Some(20.0),
                    },
                ),
            ])
            .field_meta("Table", "", ""),
        KindDescriptor::new(K::Form, "Form", Layout, "☰", (400.0, 200.0))
            .props(json!({ "fields": "Field 1, Field 2, Field 3" }))
            .style(StyleUpdate {
                padding: Some(12.0),
                ..frameless(14.0, "#1d2d3e")
            })
            .fields(vec![text_list("fields", "Fields (comma separated)")])
            .field_meta("Form", "", ""),
        KindDescriptor::new(K::Section, "Section", Layout, "§", (400.0, 160.0))
            .style(frameless(14.0, "#1d2d3e"))
            .field_meta("Section", "", ""),
        KindDescriptor::new(K::Tab, "Tab", Layout, "⊟", (500.0, 300.0))
            .props(json!({ "tabs": "Tab 1, Tab 2, Tab 3", "activeTab": 0 }))
            .style(framed(14.0, "#ffffff", Some(12.0)))
            .fields(vec![
                text_list("tabs", "Tabs (comma separated)"),
                PropertyField::new(
                    "activeTab",
                    "Active Tab Index",
                    PropertyInput::Number {
                        min: Some(0.0),
                        max: None,
                    },
                ),
            ])
            .field_meta("Tab", "", ""),
        KindDescriptor::new(K::GroupBox, "GroupBox", Layout, "▣", (360.0, 200.0))
            .style(framed(14.0, "#ffffff", Some(8.0)))
            .field_meta("GroupBox", "", ""),
        KindDescriptor::new(K::Toolbar, "Toolbar", Layout, "═", (500.0, 44.0))
            .props(json!({ "buttons": "Create, Edit, Delete" }))
            .style(framed(14.0, "#ffffff", None))
            .fields(vec![text_list("buttons", "Buttons (comma separated)")])
            .field_meta("Toolbar", "", ""),
        KindDescriptor::new(K::ProcessBox, "Process Box", Flow, "▢", (160.0, 60.0))
            .style(StyleUpdate {
                font_weight: Some(FontWeight::Bold),
                ..framed(14.0, "#e8f0fe", Some(8.0))
            })
            .field_meta("Process", "", ""),
        KindDescriptor::new(K::Banner, "Banner", Flow, "ℹ", (300.0, 44.0))
            .props(json!({ "variant": "information" }))
            .style(StyleUpdate {
                font_weight: Some(FontWeight::Medium),
                font_color: Some("#0070f2".to_string()),
                ..framed(14.0, "#e8f0fe", None)
            })
            .fields(vec![PropertyField::new(
                "variant",
                "Variant",
                PropertyInput::Select(vec![
                    ("information", "Information"),
                    ("success", "Success"),
                    ("warning", "Warning"),
                    ("error", "Error"),
                ]),
            )])
            .field_meta("Banner", "", ""),
        arrow(K::ArrowRight, "Arrow Right", "→", (120.0, 40.0)),
        arrow(K::ArrowLeft, "Arrow Left", "←", (120.0, 40.0)),
        arrow(K::ArrowUp, "Arrow Up", "↑", (40.0, 120.0)),
        arrow(K::ArrowDown, "Arrow Down", "↓", (40.0, 120.0)),
        KindDescriptor::new(K::Rectangle, "Rectangle", Flow, "□", (140.0, 60.0))
            .style(flow_shape(13.0, Some(4.0)))
            .field_meta("Shape", "", ""),
        KindDescriptor::new(K::Diamond, "Diamond", Flow, "◇", (100.0, 100.0))
            .style(flow_shape(12.0, None))
            .field_meta("Decision", "", ""),
        KindDescriptor::new(K::Terminator, "Terminator", Flow, "⬭", (120.0, 44.0))
            .style(flow_shape(13.0, None))
            .field_meta("Terminator", "", ""),
        connector(K::Line, "Line", "─", (200.0, 8.0)),
        connector(K::DashedLine, "Dashed Line", "┄", (200.0, 8.0)),
        connector(K::Polyline, "Polyline", "⌐", (200.0, 60.0)),
        connector(K::PolylineArrow, "Polyline Arrow", "⌐→", (200.0, 60.0)),
        connector(K::DashedArrow, "Dashed Arrow", "⇢", (200.0, 8.0)),
    ]
}
