//! Ready-made scenes and user-saved templates.

use crate::element::{Element, ElementKind, FontWeight, StyleUpdate, TextAlign, field_id_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

/// Template gallery grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateCategory {
    SelectionScreen,
    ReportList,
    InterfaceDiagram,
    ScreenEnhancement,
    Custom,
}

/// A named scene that can be loaded onto the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: TemplateCategory,
    pub elements: Vec<Element>,
    #[serde(default)]
    pub canvas_width: Option<f64>,
    #[serde(default)]
    pub canvas_height: Option<f64>,
    #[serde(default)]
    pub is_custom: bool,
}

impl Template {
    /// Fresh copies of the elements with new ids, so loading never aliases the template.
    pub fn instantiate(&self) -> Vec<Element> {
        self.elements
            .iter()
            .cloned()
            .map(|mut element| {
                element.regenerate_id();
                element
            })
            .collect()
    }
}

/// Built-in templates plus the user's custom ones.
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    builtin: Vec<Template>,
    custom: Vec<Template>,
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateLibrary {
    /// Library with the built-in templates and no custom ones.
    pub fn builtin() -> Self {
        Self {
            builtin: builtin_templates(),
            custom: Vec::new(),
        }
    }

    pub fn builtin_templates(&self) -> &[Template] {
        &self.builtin
    }

    pub fn custom_templates(&self) -> &[Template] {
        &self.custom
    }

    /// Built-in then custom.
    pub fn all(&self) -> impl Iterator<Item = &Template> {
        self.builtin.iter().chain(&self.custom)
    }

    pub fn find(&self, id: &str) -> Option<&Template> {
        self.all().find(|template| template.id == id)
    }

    /// Store a deep copy of `elements` as a new custom template and return its id.
    pub fn save_as_template(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        elements: Vec<Element>,
        canvas_width: f64,
        canvas_height: f64,
    ) -> String {
        let template = Template {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            category: TemplateCategory::Custom,
            elements,
            canvas_width: Some(canvas_width),
            canvas_height: Some(canvas_height),
            is_custom: true,
        };
        let id = template.id.clone();
        log::info!("Saved custom template {} ({})", template.name, id);
        self.custom.push(template);
        id
    }

    /// Remove a custom template. Built-ins cannot be deleted.
    pub fn delete_custom(&mut self, id: &str) -> bool {
        let before = self.custom.len();
        self.custom.retain(|template| template.id != id);
        before != self.custom.len()
    }

    /// Serialize the custom templates.
    pub fn custom_to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.custom)
    }

    /// Replace the custom templates from JSON. Malformed data yields an empty list.
    pub fn load_custom_json(&mut self, json: &str) {
        self.custom = match serde_json::from_str(json) {
            Ok(templates) => templates,
            Err(err) => {
                log::warn!("Ignoring malformed custom templates: {err}");
                Vec::new()
            }
        };
    }
}

/// Sequentially numbered template elements.
struct Layout {
    elements: Vec<Element>,
}

impl Layout {
    fn new() -> Self {
        Self { elements: Vec::new() }
    }

    fn add(
        &mut self,
        kind: ElementKind,
        (x, y, width, height): (f64, f64, f64, f64),
        label: &str,
        props: Value,
        style: StyleUpdate,
    ) -> &mut Self {
        let mut element = Element::new(kind, x, y, width, height);
        element.label = label.to_string();
        element.style = style.resolve();
        if let Value::Object(map) = props {
            element.props = map;
        }
        element.field_meta.field_id = field_id_for(self.elements.len());
        element.field_meta.description = label.to_string();
        element.field_meta.field_type = kind.tag().to_string();
        self.elements.push(element);
        self
    }

    fn plain(&mut self, kind: ElementKind, rect: (f64, f64, f64, f64), label: &str) -> &mut Self {
        self.add(kind, rect, label, json!({}), StyleUpdate::default())
    }

    fn finish(&mut self) -> Vec<Element> {
        std::mem::take(&mut self.elements)
    }
}

fn heading(font_size: f64) -> StyleUpdate {
    StyleUpdate {
        font_size: Some(font_size),
        font_weight: Some(FontWeight::Heavy),
        ..StyleUpdate::default()
    }
}

fn caption(align: TextAlign) -> StyleUpdate {
    StyleUpdate {
        font_size: Some(11.0),
        font_color: Some("#788fa6".to_string()),
        text_align: Some(align),
        ..StyleUpdate::default()
    }
}

fn selection_screen() -> Vec<Element> {
    use ElementKind as K;
    Layout::new()
        .add(K::Toolbar, (0.0, 0.0, 1440.0, 48.0), "Report Selection", json!({ "buttons": "Execute, Save Variant" }), StyleUpdate::default())
        .add(K::Section, (20.0, 68.0, 1400.0, 50.0), "Selection Criteria", json!({}), heading(16.0))
        .plain(K::Input, (40.0, 130.0, 320.0, 56.0), "Company Code")
        .plain(K::Input, (380.0, 130.0, 320.0, 56.0), "Fiscal Year")
        .plain(K::RangeInput, (720.0, 130.0, 400.0, 56.0), "Posting Date")
        .plain(K::Input, (40.0, 200.0, 320.0, 56.0), "Document Number")
        .add(K::Dropdown, (380.0, 200.0, 320.0, 56.0), "Document Type", json!({ "options": "All, SA, RE, KR, KZ" }), StyleUpdate::default())
        .plain(K::Input, (720.0, 200.0, 400.0, 56.0), "Reference")
        .plain(K::Input, (40.0, 270.0, 320.0, 56.0), "Vendor")
        .plain(K::Input, (380.0, 270.0, 320.0, 56.0), "Customer")
        .add(K::Dropdown, (720.0, 270.0, 400.0, 56.0), "Currency", json!({ "options": "All, USD, EUR, CNY, JPY" }), StyleUpdate::default())
        .add(K::Section, (20.0, 350.0, 1400.0, 40.0), "Output Options", json!({}), heading(16.0))
        .add(K::Checkbox, (40.0, 400.0, 200.0, 32.0), "Show Line Items", json!({ "checked": true }), StyleUpdate::default())
        .add(K::Checkbox, (260.0, 400.0, 200.0, 32.0), "Show Totals", json!({ "checked": true }), StyleUpdate::default())
        .add(K::Checkbox, (480.0, 400.0, 200.0, 32.0), "Grid Display", json!({ "checked": false }), StyleUpdate::default())
        .add(
            K::Button,
            (40.0, 460.0, 140.0, 40.0),
            "Execute",
            json!({ "variant": "emphasized" }),
            StyleUpdate {
                font_weight: Some(FontWeight::Bold),
                ..StyleUpdate::default()
            },
        )
        .add(K::Button, (200.0, 460.0, 140.0, 40.0), "Save Variant", json!({ "variant": "default" }), StyleUpdate::default())
        .finish()
}

fn report_list() -> Vec<Element> {
    use ElementKind as K;
    Layout::new()
        .add(
            K::Toolbar,
            (0.0, 0.0, 1440.0, 48.0),
            "Report: Sales Order List",
            json!({ "buttons": "Filter, Sort, Export, Print" }),
            StyleUpdate::default(),
        )
        .plain(K::GroupBox, (20.0, 68.0, 1400.0, 80.0), "Filters")
        .plain(K::SearchBox, (40.0, 96.0, 240.0, 36.0), "Search...")
        .add(K::Dropdown, (300.0, 88.0, 200.0, 56.0), "Status", json!({ "options": "All, Open, Completed, Cancelled" }), StyleUpdate::default())
        .plain(K::RangeInput, (520.0, 88.0, 360.0, 56.0), "Date Range")
        .add(K::Button, (910.0, 96.0, 100.0, 36.0), "Go", json!({ "variant": "emphasized" }), StyleUpdate::default())
        .add(
            K::Table,
            (20.0, 168.0, 1400.0, 380.0),
            "Sales Orders",
            json!({
                "columns": "Order No., Customer, Material, Qty, UoM, Net Value, Currency, Status, Created Date",
                "rows": 10
            }),
            StyleUpdate::default(),
        )
        .add(
            K::Text,
            (20.0, 560.0, 300.0, 24.0),
            "Showing 1-10 of 245 entries",
            json!({}),
            StyleUpdate {
                font_size: Some(12.0),
                font_color: Some("#788fa6".to_string()),
                ..StyleUpdate::default()
            },
        )
        .add(
            K::Text,
            (1200.0, 560.0, 220.0, 24.0),
            "Total: 1,234,567.00 USD",
            json!({}),
            StyleUpdate {
                text_align: Some(TextAlign::Right),
                ..heading(12.0)
            },
        )
        .finish()
}

fn interface_diagram() -> Vec<Element> {
    use ElementKind as K;
    let mut layout = Layout::new();
    layout.add(
        K::Text,
        (500.0, 20.0, 440.0, 40.0),
        "System Interface Architecture",
        json!({}),
        StyleUpdate {
            text_align: Some(TextAlign::Center),
            ..heading(24.0)
        },
    );
    for (y, label) in [(120.0, "ERP System"), (230.0, "CRM System"), (340.0, "Legacy System")] {
        layout.plain(K::ProcessBox, (40.0, y, 200.0, 70.0), label);
    }
    layout.add(
        K::ProcessBox,
        (400.0, 200.0, 220.0, 100.0),
        "Integration\nMiddleware",
        json!({}),
        StyleUpdate {
            background_color: Some("#fff3e0".to_string()),
            font_color: Some("#e76500".to_string()),
            ..StyleUpdate::default()
        },
    );
    for (y, label) in [(120.0, "Data Warehouse"), (230.0, "Third-party API"), (340.0, "Data Lake")] {
        layout.plain(K::ProcessBox, (780.0, y, 200.0, 70.0), label);
    }
    for x in [240.0, 620.0] {
        for y in [145.0, 255.0, 365.0] {
            layout.plain(K::ArrowRight, (x, y, 160.0, 30.0), "");
        }
    }
    let captions = [
        ((270.0, 120.0, 100.0), "IDoc"),
        ((270.0, 232.0, 100.0), "RFC"),
        ((270.0, 342.0, 100.0), "File/FTP"),
        ((640.0, 120.0, 120.0), "ODP/SLT"),
        ((640.0, 232.0, 120.0), "REST API"),
        ((640.0, 342.0, 120.0), "JDBC"),
    ];
    for ((x, y, width), label) in captions {
        layout.add(K::Text, (x, y, width, 20.0), label, json!({}), caption(TextAlign::Center));
    }
    layout.add(
        K::Banner,
        (400.0, 430.0, 220.0, 40.0),
        "Monitoring & Alerting",
        json!({ "variant": "information" }),
        StyleUpdate::default(),
    );
    layout.finish()
}

fn screen_enhancement() -> Vec<Element> {
    use ElementKind as K;
    let mut layout = Layout::new();
    layout
        .add(
            K::Toolbar,
            (0.0, 0.0, 1440.0, 48.0),
            "Create Sales Order (Enhanced)",
            json!({ "buttons": "Save, Check, Back" }),
            StyleUpdate::default(),
        )
        .add(K::Section, (20.0, 68.0, 680.0, 40.0), "Standard Fields", json!({}), heading(16.0));
    let standard = [
        (40.0, 120.0, "Order Type"),
        (360.0, 120.0, "Sales Org."),
        (40.0, 190.0, "Sold-to Party"),
        (360.0, 190.0, "Ship-to Party"),
        (40.0, 260.0, "PO Number"),
        (360.0, 260.0, "PO Date"),
    ];
    for (x, y, label) in standard {
        layout.plain(K::Input, (x, y, 300.0, 56.0), label);
    }
    layout
        .add(
            K::Section,
            (720.0, 68.0, 700.0, 40.0),
            "Enhancement Fields (Custom)",
            json!({}),
            StyleUpdate {
                font_color: Some("#e76500".to_string()),
                ..heading(16.0)
            },
        )
        .add(
            K::Banner,
            (740.0, 120.0, 660.0, 36.0),
            "These fields are added via an enhancement",
            json!({ "variant": "warning" }),
            StyleUpdate::default(),
        )
        .plain(K::Input, (740.0, 170.0, 320.0, 56.0), "Custom Field 1 (ZZ_FIELD1)")
        .plain(K::Input, (1080.0, 170.0, 320.0, 56.0), "Custom Field 2 (ZZ_FIELD2)")
        .add(
            K::Dropdown,
            (740.0, 240.0, 320.0, 56.0),
            "Custom Category",
            json!({ "options": "Category A, Category B, Category C" }),
            StyleUpdate::default(),
        )
        .add(K::Checkbox, (1080.0, 256.0, 250.0, 32.0), "Custom Flag (ZZ_FLAG)", json!({ "checked": false }), StyleUpdate::default())
        .add(
            K::Tab,
            (20.0, 340.0, 1400.0, 260.0),
            "Sales Order",
            json!({ "tabs": "Item Overview, Item Detail, Conditions, Account Assignment, Schedule Lines", "activeTab": 0 }),
            StyleUpdate::default(),
        )
        .add(
            K::Banner,
            (20.0, 620.0, 1400.0, 36.0),
            "Enhancement point: sales document save",
            json!({ "variant": "information" }),
            StyleUpdate::default(),
        );
    layout.finish()
}

fn builtin_templates() -> Vec<Template> {
    let template = |id: &str,
                    name: &str,
                    description: &str,
                    category: TemplateCategory,
                    elements: Vec<Element>,
                    (width, height): (f64, f64)| Template {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        elements,
        canvas_width: Some(width),
        canvas_height: Some(height),
        is_custom: false,
    };
    vec![
        template(
            "selection-screen",
            "Selection Screen",
            "Report selection screen with filters, variants and an execute button",
            TemplateCategory::SelectionScreen,
            selection_screen(),
            (1440.0, 600.0),
        ),
        template(
            "report-list",
            "Report List",
            "List report with filter bar, data table and toolbar",
            TemplateCategory::ReportList,
            report_list(),
            (1440.0, 620.0),
        ),
        template(
            "interface-diagram",
            "Interface Diagram",
            "System interface architecture with source, middleware and target systems",
            TemplateCategory::InterfaceDiagram,
            interface_diagram(),
            (1040.0, 520.0),
        ),
        template(
            "screen-enhancement",
            "Screen Enhancement",
            "Transaction screen with standard and custom enhancement fields",
            TemplateCategory::ScreenEnhancement,
            screen_enhancement(),
            (1440.0, 700.0),
        ),
    ]
}
