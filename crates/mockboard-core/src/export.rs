//! Field table export.
//!
//! One row per element in draw order, one column per [`FieldColumn`].

use crate::canvas::CanvasStore;
use crate::element::{Element, FieldColumn};
use crate::error::{CanvasError, CanvasResult};

fn header() -> Vec<&'static str> {
    FieldColumn::ALL.iter().map(|column| column.title()).collect()
}

fn row(element: &Element) -> Vec<&str> {
    FieldColumn::ALL
        .iter()
        .map(|column| element.field_meta.get(*column))
        .collect()
}

/// Render the field table as CSV with a header row.
pub fn field_table_csv(store: &CanvasStore) -> CanvasResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(header())
        .map_err(|e| CanvasError::Export(e.to_string()))?;
    for element in store.ordered_elements() {
        writer
            .write_record(row(element))
            .map_err(|e| CanvasError::Export(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CanvasError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CanvasError::Export(e.to_string()))
}

/// Render the field table as tab-separated text, for pasting into a spreadsheet.
///
/// Tabs and line breaks inside cells are flattened to spaces.
pub fn field_table_tsv(store: &CanvasStore) -> String {
    let clean = |cell: &str| cell.replace(['\t', '\n', '\r'], " ");
    let mut lines = vec![header().join("\t")];
    lines.extend(
        store
            .ordered_elements()
            .map(|element| row(element).into_iter().map(clean).collect::<Vec<_>>().join("\t")),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use kurbo::Point;

    #[test]
    fn test_csv_header_and_rows() {
        let mut store = CanvasStore::default();
        let first = store.add(ElementKind::Input, Point::new(0.0, 0.0)).unwrap();
        store.add(ElementKind::Button, Point::new(0.0, 100.0)).unwrap();
        store.set_field_meta(first, FieldColumn::Remarks, "needs \"check\", later");

        let csv = field_table_csv(&store).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Field ID,Technical Field,Description,Field Type,Data Type,Length,Sample,Logic,Remarks"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("001,"));
        assert!(lines[1].ends_with("\"needs \"\"check\"\", later\""));
        assert!(lines[2].starts_with("002,"));
    }

    #[test]
    fn test_rows_follow_draw_order() {
        let mut store = CanvasStore::default();
        let first = store.add(ElementKind::Text, Point::ZERO).unwrap();
        store.add(ElementKind::Text, Point::ZERO).unwrap();
        store.bring_to_front(&[first]);

        let tsv = field_table_tsv(&store);
        let ids: Vec<_> = tsv.lines().skip(1).map(|line| line.split('\t').next().unwrap()).collect();
        assert_eq!(ids, ["002", "001"]);
    }

    #[test]
    fn test_tsv_flattens_tabs() {
        let mut store = CanvasStore::default();
        let id = store.add(ElementKind::Text, Point::ZERO).unwrap();
        store.set_field_meta(id, FieldColumn::Logic, "a\tb\nc");

        let tsv = field_table_tsv(&store);
        let row = tsv.lines().nth(1).unwrap();
        assert_eq!(row.split('\t').count(), FieldColumn::ALL.len());
        assert!(row.contains("a b c"));
    }

    #[test]
    fn test_empty_table_is_header_only() {
        let store = CanvasStore::default();
        assert_eq!(field_table_tsv(&store).lines().count(), 1);
        assert_eq!(field_table_csv(&store).unwrap().lines().count(), 1);
    }
}
