//! CSV export of a whole filtered partition.

use chrono::NaiveDate;

use crate::models::{CatalogRow, PartitionKind};

/// Header row of every export.
pub const CSV_HEADER: &str = "ID,Title,Size,Status,Path";
/// Byte-order mark so spreadsheet tools detect UTF-8.
pub const UTF8_BOM: char = '\u{feff}';

/// A rendered export ready to be written or downloaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvExport {
    /// Deterministic file name, e.g. `wallpapers_unsubscribed_2024-05-01.csv`.
    pub file_name: String,
    /// File contents including the byte-order mark.
    pub contents: String,
    /// Number of data rows.
    pub rows: usize,
}

/// File name for an export of `kind` taken on `date`.
#[must_use]
pub fn export_file_name(kind: PartitionKind, date: NaiveDate) -> String {
    format!("wallpapers_{kind}_{}.csv", date.format("%Y-%m-%d"))
}

/// Quote a free-text field, doubling embedded quotes.
#[must_use]
pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Render `rows` as CSV with the byte-order mark and header.
#[must_use]
pub fn render_csv(rows: &[CatalogRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(rows.iter().map(|row| {
        [
            row.id.clone(),
            quote_field(&row.title),
            row.size_label.clone(),
            row.status_label().to_string(),
            quote_field(&row.path),
        ]
        .join(",")
    }));
    format!("{UTF8_BOM}{}", lines.join("\n"))
}

/// Build the export for `rows`, or `None` when there is nothing to export.
#[must_use]
pub fn build_export(kind: PartitionKind, rows: &[CatalogRow], date: NaiveDate) -> Option<CsvExport> {
    if rows.is_empty() {
        return None;
    }
    Some(CsvExport {
        file_name: export_file_name(kind, date),
        contents: render_csv(rows),
        rows: rows.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::row;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap_or_default()
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let mut sample = row("7", false);
        sample.title = "Foo \"Bar\"".into();
        sample.path = "C:\\a \"b\"".into();
        let csv = render_csv(&[sample]);

        assert!(csv.starts_with('\u{feff}'));
        let lines: Vec<&str> = csv.trim_start_matches(UTF8_BOM).lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "7,\"Foo \"\"Bar\"\"\",10.0 B,Unsubscribed,\"C:\\a \"\"b\"\"\""
        );
    }

    #[test]
    fn empty_set_produces_no_file() {
        assert_eq!(build_export(PartitionKind::Subscribed, &[], day()), None);
    }

    #[test]
    fn file_name_is_derived_from_kind_and_date() {
        let export = build_export(PartitionKind::Unsubscribed, &[row("1", false)], day());
        assert_eq!(
            export.map(|export| export.file_name),
            Some("wallpapers_unsubscribed_2024-05-01.csv".to_string())
        );
    }
}
