//! HTML summary-table extractor.
//!
//! Weather Underground dashboard pages carry a summary table with one row
//! per statistic. The extractor locates rows by label text, reads the data
//! cells in document order, and pulls the first number out of each cell.
//! Anything that cannot be read yields an absent field, never an error.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

use crate::summary::DailySummary;

const TEMPERATURE_LABEL: &str = "Temperature";
const WIND_GUST_LABEL: &str = "Wind Gust";
const PRECIPITATION_LABEL: &str = "Precipitation";

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("number pattern"));

/// Parses `html` and extracts the daily summary from it.
pub fn extract_from_html(html: &str) -> DailySummary {
    let doc = Html::parse_document(html);
    extract_summary(&doc)
}

/// Extracts summary statistics from a parsed page.
///
/// Never fails: a missing row, a short row, or unparseable cell text leaves
/// the affected field(s) `None` and extraction moves on to the next label.
pub fn extract_summary(doc: &Html) -> DailySummary {
    let mut summary = DailySummary::default();

    // Cell 0 and cell 1 hold high and low, but not in a guaranteed order,
    // so the pair is sorted by comparison rather than by position.
    match find_row_by_label(doc, TEMPERATURE_LABEL) {
        Some(row) => {
            let cells = data_cells(row);
            if cells.len() >= 2 {
                let a = parse_first_number(&cell_text(cells[0]));
                let b = parse_first_number(&cell_text(cells[1]));
                if let (Some(a), Some(b)) = (a, b) {
                    summary.max_temp = Some(a.max(b));
                    summary.min_temp = Some(a.min(b));
                } else {
                    debug!(label = TEMPERATURE_LABEL, "Temperature cells not numeric");
                }
            } else {
                debug!(
                    label = TEMPERATURE_LABEL,
                    cells = cells.len(),
                    "Temperature row too short"
                );
            }
        }
        None => debug!(label = TEMPERATURE_LABEL, "Row not found"),
    }

    summary.max_gust = single_cell_value(doc, WIND_GUST_LABEL);
    summary.sum_prec = single_cell_value(doc, PRECIPITATION_LABEL);

    summary
}

/// Reads the first data cell of the row matching `label`, if any.
fn single_cell_value(doc: &Html, label: &str) -> Option<f64> {
    let row = find_row_by_label(doc, label)?;
    let cells = data_cells(row);

    let Some(cell) = cells.first() else {
        debug!(label, "Row has no data cells");
        return None;
    };

    let text = cell_text(*cell);
    let value = parse_first_number(&text);
    if value.is_none() {
        // Placeholder text like "--" is normal for stations without a sensor.
        debug!(label, cell = %text, "Cell not numeric, leaving field absent");
    }
    value
}

/// Finds the first `<tr>` in document order with any descendant text node
/// containing `label` (case-sensitive substring match).
pub fn find_row_by_label<'a>(doc: &'a Html, label: &str) -> Option<ElementRef<'a>> {
    let rows = Selector::parse("tr").ok()?;
    doc.select(&rows)
        .find(|row| row.text().any(|t| t.contains(label)))
}

/// Returns the row's `<td>` descendants in document order.
pub fn data_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    match Selector::parse("td") {
        Ok(cells) => row.select(&cells).collect(),
        Err(_) => Vec::new(),
    }
}

/// Flattened, trimmed text content of a cell.
pub fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Extracts the first decimal number from `text`.
///
/// Matches a run of digits with at most one decimal point, so unit suffixes
/// (`72.5 °F`, `14 mph`) and surrounding whitespace are tolerated. Text with
/// no digits yields `None`.
pub fn parse_first_number(text: &str) -> Option<f64> {
    NUMBER_RE.find(text)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_of(html: &str) -> DailySummary {
        extract_from_html(html)
    }

    fn table(rows: &str) -> String {
        format!("<html><body><table>{rows}</table></body></html>")
    }

    #[test]
    fn test_parse_first_number_plain() {
        assert_eq!(parse_first_number("72"), Some(72.0));
        assert_eq!(parse_first_number("72.5"), Some(72.5));
    }

    #[test]
    fn test_parse_first_number_unit_suffixes() {
        assert_eq!(parse_first_number("72.5 °F"), Some(72.5));
        assert_eq!(parse_first_number("14 mph"), Some(14.0));
        assert_eq!(parse_first_number("0.12 in"), Some(0.12));
    }

    #[test]
    fn test_parse_first_number_surrounding_whitespace() {
        assert_eq!(parse_first_number("  61.3  "), Some(61.3));
    }

    #[test]
    fn test_parse_first_number_takes_first_match() {
        assert_eq!(parse_first_number("12 gusting to 30"), Some(12.0));
    }

    #[test]
    fn test_parse_first_number_single_decimal_point() {
        // A second dot ends the match.
        assert_eq!(parse_first_number("1.2.3"), Some(1.2));
    }

    #[test]
    fn test_parse_first_number_no_digits() {
        assert_eq!(parse_first_number(""), None);
        assert_eq!(parse_first_number("--"), None);
        assert_eq!(parse_first_number("n/a"), None);
    }

    #[test]
    fn test_temperature_pair_is_sorted() {
        // High listed first.
        let s = summary_of(&table(
            "<tr><th>Temperature</th><td>75 °F</td><td>60 °F</td><td>68 °F</td></tr>",
        ));
        assert_eq!(s.max_temp, Some(75.0));
        assert_eq!(s.min_temp, Some(60.0));

        // Low listed first.
        let s = summary_of(&table(
            "<tr><th>Temperature</th><td>60 °F</td><td>75 °F</td><td>68 °F</td></tr>",
        ));
        assert_eq!(s.max_temp, Some(75.0));
        assert_eq!(s.min_temp, Some(60.0));
    }

    #[test]
    fn test_temperature_row_with_one_cell_leaves_fields_absent() {
        let s = summary_of(&table("<tr><th>Temperature</th><td>75 °F</td></tr>"));
        assert_eq!(s.max_temp, None);
        assert_eq!(s.min_temp, None);
    }

    #[test]
    fn test_temperature_with_one_unparseable_cell_leaves_both_absent() {
        let s = summary_of(&table(
            "<tr><th>Temperature</th><td>75 °F</td><td>--</td></tr>",
        ));
        assert_eq!(s.max_temp, None);
        assert_eq!(s.min_temp, None);
    }

    #[test]
    fn test_gust_placeholder_yields_absent() {
        let s = summary_of(&table("<tr><th>Wind Gust</th><td>--</td></tr>"));
        assert_eq!(s.max_gust, None);
    }

    #[test]
    fn test_gust_and_precipitation_read_first_cell() {
        let s = summary_of(&table(
            "<tr><th>Wind Gust</th><td>22.4 mph</td><td>5 mph</td></tr>\
             <tr><th>Precipitation</th><td>0.35 in</td></tr>",
        ));
        assert_eq!(s.max_gust, Some(22.4));
        assert_eq!(s.sum_prec, Some(0.35));
    }

    #[test]
    fn test_label_in_nested_span_is_found() {
        let s = summary_of(&table(
            "<tr><th><span><span>Wind Gust</span></span></th><td>18 mph</td></tr>",
        ));
        assert_eq!(s.max_gust, Some(18.0));
    }

    #[test]
    fn test_label_match_is_case_sensitive() {
        let s = summary_of(&table("<tr><th>wind gust</th><td>18 mph</td></tr>"));
        assert_eq!(s.max_gust, None);
    }

    #[test]
    fn test_first_matching_row_wins() {
        let s = summary_of(&table(
            "<tr><th>Precipitation</th><td>0.1 in</td></tr>\
             <tr><th>Precipitation</th><td>0.9 in</td></tr>",
        ));
        assert_eq!(s.sum_prec, Some(0.1));
    }

    #[test]
    fn test_one_bad_row_does_not_abort_the_rest() {
        let s = summary_of(&table(
            "<tr><th>Temperature</th><td>junk</td><td>junk</td></tr>\
             <tr><th>Wind Gust</th><td>12 mph</td></tr>\
             <tr><th>Precipitation</th><td>0.2 in</td></tr>",
        ));
        assert_eq!(s.max_temp, None);
        assert_eq!(s.min_temp, None);
        assert_eq!(s.max_gust, Some(12.0));
        assert_eq!(s.sum_prec, Some(0.2));
    }

    #[test]
    fn test_empty_document_yields_empty_summary() {
        let s = summary_of("<html><body><p>404 not found</p></body></html>");
        assert!(s.is_empty());
    }
}
