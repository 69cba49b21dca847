use super::dom::Element;
use super::patterns::{extract_delay_digits, parse_date_time};
use crate::error::ExtractError;
use crate::model::DelayReport;

/// A table cell reduced to text, with any nested table cut out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatCell {
    pub text: String,
    pub first_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRow {
    pub cells: Vec<FlatCell>,
}

impl FlatRow {
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }
}

/// Rows that belong to the table itself. Rows of tables nested inside its
/// cells are dropped together with their text, and so are rows left with
/// no visible text afterwards.
pub fn flatten_rows<'a, E: Element<'a>>(table: E) -> Vec<FlatRow> {
    own_rows(table)
        .into_iter()
        .filter(|row| !row.text_skipping("table").trim().is_empty())
        .map(|row| FlatRow {
            cells: row
                .element_children()
                .into_iter()
                .filter(|c| c.tag_name().eq_ignore_ascii_case("td"))
                .map(|cell| FlatCell {
                    text: cell.text_skipping("table"),
                    first_text: cell.first_text_skipping("table").map(str::to_string),
                })
                .collect(),
        })
        .collect()
}

/// `tr` elements of the outermost table under `root`, in document order.
fn own_rows<'a, E: Element<'a>>(root: E) -> Vec<E> {
    let mut rows = Vec::new();
    let root_is_table = root.tag_name().eq_ignore_ascii_case("table");
    let mut stack: Vec<(E, bool)> = root
        .element_children()
        .into_iter()
        .rev()
        .map(|el| (el, root_is_table))
        .collect();

    while let Some((el, inside_table)) = stack.pop() {
        let tag = el.tag_name();
        if tag.eq_ignore_ascii_case("tr") {
            rows.push(el);
            continue;
        }
        let is_table = tag.eq_ignore_ascii_case("table");
        // Only the outermost table contributes rows.
        if is_table && inside_table {
            continue;
        }
        stack.extend(
            el.element_children()
                .into_iter()
                .rev()
                .map(|child| (child, inside_table || is_table)),
        );
    }
    rows
}

/// Read the live status from the flattened rows. Rows carry no usable
/// labels, so meaning comes from position alone:
///
/// | row | meaning                                   |
/// |-----|-------------------------------------------|
/// | 0   | delay; a single merged cell means on time |
/// | 1   | current station                           |
/// | 2   | actual arrival                            |
/// | 3   | scheduled arrival                         |
///
/// Later rows are ignored. Rows missing at the end keep their defaults.
pub fn read_delay_report(rows: &[FlatRow]) -> Result<DelayReport, ExtractError> {
    let mut report = DelayReport::default();

    if let Some(row) = rows.first() {
        report.delay_minutes = if row.cells.len() == 1 {
            0
        } else {
            extract_delay_digits(&row.text())
        };
    }
    if let Some(row) = rows.get(1) {
        report.station = value_text(row, 1)?.unwrap_or_default().to_string();
    }
    if let Some(row) = rows.get(2) {
        report.actual_time = value_text(row, 2)?.and_then(parse_date_time);
    }
    if let Some(row) = rows.get(3) {
        report.scheduled_time = value_text(row, 3)?.and_then(parse_date_time);
    }

    Ok(report)
}

fn value_text(row: &FlatRow, index: usize) -> Result<Option<&str>, ExtractError> {
    row.cells
        .get(1)
        .map(|cell| cell.first_text.as_deref())
        .ok_or_else(|| ExtractError::structural(format!("delay table row {index} has no value cell")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::dom::{parse_html, Document};
    use chrono::{Datelike, Local, Timelike};

    const NESTED: &str = r#"
        <table class="trainDelayTable">
          <tr><td><table><tr><td><img src="ico.png"></td></tr></table></td></tr>
          <tr><td>Meškanie</td><td>+15 min</td></tr>
          <tr><td>Poloha</td><td>Trenčín<table><tr><td>kol. 2</td></tr><tr><td>sektor B</td></tr></table></td></tr>
          <tr><td> </td></tr>
          <tr><td>Skutočný príchod</td><td>15.03. 14:22</td></tr>
          <tr><td>Plánovaný príchod</td><td><b>15.03. 14:10</b> (pravidelný)</td></tr>
          <tr><td>Dopravca</td><td>ZSSK</td></tr>
        </table>
    "#;

    fn rows_of(html: &str) -> Vec<FlatRow> {
        let doc = parse_html(html);
        let table = doc.find_by_marker("trainDelayTable")[0];
        flatten_rows(table)
    }

    fn row(cells: &[&str]) -> FlatRow {
        FlatRow {
            cells: cells
                .iter()
                .map(|t| FlatCell {
                    text: t.to_string(),
                    first_text: Some(t.trim()).filter(|t| !t.is_empty()).map(str::to_string),
                })
                .collect(),
        }
    }

    #[test]
    fn flatten_drops_nested_and_blank_rows() {
        let rows = rows_of(NESTED);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].text(), "Meškanie+15 min");
        assert_eq!(rows[1].cells.len(), 2);
        assert_eq!(rows[1].cells[1].text, "Trenčín");
        assert!(rows.iter().all(|r| !r.text().contains("sektor")));
        assert_eq!(rows[3].cells[1].first_text.as_deref(), Some("15.03. 14:10"));
    }

    #[test]
    fn flatten_accepts_wrapper_around_table() {
        let html = r#"<div class="trainDelayTable"><table>
            <tr><td>a</td><td>1</td></tr>
            <tr><td>b</td><td><table><tr><td>x</td></tr></table></td></tr>
        </table></div>"#;
        let rows = rows_of(html);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].text(), "b");
    }

    #[test]
    fn deeply_nested_value_cell() {
        let depth = 5000;
        let html = format!(
            r#"<table class="trainDelayTable">
                <tr><td>Meškanie</td><td>7 min</td></tr>
                <tr><td>Poloha</td><td>{}Trenčín{}</td></tr>
            </table>"#,
            "<b>".repeat(depth),
            "</b>".repeat(depth)
        );
        let rows = rows_of(&html);
        assert_eq!(rows.len(), 2);
        let report = read_delay_report(&rows).unwrap();
        assert_eq!(report.delay_minutes, 7);
        assert_eq!(report.station, "Trenčín");
    }

    #[test]
    fn reads_positional_rows() {
        let report = read_delay_report(&rows_of(NESTED)).unwrap();
        assert_eq!(report.delay_minutes, 15);
        assert_eq!(report.station, "Trenčín");

        let actual = report.actual_time.unwrap();
        assert_eq!((actual.day(), actual.month(), actual.hour(), actual.minute()), (15, 3, 14, 22));
        assert_eq!(actual.year(), Local::now().year());
        let scheduled = report.scheduled_time.unwrap();
        assert_eq!((scheduled.hour(), scheduled.minute()), (14, 10));
    }

    #[test]
    fn single_cell_delay_row_is_on_time() {
        let rows = vec![row(&["Vlak 12 ide načas"]), row(&["Stanica", "Žilina"])];
        let report = read_delay_report(&rows).unwrap();
        assert_eq!(report.delay_minutes, 0);
        assert_eq!(report.station, "Žilina");
        assert_eq!(report.actual_time, None);
        assert_eq!(report.scheduled_time, None);
    }

    #[test]
    fn delay_row_without_digits_is_zero() {
        let report = read_delay_report(&[row(&["Meškanie", "bez meškania"])]).unwrap();
        assert_eq!(report.delay_minutes, 0);
    }

    #[test]
    fn unparseable_times_are_absent() {
        let rows = vec![
            row(&["Meškanie", "5"]),
            row(&["Stanica", "Poprad-Tatry"]),
            row(&["Skutočný príchod", ""]),
            row(&["Plánovaný príchod", "neznámy"]),
        ];
        let report = read_delay_report(&rows).unwrap();
        assert_eq!(report.delay_minutes, 5);
        assert_eq!(report.actual_time, None);
        assert_eq!(report.scheduled_time, None);
    }

    #[test]
    fn missing_value_cell_is_structural() {
        let rows = vec![row(&["Meškanie", "5"]), row(&["Stanica"])];
        let err = read_delay_report(&rows).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn empty_table_gives_defaults() {
        assert_eq!(read_delay_report(&[]).unwrap(), DelayReport::default());
    }
}
