use tracing::{debug, warn};

use super::dom::{Document, Element};
use super::patterns::{parse_denomination, parse_route};
use super::table::{flatten_rows, read_delay_report};
use crate::error::ExtractError;
use crate::model::TrainRecord;

pub const HEADER_MARKER: &str = "accordionHeader";
pub const TABLE_MARKER: &str = "trainDelayTable";

const DENOMINATION_SPAN: usize = 0;
const ROUTE_SPAN: usize = 2;

/// What to do when a single train block cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Fail the whole run on the first bad train.
    #[default]
    Abort,
    /// Log the bad train and keep the rest.
    Skip,
}

/// Pair every train header with its delay table and build one record per
/// pair, in page order.
pub fn walk<D: Document>(doc: &D, policy: FailurePolicy) -> Result<Vec<TrainRecord>, ExtractError> {
    let headers = doc.find_by_marker(HEADER_MARKER);
    let tables = doc.find_by_marker(TABLE_MARKER);
    if headers.len() != tables.len() {
        return Err(ExtractError::HeaderTableCount {
            headers: headers.len(),
            tables: tables.len(),
        });
    }
    debug!(blocks = headers.len(), "Located train blocks");

    let mut records = Vec::with_capacity(headers.len());
    for (index, (header, table)) in headers.into_iter().zip(tables).enumerate() {
        match read_block(header, table) {
            Ok(record) => records.push(record),
            Err(e) => match policy {
                FailurePolicy::Abort => return Err(e.in_train(index)),
                FailurePolicy::Skip => {
                    warn!(block = index, error = %e, "Skipping unreadable train block");
                }
            },
        }
    }

    Ok(records)
}

fn read_block<'a, E: Element<'a>>(header: E, table: E) -> Result<TrainRecord, ExtractError> {
    let spans = header.descendants_named("span");
    let span_text = |i: usize| {
        spans
            .get(i)
            .map(|s| s.text_content())
            .ok_or_else(|| ExtractError::structural(format!("train header has no span #{i}")))
    };

    let (category, number, name) = parse_denomination(&span_text(DENOMINATION_SPAN)?)?;
    let (scheduled_from, scheduled_to) = parse_route(&span_text(ROUTE_SPAN)?)?;
    let current = read_delay_report(&flatten_rows(table))?;

    Ok(TrainRecord {
        category,
        number,
        name,
        scheduled_from,
        scheduled_to,
        current,
    })
}
