pub mod dom;
pub mod patterns;
pub mod table;
pub mod walker;

use tracing::info;

use crate::error::ExtractError;
use crate::model::TrainRecord;
pub use walker::FailurePolicy;

/// HTML text → one record per train block, in page order.
pub fn parse_document(html: &str, policy: FailurePolicy) -> Result<Vec<TrainRecord>, ExtractError> {
    let doc = dom::parse_html(html);
    let records = walker::walk(&doc, policy)?;
    info!(trains = records.len(), "Parsed status page");
    Ok(records)
}
