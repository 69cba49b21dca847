use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::model::{Timestamp, TrainRecord};

const TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

pub const COLUMNS: [&str; 11] = [
    "category",
    "number",
    "name",
    "from_station",
    "from_time",
    "to_station",
    "to_time",
    "current_station",
    "scheduled_arrival",
    "actual_arrival",
    "delay",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Json,
}

/// Flat CSV shape of a record; field order matches `COLUMNS`.
#[derive(Serialize)]
struct CsvRow<'a> {
    category: &'a str,
    number: u32,
    name: &'a str,
    from_station: &'a str,
    from_time: String,
    to_station: &'a str,
    to_time: String,
    current_station: &'a str,
    scheduled_arrival: String,
    actual_arrival: String,
    delay: u32,
}

impl<'a> From<&'a TrainRecord> for CsvRow<'a> {
    fn from(t: &'a TrainRecord) -> Self {
        CsvRow {
            category: &t.category,
            number: t.number,
            name: &t.name,
            from_station: &t.scheduled_from.station,
            from_time: format_time(&t.scheduled_from.time),
            to_station: &t.scheduled_to.station,
            to_time: format_time(&t.scheduled_to.time),
            current_station: &t.current.station,
            scheduled_arrival: format_time(&t.current.scheduled_time),
            actual_arrival: format_time(&t.current.actual_time),
            delay: t.current.delay_minutes,
        }
    }
}

/// `DD.MM.YYYY HH:MM`, or empty when the time is unknown.
pub fn format_time(ts: &Timestamp) -> String {
    ts.map(|t| t.format(TIME_FORMAT).to_string()).unwrap_or_default()
}

pub fn write<W: Write>(out: W, records: &[TrainRecord], format: Format, header: bool) -> Result<()> {
    match format {
        Format::Csv => write_csv(out, records, header),
        Format::Json => write_json(out, records),
    }
}

pub fn write_csv<W: Write>(out: W, records: &[TrainRecord], header: bool) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    if header {
        wtr.write_record(COLUMNS)?;
    }
    for record in records {
        wtr.serialize(CsvRow::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(mut out: W, records: &[TrainRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, records)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
