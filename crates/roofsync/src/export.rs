//! Single-property CSV report.
//!
//! The report is two lines: a header and one row with every value quoted.
//!
//! ```text
//! Property Address,Zip Code,Total Roof Area (sq ft),...,Timestamp
//! "400 Harbor Way","94107","50000","40000","80%","800000","800.00","0.8000","20",...
//! ```

use std::io;

use chrono::SecondsFormat;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use roofsync_core::Property;
use roofsync_core::rules::{POWER_DENSITY_W_PER_SQFT, USABLE_AREA_PERCENTAGE};

use crate::error::Result;

/// Column headers of the report, in order.
pub const REPORT_HEADERS: [&str; 12] = [
    "Property Address",
    "Zip Code",
    "Total Roof Area (sq ft)",
    "Usable Roof Area (sq ft)",
    "Usable Percentage",
    "Solar Capacity (Watts)",
    "Solar Capacity (kW)",
    "Solar Capacity (MW)",
    "Power Density (W/sq ft)",
    "Owner Email",
    "Phone Number",
    "Timestamp",
];

/// Write the CSV report for one property.
pub fn write_report<W: io::Write>(property: &Property, mut out: W) -> Result<()> {
    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(&mut out);
    header.write_record(REPORT_HEADERS)?;
    header.flush()?;
    drop(header);

    let mut row = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(&mut out);
    row.write_record(report_row(property))?;
    row.flush()?;

    tracing::debug!(id = %property.id(), "wrote property report");
    Ok(())
}

/// Suggested file name for a property's report.
///
/// The address is reduced to a single path component: each run of
/// characters other than letters, digits, `-`, `_` and `.` becomes one `_`,
/// and leading dots and underscores are dropped. Separators and `..` never
/// survive.
pub fn report_file_name(property: &Property) -> String {
    let mut stem = String::with_capacity(property.address().len());
    let mut replaced = false;
    for ch in property.address().chars() {
        if ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.') {
            stem.push(ch);
            replaced = false;
        } else if !replaced {
            stem.push('_');
            replaced = true;
        }
    }
    format!("Solar_Report_{}.csv", stem.trim_start_matches(['.', '_']))
}

fn report_row(property: &Property) -> [String; 12] {
    [
        property.address().to_string(),
        property.zip().to_string(),
        property.roof_area().to_string(),
        property.usable_area().to_string(),
        format!("{:.0}%", USABLE_AREA_PERCENTAGE * 100.0),
        property.capacity_watts().to_string(),
        format!("{:.2}", property.capacity_kw()),
        format!("{:.4}", property.capacity_mw()),
        POWER_DENSITY_W_PER_SQFT.to_string(),
        property.email().to_string(),
        property.phone().to_string(),
        property
            .timestamp()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    ]
}
