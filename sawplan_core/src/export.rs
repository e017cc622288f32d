//! CSV and JSON export of finished plans.
//!
//! Writers are generic over `io::Write`; the caller decides where output goes.

use crate::{CutPlan, MillPlan, Result};
use std::io::Write;

const CSV_HEADER: [&str; 5] = ["label", "x", "y", "width", "height"];

/// Write the cut list as CSV with a `label,x,y,width,height` header
///
/// The header is written even when the plan is empty.
pub fn write_csv<W: Write>(plan: &CutPlan, writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(CSV_HEADER)?;

    for placement in plan {
        writer.serialize(placement)?;
    }

    writer.flush()?;
    Ok(())
}

/// Serialize the whole plan, including cant and yield, as pretty JSON
pub fn to_json(plan: &MillPlan) -> Result<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}
