//! Sorted report output.

use crate::aggregator::DrugSummary;
use crate::error::Result;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::Write;

/// Report header line fields.
pub const HEADER: [&str; 3] = ["drug_name", "num_prescriber", "total_cost"];

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub drug_name: String,
    pub num_prescriber: usize,
    pub total_cost: i64,
}

/// Orders rows by total cost, highest first.
///
/// Equal totals are ordered by drug name, reverse byte order, so
/// `CHLORPROMAZINE` comes before `BENZTROPINE MESYLATE`.
pub fn compare_rows(a: &ReportRow, b: &ReportRow) -> Ordering {
    b.total_cost
        .cmp(&a.total_cost)
        .then_with(|| b.drug_name.cmp(&a.drug_name))
}

/// Turns finalized aggregates into sorted report rows.
pub fn sort_rows(summaries: HashMap<String, DrugSummary>) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = summaries
        .into_iter()
        .map(|(drug_name, summary)| ReportRow {
            drug_name,
            num_prescriber: summary.num_prescriber,
            total_cost: summary.total_cost,
        })
        .collect();
    rows.sort_by(compare_rows);
    rows
}

/// Writes the header and rows.
///
/// Fields are never quoted, even when a drug name contains a comma.
pub fn write_report<W: Write>(rows: &[ReportRow], writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Renders the report to a string.
pub fn render_report(rows: &[ReportRow]) -> Result<String> {
    let mut output = Vec::new();
    write_report(rows, &mut output)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}
