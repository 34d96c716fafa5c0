//! Per-drug aggregation.
//!
//! Streams records into running per-drug totals. Prescriber names are replaced
//! by small surrogate IDs on arrival, so per-drug sets hold integers and each
//! distinct name is stored once for the whole run.

use crate::cost::Cost;
use crate::error::{ParseError, Result};
use crate::record::{parse_line, ParsedRecord};
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::io::BufRead;

/// Surrogate for a prescriber name, assigned in first-seen order from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrescriberId(usize);

impl PrescriberId {
    pub fn value(&self) -> usize {
        self.0
    }
}

/// Running state for one drug.
#[derive(Debug, Clone, Default)]
pub struct DrugAggregate {
    /// Unrounded sum of every cost seen for the drug.
    pub total_cost: Cost,

    /// Distinct prescribers of the drug.
    pub prescriber_ids: HashSet<PrescriberId>,
}

/// Final figures for one drug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrugSummary {
    pub num_prescriber: usize,
    pub total_cost: i64,
}

/// Counters describing a finished (or in-progress) run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Data lines read, header excluded.
    pub lines_read: usize,
    pub records_aggregated: usize,
    pub corrupt_records: usize,
    pub unique_prescribers: usize,
    pub unique_drugs: usize,
}

/// Folds prescription records into per-drug totals.
///
/// All state belongs to one run; build a new `Aggregator` for every input.
#[derive(Debug, Default)]
pub struct Aggregator {
    /// Per-drug running totals keyed by drug name.
    drugs: HashMap<String, DrugAggregate>,

    /// Prescriber name to surrogate ID.
    name_table: HashMap<String, PrescriberId>,

    next_id: usize,

    lines_read: usize,
    records_aggregated: usize,
    corrupt_records: usize,
}

impl Aggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the ID for `prescriber_name`, assigning the next free one on first sight.
    pub fn encode(&mut self, prescriber_name: &str) -> PrescriberId {
        if let Some(&id) = self.name_table.get(prescriber_name) {
            return id;
        }

        let id = PrescriberId(self.next_id);
        self.next_id += 1;
        self.name_table.insert(prescriber_name.to_string(), id);
        id
    }

    /// Folds one parse outcome into the running state.
    ///
    /// A failure only bumps the corrupt-record counter.
    pub fn ingest(&mut self, parsed: std::result::Result<ParsedRecord, ParseError>) {
        let record = match parsed {
            Ok(record) => record,
            Err(_) => {
                self.corrupt_records += 1;
                return;
            }
        };

        let id = self.encode(&record.prescriber_name);
        let aggregate = self.drugs.entry(record.drug_name).or_default();
        aggregate.total_cost = match aggregate.total_cost.checked_add(record.cost) {
            Some(total) => total,
            None => {
                warn!(
                    "Total cost overflowed adding {}, clamping at the decimal limit",
                    record.cost
                );
                aggregate.total_cost.saturating_add(record.cost)
            }
        };
        aggregate.prescriber_ids.insert(id);
        self.records_aggregated += 1;
    }

    /// Reads every line of `reader` after the header and ingests it.
    ///
    /// Corrupt lines are logged at warn level with their line number and skipped.
    /// Only I/O failures end the read early.
    pub fn process_input<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let mut buf = Vec::new();

        // Header is discarded unread.
        if reader.read_until(b'\n', &mut buf)? == 0 {
            debug!("Input is empty, no header found");
            return Ok(());
        }

        let mut line_num = 1;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_num += 1;
            self.lines_read += 1;

            let line = String::from_utf8_lossy(strip_terminator(&buf));
            let parsed = parse_line(&line);
            if let Err(e) = &parsed {
                warn!("Line {}: skipping corrupt record, {}", line_num, e);
            }
            self.ingest(parsed);
        }

        info!(
            "Read {} lines, {} corrupt records",
            self.lines_read, self.corrupt_records
        );
        Ok(())
    }

    /// Rounds every drug total once and counts its prescribers.
    pub fn finalize(&self) -> HashMap<String, DrugSummary> {
        self.drugs
            .iter()
            .map(|(drug_name, aggregate)| {
                let total_cost = aggregate.total_cost.round_half_even();
                if total_cost == i64::MAX || total_cost == i64::MIN {
                    warn!("Total cost of {} saturated at {}", drug_name, total_cost);
                }
                (
                    drug_name.clone(),
                    DrugSummary {
                        num_prescriber: aggregate.prescriber_ids.len(),
                        total_cost,
                    },
                )
            })
            .collect()
    }

    /// Number of lines skipped as corrupt so far.
    pub fn corrupt_records(&self) -> usize {
        self.corrupt_records
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            lines_read: self.lines_read,
            records_aggregated: self.records_aggregated,
            corrupt_records: self.corrupt_records,
            unique_prescribers: self.name_table.len(),
            unique_drugs: self.drugs.len(),
        }
    }

    /// Returns the running state for a drug (for testing).
    #[cfg(test)]
    pub fn get_drug(&self, drug_name: &str) -> Option<&DrugAggregate> {
        self.drugs.get(drug_name)
    }
}

fn strip_terminator(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
