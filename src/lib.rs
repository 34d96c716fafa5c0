//! # Pharmacy Counting
//!
//! Totals prescription costs and counts unique prescribers per drug from a
//! line-oriented, comma-separated record stream, then emits a report sorted
//! by total cost.
//!
//! ## Design Principles
//!
//! - **Exact sums**: costs accumulate as decimals and are rounded once, half to even
//! - **Bounded memory**: prescriber names are stored once and replaced by integer IDs
//! - **Skip and continue**: corrupt lines are logged, counted and skipped
//! - **Deterministic output**: rows sorted by total cost, then drug name
//!
//! ## Example
//!
//! ```no_run
//! use pharmacy_counting::{render_report, sort_rows, Aggregator};
//! use std::io::Cursor;
//!
//! let input = "id,last_name,first_name,drug_name,cost\n1,Smith,James,AMBIEN,100\n";
//! let mut aggregator = Aggregator::new();
//! aggregator.process_input(Cursor::new(input)).unwrap();
//! let rows = sort_rows(aggregator.finalize());
//! print!("{}", render_report(&rows).unwrap());
//! ```

pub mod aggregator;
pub mod cost;
pub mod error;
pub mod record;
pub mod report;

pub use aggregator::{Aggregator, DrugAggregate, DrugSummary, PrescriberId, RunSummary};
pub use cost::Cost;
pub use error::{ParseError, PharmacyError, Result};
pub use record::{parse_line, split_fields, ParsedRecord};
pub use report::{render_report, sort_rows, write_report, ReportRow};
