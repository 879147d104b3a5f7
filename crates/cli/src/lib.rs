//! Terminal output for polish
//!
//! Status lines, per-sniff announcements and run summaries.

#![warn(missing_docs)]

pub mod output;
