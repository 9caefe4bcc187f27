//! Reporting utilities: data table paging and formatted terminal output.
//!
//! Formatting lives here so the aggregation code stays free of presentation
//! concerns (rounding, date formats, column layout).

pub mod format;
pub mod table;

pub use format::*;
pub use table::*;
