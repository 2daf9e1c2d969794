//! Output formatting: present count results as tables.
//!
//! - **ReportTable**: table-ready structure with headers, rows, and footer
//! - **TableRow**: individual row with label and formatted values
//!
//! ## Example
//!
//! ```rust,ignore
//! use stepcountlib::output::ReportTable;
//!
//! let table = ReportTable::from_count_result(&result);
//! // table.headers: ["No", "Path", "File", "Ext", "Lines", "Steps", "Status"]
//! // table.footer: TableRow { label: "Total (5 files)", ... }
//! ```

pub mod table;

pub use table::{ReportTable, TableRow, ABSENT};
