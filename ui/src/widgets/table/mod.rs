//! Table building blocks shared by the device and loaner tables.
//!
//! - `columns`: Column definitions and widths
//! - `header`: Sortable header row
//! - `cells`: Cell rendering functions for each cell type

pub mod cells;
pub mod columns;
pub mod header;
