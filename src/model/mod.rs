//! Data model for parsed tables

mod table;

pub use table::{Cell, Row, Table};
