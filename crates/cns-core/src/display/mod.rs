//! Table rendering for CNS data
//!
//! Formatters return the rendered text instead of printing it, so commands
//! decide where output goes and tests can inspect it.

pub mod field;
pub mod flat;
pub mod profile;
pub mod table;
pub mod tree;

pub use field::{Field, metadata};
pub use flat::{ConnectionRow, connection_rows, render_connections};
pub use profile::render_profile;
pub use tree::{TreeFormatter, render_list};
