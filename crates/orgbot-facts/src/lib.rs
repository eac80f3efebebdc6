//! orgbot-facts
//!
//! The structured fact table (contact data, addresses, HR channels) and the
//! topic resolver answering from it.
pub mod resolver;
pub mod table;

pub use resolver::{Resolution, StructuredResolver, Topic};
pub use table::FactTable;
