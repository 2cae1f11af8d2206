//! Pure data types: ledger entries, year-month keys, and settings.
//! No I/O, no CLI, no storage.

pub mod entry;
pub mod settings;

pub use entry::*;
pub use settings::*;
