//! Stat derivation and aggregation

pub mod aggregate;
pub mod formula;

pub use aggregate::{summarize, total_hp, ChamberTotals};
pub use formula::{derive, DerivedStats};
