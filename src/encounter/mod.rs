//! Encounter model: session → levels → chambers → sectors → waves → opponents
//!
//! Raw JSON is normalized once, at `SessionDocument::from_value`.

pub mod aliases;
pub mod coerce;
pub mod model;

pub use model::{
    ChamberEntry, LevelEntry, OpponentEntry, Reward, SectorEntry, SessionDocument, WaveEntry,
};
