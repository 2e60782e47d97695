pub mod controller;

pub use controller::{FetchOutcome, FetchTicket, SessionController};
