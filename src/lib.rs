//! Chamber Codex - Trial chamber encounter browser

pub mod core;
pub mod encounter;
pub mod index;
pub mod session;
pub mod source;
pub mod stats;
pub mod view;
