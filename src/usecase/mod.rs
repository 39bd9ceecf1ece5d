//! Usecase layer: application workflows + events.

pub mod event;
pub mod load;
pub mod scc;
pub mod stats;
pub mod validate;
