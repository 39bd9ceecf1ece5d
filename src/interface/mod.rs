//! Interface layer: CLI wiring.

pub mod cli;
