//! Strongly connected components of directed graphs, computed with
//! Kosaraju's two-pass depth-first search.
//!
//! The crate is split into layers:
//! - domain: graph representation, errors and ports
//! - infrastructure: the Kosaraju detector, JSON adapters, event printing
//! - usecase: loading, SCC workflow, verification + progress events
//! - interface: CLI wiring

pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod usecase;
