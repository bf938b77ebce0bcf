//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types (validated, business-logic-ready)
//! - `wire.rs` — Raw serde structs matching external responses
//! - `state.rs` — State containers with update methods (for poll-driven data)
//! - `client.rs` — Sub-client with the domain's operations

pub mod feed;
pub mod price;
