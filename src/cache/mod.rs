//! Local Cache Module
//!
//! Per-node key-value storage. This is the only mutable state in the system.
//!
//! ## Core Concepts
//! - **Owned entries**: the node holds the authoritative value for the key.
//! - **Indexed entries**: the node only remembers which peer owns the key.
//! - **Exclusion**: every operation is atomic with respect to the key it touches.
//!   The backing `DashMap` locks the shard holding the key, so a client handler
//!   and a peer handler touching the same key are serialized.

pub mod store;
pub mod types;
