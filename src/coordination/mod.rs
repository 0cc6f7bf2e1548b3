//! Coordination Module
//!
//! The cross-node protocol behind the three client operations.
//!
//! ## Protocol
//! - **Get**: read the local entry. An `Owned` entry answers directly; an
//!   `Indexed` entry is redirected once to the owner. Pointers are never chased
//!   further than one hop.
//! - **Put**: the receiving node becomes the owner. A sequential sweep over all
//!   node ids stores the value locally and an index pointing at this node on
//!   every other node.
//! - **Delete**: a sequential sweep removes the key from every node.
//!
//! Sweeps abort on the first failing node and never roll back the nodes they
//! already changed. After an aborted sweep the cluster-wide state of the key is
//! undefined until a later Put or Delete succeeds.
//!
//! ## Consistency
//! Concurrent Put/Delete on the same key from different nodes are not ordered.
//! Each node keeps whatever write reached its local store last, so nodes may
//! disagree about a key after a race. This is per-node overwrite semantics, not
//! linearizability.

pub mod handlers;
pub mod protocol;
pub mod service;
