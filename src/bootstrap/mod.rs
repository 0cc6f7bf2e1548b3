//! Bootstrap Module
//!
//! Startup barrier of a node. After the local listeners are bound, the node
//! connects to every node of the registry (itself included) in increasing id
//! order, retrying the same id forever with a fixed delay until it answers.
//!
//! ```text
//! Unconnected -> Connecting(0) -> ... -> Connecting(N-1) -> Ready
//! ```
//!
//! `Ready` is entered once and never left. Coordination calls that need peers
//! wait for it; nothing about the retry policy is bounded.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;
