//! Distributed Key-Value Cache Library
//!
//! A fixed set of N peer nodes cooperate so that a value written through any
//! node can be read, by key, through any other node.
//!
//! ## Modules
//! - **`registry`**: Static table of node ids and their peer addresses.
//! - **`cache`**: Per-node store of `Owned` values and `Indexed` pointers.
//! - **`peer`**: Internal remote-call protocol, peer handles and the connection pool.
//! - **`coordination`**: Redirect-read, broadcast-write and broadcast-delete,
//!   plus the client-facing HTTP API.
//! - **`bootstrap`**: Startup barrier connecting to every node before serving.
//! - **`server`**: Listener binding and task wiring for one node.

pub mod bootstrap;
pub mod cache;
pub mod cli;
pub mod config;
pub mod coordination;
pub mod error;
pub mod peer;
pub mod registry;
pub mod server;
