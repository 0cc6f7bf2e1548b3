//! Peer Communication Module
//!
//! Node-to-node remote calls. Every node exposes four internal operations on
//! its peer port and keeps one long-lived handle per peer (itself included).
//!
//! ## Core Concepts
//! - **Protocol**: JSON DTOs over HTTP, one endpoint per remote call.
//! - **Handles**: `PeerClient` is the seam between the coordination layer and
//!   the transport. `HttpPeer` is the production implementation.
//! - **Pool**: `PeerConnectionPool` is populated once, when bootstrap reaches
//!   `Ready`. There is no reconnection; mid-life failures surface as call errors.

pub mod client;
pub mod handlers;
pub mod pool;
pub mod protocol;
