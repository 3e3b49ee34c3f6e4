//! Bridge layer: wire protocol, synchronous client, and the server side.
//!
//! One request/response exchange per TCP connection on a loopback
//! endpoint; see [`protocol`] for the wire format.

pub mod client;
pub mod protocol;
pub mod registry;
pub mod server;
