//! `cachelab-server` - TCP server answering fetch requests against a
//! configurable cache replacement policy.
//!
//! The protocol decode/dispatch logic lives in [`protocol`], kept free of
//! socket I/O so it is directly testable; `main` wires it to a
//! [`tokio::net::TcpListener`] accept loop.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod protocol;

pub use protocol::dispatch;
