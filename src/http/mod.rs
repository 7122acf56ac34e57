//! HTTP server module.
//!
//! Serves the API over plain HTTP; TLS termination is left to a reverse proxy.
//! The server drains in-flight requests on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
