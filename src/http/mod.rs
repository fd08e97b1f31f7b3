//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 surface of the server: one request
//! per connection, response written in full, connection closed.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`parser`**: Parses the incoming request line from byte buffers
//! - **`request`**: Parsed request-line representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the request line
//!        └──────┬──────┘
//!               │ Request line received (or malformed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Resolve path, generate response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               └─ Close → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use alcove::config::Config;
//! use alcove::files::resolver::PathResolver;
//! use alcove::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cfg = Config::load()?;
//!     let resolver = Arc::new(PathResolver::new(&cfg)?);
//!     let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let resolver = Arc::clone(&resolver);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, resolver);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
