//! WebSocket client module
//!
//! Owns the single outbound connection, sends the greeting once the handshake
//! completes and forwards every text reply to the log sink.

mod config;
#[allow(dead_code)]
mod session;
mod sink;

#[cfg(test)]
mod testing;

pub use config::*;
#[allow(unused_imports)]
pub use session::*;
#[allow(unused_imports)]
pub use sink::*;
