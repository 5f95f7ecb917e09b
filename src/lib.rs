//! proglog - a durable, length-prefixed, append-only record log
//!
//! The core is [`store::Store`]: one file of `[u64 big-endian length][payload]`
//! frames addressed by byte offset. Around it sit record logs that the HTTP
//! front end serves, and a CLI.

pub mod cli;
pub mod http_server;
pub mod log;
pub mod observability;
pub mod store;
