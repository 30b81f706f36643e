//! Minimal async client for the MPD text protocol.

pub mod client;
pub mod connection;
pub mod types;

pub use client::Client;
pub use connection::{Connection, Response};
pub use types::{PlayState, Song, Status};
