//! # PushPop
//!
//! `pushpop` is a minimalist, in-memory message broker built with Rust.
//! Producers push byte payloads onto named topic queues over HTTP, consumers
//! pop them in FIFO order, and a WebSocket channel fans messages out to
//! every connection joined to a topic.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct
//! responsibility:
//!
//! - `broker`: the central component owning topic queues, rooms, and the
//!   delivery counters.
//! - `client`: represents a connected WebSocket client.
//! - `config`: handles loading and managing server configuration.
//! - `transport`: the HTTP/WebSocket boundary translating routes into broker
//!   operations.
//! - `utils`: shared utilities, such as logging setup.

pub mod broker;
pub mod client;
pub mod config;
pub mod transport;
pub mod utils;
