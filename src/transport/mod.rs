//! The `transport` module is the network boundary of the broker: an HTTP
//! API for the queue half and a WebSocket endpoint for the room half, both
//! served from one router.

pub mod http;
pub mod websocket;
