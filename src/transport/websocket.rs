//! WebSocket transport
//!
//! Upgrades `GET /ws/{topic}` and relays frames for the lifetime of the
//! socket. Outbound, the room's frames are drained from the client's channel
//! onto the wire; inbound, every frame the socket sends is broadcast back
//! into the room, sender included. Either half failing tears this one
//! connection down without touching the rest of the room.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::broker::Broker;
use crate::broker::message::Frame;
use crate::client::Client;
use crate::transport::http::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Path(topic): Path<String>,
    State(state): State<AppState>,
) -> Response {
    let broker = Arc::clone(&state.broker);
    ws.on_upgrade(move |socket| handle_socket(socket, broker, topic))
}

async fn handle_socket(socket: WebSocket, broker: Arc<Broker>, topic: String) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    // Channel for this client; the broker only ever sees the sending half
    let (tx, mut rx) = mpsc::unbounded_channel::<Frame>();
    let client = Client::new(tx);
    let client_id = client.id.clone();

    // The greeting rides through join, which delivers it under the topic
    // lock, ahead of any relayed traffic
    if let Err(e) = broker.join(&topic, client, Frame::text("Hi Client!")) {
        tracing::warn!(%client_id, %topic, error = %e, "refusing connection");
        let _ = ws_sender.send(WsMessage::Close(None)).await;
        return;
    }
    tracing::info!(%client_id, %topic, "client connected");

    let cleanup_called = Arc::new(AtomicBool::new(false));

    let do_cleanup = {
        let broker = broker.clone();
        let topic = topic.clone();
        let client_id = client_id.clone();
        let cleanup_called = cleanup_called.clone();

        move || {
            if !cleanup_called.swap(true, Ordering::SeqCst) {
                broker.leave(&topic, &client_id);
            }
        }
    };

    // Forward frames from the room to this socket
    {
        let client_id = client_id.clone();
        let do_cleanup = do_cleanup.clone();

        tokio::spawn(async move {
            while let Some(frame) = rx.recv().await {
                if let Err(e) = ws_sender.send(to_ws_message(frame)).await {
                    tracing::debug!(%client_id, error = %e, "write failed, dropping connection");
                    break;
                }
            }

            do_cleanup();
            tracing::debug!(%client_id, "send loop closed");
        });
    }

    // Relay inbound frames into the room; a read error is a departure, not
    // a process error
    while let Some(Ok(msg)) = ws_receiver.next().await {
        match msg {
            WsMessage::Text(text) => {
                broker.broadcast(&topic, Frame::Text(text));
            }
            WsMessage::Binary(payload) => {
                broker.broadcast(&topic, Frame::Binary(payload));
            }
            WsMessage::Close(_) => break,
            WsMessage::Ping(_) | WsMessage::Pong(_) => {}
        }
    }

    tracing::info!(%client_id, %topic, "client disconnected");
    do_cleanup();
}

fn to_ws_message(frame: Frame) -> WsMessage {
    match frame {
        Frame::Text(text) => WsMessage::Text(text),
        Frame::Binary(payload) => WsMessage::Binary(payload),
    }
}
