//! HTTP boundary
//!
//! Thin handlers translating routes into broker operations: `POST /{topic}`
//! publishes the request body, `GET /{topic}` consumes the oldest queued
//! message, `GET /stats` reports the delivery counters, and `GET /ws/{topic}`
//! upgrades into the room for that topic. The topic is always the path
//! segment verbatim; queues and rooms share one namespace.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::broker::Broker;
use crate::broker::message::Frame;
use crate::broker::stats::StatsSnapshot;
use crate::config::Settings;
use crate::transport::websocket::websocket_handler;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub broker: Arc<Broker>,
    pub max_message_bytes: usize,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/stats", get(stats))
        .route("/ws/:topic", get(websocket_handler))
        .route("/:topic", get(consume).post(publish))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `addr` and serves the router until ctrl-c.
pub async fn serve(addr: &str, settings: &Settings, broker: Arc<Broker>) -> std::io::Result<()> {
    let state = AppState {
        broker,
        max_message_bytes: settings.broker.max_message_bytes,
    };

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, exiting gracefully");
}

async fn publish(
    State(state): State<AppState>,
    Path(topic): Path<String>,
    request: Request,
) -> StatusCode {
    // A body that cannot be read, or that blows the size cap, is rejected
    // the same way as an empty one.
    let payload = axum::body::to_bytes(request.into_body(), state.max_message_bytes)
        .await
        .unwrap_or_else(|_| Bytes::new());

    match state.broker.publish(&topic, &payload) {
        Ok(()) => {
            // push to any live room members as well; the queue keeps its
            // copy for pull consumers either way
            state.broker.broadcast(&topic, Frame::binary(payload.to_vec()));
            StatusCode::CREATED
        }
        Err(e) => {
            tracing::debug!(%topic, error = %e, "rejected publish");
            StatusCode::BAD_REQUEST
        }
    }
}

async fn consume(State(state): State<AppState>, Path(topic): Path<String>) -> Response {
    match state.broker.consume(&topic) {
        Ok(payload) => (StatusCode::OK, payload).into_response(),
        Err(e) => {
            tracing::debug!(%topic, error = %e, "nothing to consume");
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}

async fn stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.broker.stats())
}
