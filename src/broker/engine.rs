//! Broker engine
//!
//! The in-memory broker owning every topic's queue and room, keyed by topic
//! name. One namespace serves both halves: the topic a producer publishes to
//! is the topic a WebSocket room fans out for.
//!
//! Concurrency notes:
//! - The registry map sits behind its own mutex, held only long enough to
//!   fetch or insert a topic's handle. Each topic's state has its own lock,
//!   so all mutations of one topic are serialized while operations on
//!   different topics proceed independently.
//! - No lock is ever held across socket I/O. Fan-out goes through each
//!   member's unbounded channel; the per-connection send loop is the only
//!   place that awaits a write.
//! - A topic entry whose queue and room are both empty is dropped from the
//!   registry. The state is tombstoned under its lock first, and any caller
//!   holding a stale handle re-fetches, so eviction can never lose a
//!   message or a member.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::broker::error::{ConsumeError, JoinError, PublishError};
use crate::broker::message::Frame;
use crate::broker::stats::{Stats, StatsSnapshot};
use crate::broker::topic::{ClientId, TopicState};
use crate::client::Client;
use crate::config::BrokerSettings;

#[derive(Debug)]
pub struct Broker {
    topics: Mutex<HashMap<String, Arc<Mutex<TopicState>>>>,
    stats: Stats,
    connections: AtomicUsize,
    max_connections: usize,
}

impl Default for Broker {
    fn default() -> Self {
        Self::new()
    }
}

impl Broker {
    pub fn new() -> Self {
        Self::with_settings(&BrokerSettings::default())
    }

    pub fn with_settings(settings: &BrokerSettings) -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
            stats: Stats::default(),
            connections: AtomicUsize::new(0),
            max_connections: settings.max_connections,
        }
    }

    /// Appends `payload` to the topic's queue, creating the entry on first
    /// publish.
    ///
    /// Publishing never broadcasts by itself; pushing to a live room is a
    /// separate concern the boundary layer composes with this call.
    pub fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), PublishError> {
        if payload.is_empty() {
            self.stats.record_publish_failure();
            return Err(PublishError::EmptyPayload);
        }

        self.with_topic(topic, true, |state| state.enqueue(payload.to_vec()));
        self.stats.record_publish(payload.len());
        Ok(())
    }

    /// Removes and returns the oldest queued message for `topic`.
    ///
    /// Fails immediately when nothing is queued; there is no waiting for a
    /// future publish. An unknown topic is never created by consuming.
    pub fn consume(&self, topic: &str) -> Result<Vec<u8>, ConsumeError> {
        let popped = self
            .with_topic(topic, false, |state| state.dequeue())
            .flatten();

        match popped {
            Some(payload) => {
                self.stats.record_consume(payload.len());
                self.evict_if_idle(topic);
                Ok(payload)
            }
            None => {
                self.stats.record_consume_failure();
                Err(ConsumeError::TopicEmpty)
            }
        }
    }

    /// Registers `client` as a member of the topic's room, creating the
    /// entry on first join.
    ///
    /// `greeting` is delivered to the new member under the topic lock, so
    /// it precedes any frame broadcast to the room after the join.
    pub fn join(&self, topic: &str, client: Client, greeting: Frame) -> Result<(), JoinError> {
        if self.connections.fetch_add(1, Ordering::SeqCst) >= self.max_connections {
            self.connections.fetch_sub(1, Ordering::SeqCst);
            return Err(JoinError::TooManyConnections {
                limit: self.max_connections,
            });
        }

        self.with_topic(topic, true, |state| {
            state.join(client.clone(), greeting.clone())
        });
        Ok(())
    }

    /// Removes a member from the topic's room. A no-op if the member (or
    /// the topic) is unknown.
    pub fn leave(&self, topic: &str, client_id: &ClientId) {
        let removed = self
            .with_topic(topic, false, |state| state.leave(client_id))
            .unwrap_or(false);

        if removed {
            self.connections.fetch_sub(1, Ordering::SeqCst);
            self.evict_if_idle(topic);
        }
    }

    /// Delivers `frame` to every current member of the topic's room and
    /// returns how many received it.
    ///
    /// A failed delivery drops that member and continues with the rest; a
    /// topic without a room delivers to nobody and is not created.
    pub fn broadcast(&self, topic: &str, frame: Frame) -> usize {
        let Some(outcome) = self.with_topic(topic, false, |state| state.broadcast(&frame)) else {
            return 0;
        };

        if !outcome.dropped.is_empty() {
            self.connections
                .fetch_sub(outcome.dropped.len(), Ordering::SeqCst);
            for id in &outcome.dropped {
                tracing::debug!(topic, client_id = %id, "dropped member with closed channel");
            }
            self.evict_if_idle(topic);
        }

        outcome.delivered
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn topic_count(&self) -> usize {
        self.topics.lock().unwrap().len()
    }

    pub fn queue_len(&self, topic: &str) -> usize {
        self.with_topic(topic, false, |state| state.queue_len())
            .unwrap_or(0)
    }

    pub fn room_size(&self, topic: &str) -> usize {
        self.with_topic(topic, false, |state| state.member_count())
            .unwrap_or(0)
    }

    fn topic_handle(&self, topic: &str, create: bool) -> Option<Arc<Mutex<TopicState>>> {
        let mut topics = self.topics.lock().unwrap();
        match topics.get(topic) {
            Some(handle) => Some(handle.clone()),
            None if create => {
                let handle = Arc::new(Mutex::new(TopicState::default()));
                topics.insert(topic.to_string(), handle.clone());
                Some(handle)
            }
            None => None,
        }
    }

    /// Runs `op` with the topic's state locked.
    ///
    /// When the fetched handle turns out to be a tombstone (the entry was
    /// evicted between the registry lookup and the state lock), the lookup
    /// restarts; `op` runs exactly once, against a live state.
    fn with_topic<T>(
        &self,
        topic: &str,
        create: bool,
        mut op: impl FnMut(&mut TopicState) -> T,
    ) -> Option<T> {
        loop {
            let handle = self.topic_handle(topic, create)?;
            let mut state = handle.lock().unwrap();
            if state.is_evicted() {
                continue;
            }
            return Some(op(&mut state));
        }
    }

    /// Drops the registry entry for a topic whose queue and room are both
    /// empty.
    fn evict_if_idle(&self, topic: &str) {
        let mut topics = self.topics.lock().unwrap();
        if let Some(handle) = topics.get(topic) {
            let mut state = handle.lock().unwrap();
            if state.is_idle() {
                state.mark_evicted();
                drop(state);
                topics.remove(topic);
            }
        }
    }
}
