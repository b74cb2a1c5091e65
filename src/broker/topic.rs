use std::collections::{HashMap, VecDeque};

use crate::broker::message::Frame;
use crate::client::Client;

pub type ClientId = String;

/// Per-topic state: the pull queue and the fan-out room.
///
/// Both halves live under one lock so queue mutation and room iteration for
/// the same topic are serialized against each other, while different topics
/// never contend. Entries leave the queue only through [`dequeue`], so an
/// empty queue is indistinguishable from one that never held a message.
///
/// [`dequeue`]: TopicState::dequeue
#[derive(Debug, Default)]
pub struct TopicState {
    queue: VecDeque<Vec<u8>>,
    members: HashMap<ClientId, Client>,
    /// Set when the registry drops this entry. A holder of a stale handle
    /// must re-fetch from the registry instead of mutating a dead state.
    evicted: bool,
}

impl TopicState {
    pub fn enqueue(&mut self, payload: Vec<u8>) {
        self.queue.push_back(payload);
    }

    /// Removes and returns the oldest queued message.
    pub fn dequeue(&mut self) -> Option<Vec<u8>> {
        self.queue.pop_front()
    }

    /// Adds a member, handing it `greeting` in the same critical section so
    /// the greeting is the first frame on the member's channel.
    pub fn join(&mut self, client: Client, greeting: Frame) {
        let _ = client.sender.send(greeting);
        self.members.insert(client.id.clone(), client);
    }

    /// Removes a member. Returns whether it was present.
    pub fn leave(&mut self, id: &ClientId) -> bool {
        self.members.remove(id).is_some()
    }

    /// Sends `frame` to every member.
    ///
    /// A member whose channel has closed is dropped from the room; delivery
    /// to the remaining members continues regardless.
    pub fn broadcast(&mut self, frame: &Frame) -> BroadcastOutcome {
        let mut outcome = BroadcastOutcome::default();

        for (id, client) in &self.members {
            if client.sender.send(frame.clone()).is_ok() {
                outcome.delivered += 1;
            } else {
                outcome.dropped.push(id.clone());
            }
        }

        for id in &outcome.dropped {
            self.members.remove(id);
        }

        outcome
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.members.is_empty()
    }

    pub(crate) fn mark_evicted(&mut self) {
        self.evicted = true;
    }

    pub(crate) fn is_evicted(&self) -> bool {
        self.evicted
    }
}

/// What a broadcast did: how many members received the frame, and which
/// members were dropped because their channel had already closed.
#[derive(Debug, Default)]
pub struct BroadcastOutcome {
    pub delivered: usize,
    pub dropped: Vec<ClientId>,
}
