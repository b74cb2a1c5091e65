use super::pubsub_client::Client;
use crate::broker::message::Frame;
use tokio::sync::mpsc;

#[test]
fn test_client_new() {
    let (tx, _) = mpsc::unbounded_channel::<Frame>();
    let client = Client::new(tx);
    assert!(!client.id.is_empty());
}

#[test]
fn test_client_ids_are_unique() {
    let (tx, _) = mpsc::unbounded_channel::<Frame>();
    let a = Client::new(tx.clone());
    let b = Client::new(tx);
    assert_ne!(a.id, b.id);
}
