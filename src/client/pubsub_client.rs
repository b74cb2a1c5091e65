use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::broker::message::Frame;
use crate::broker::topic::ClientId;

/// Handle for one live connection: the identity a room tracks it by and the
/// channel its frames are pushed through.
///
/// The network half lives in the transport layer. Dropping the receiving end
/// of `sender` is what marks a client dead; the next broadcast that touches
/// it removes it from its room.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: ClientId,
    pub sender: UnboundedSender<Frame>,
}

impl Client {
    pub fn new(sender: UnboundedSender<Frame>) -> Self {
        Self {
            id: format!("client-{}", Uuid::new_v4()),
            sender,
        }
    }
}
