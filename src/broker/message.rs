/// A frame as it travels between room members.
///
/// The wire distinction between text and binary frames is preserved
/// end-to-end: a text frame relayed through a room arrives at every member
/// as a text frame, and likewise for binary. Queued messages carry no kind;
/// only the fan-out path needs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

impl Frame {
    pub fn text(text: impl Into<String>) -> Self {
        Frame::Text(text.into())
    }

    pub fn binary(payload: impl Into<Vec<u8>>) -> Self {
        Frame::Binary(payload.into())
    }
}
