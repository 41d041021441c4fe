//! A [`MessageSink`] that records every delivery in order.

use sense_core::{MessageSink, ObserverId};

#[derive(Clone, Debug, Default)]
pub struct Mailbox {
    delivered: Vec<(ObserverId, String)>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message delivered to `observer`, oldest first.
    pub fn for_observer(&self, observer: ObserverId) -> impl Iterator<Item = &str> + '_ {
        self.delivered
            .iter()
            .filter(move |(id, _)| *id == observer)
            .map(|(_, text)| text.as_str())
    }

    pub fn all(&self) -> &[(ObserverId, String)] {
        &self.delivered
    }

    /// Take every recorded message, leaving the mailbox empty.
    pub fn drain(&mut self) -> Vec<(ObserverId, String)> {
        std::mem::take(&mut self.delivered)
    }

    pub fn len(&self) -> usize {
        self.delivered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delivered.is_empty()
    }
}

impl MessageSink for Mailbox {
    fn deliver(&mut self, observer: ObserverId, text: &str) {
        self.delivered.push((observer, text.to_owned()));
    }
}
