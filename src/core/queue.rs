//! Message queue between producer threads and the processor
//!
//! An unbounded crossbeam channel. Producers never block; the consumer
//! blocks only while the queue is empty and the producer side is still open.
//! Closing the producer side is the shutdown signal: the consumer keeps
//! receiving whatever was buffered before the close and then stops.

use super::error::{LoggerError, Result};
use super::message::Message;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;

/// Create a connected producer/consumer pair
pub fn message_queue() -> (QueueProducer, QueueConsumer) {
    let (sender, receiver) = unbounded();
    (
        QueueProducer {
            sender: RwLock::new(Some(sender)),
        },
        QueueConsumer { receiver },
    )
}

/// Producer side, shared by every thread that logs
pub struct QueueProducer {
    sender: RwLock<Option<Sender<Message>>>,
}

impl QueueProducer {
    /// Append a message and wake the consumer. Fails only after `close`.
    pub fn enqueue(&self, message: Message) -> Result<()> {
        match self.sender.read().as_ref() {
            Some(sender) => sender.send(message).map_err(|_| LoggerError::LoggerStopped),
            None => Err(LoggerError::LoggerStopped),
        }
    }

    /// Signal shutdown. Messages already queued are still delivered.
    ///
    /// Returns `false` if the queue was already closed.
    pub fn close(&self) -> bool {
        self.sender.write().take().is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.read().is_none()
    }

    /// Number of buffered messages
    pub fn len(&self) -> usize {
        self.sender.read().as_ref().map_or(0, Sender::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Consumer side, owned by the processor thread
pub struct QueueConsumer {
    receiver: Receiver<Message>,
}

impl QueueConsumer {
    /// Take every buffered message, blocking while the queue is empty.
    ///
    /// Returns `None` once the producer side is closed and the queue is
    /// drained.
    pub fn drain(&self) -> Option<Vec<Message>> {
        let first = self.receiver.recv().ok()?;
        let mut batch = Vec::with_capacity(1 + self.receiver.len());
        batch.push(first);
        batch.extend(self.receiver.try_iter());
        Some(batch)
    }
}
