//! The log processor: the single worker that drains the queue
//!
//! The worker alternates between waiting on the queue and draining a batch.
//! Each message is rendered once (timestamp and text) and then handed to the
//! appenders in order: module file, severity aggregate, console. A failure in
//! one appender is counted and skipped; the others still receive the message.

use super::{
    appender::Appender,
    message::{Message, RenderedMessage},
    metrics::LoggerMetrics,
    queue::QueueConsumer,
    timestamp::TimestampFormat,
};
use std::sync::Arc;

pub struct LogProcessor {
    appenders: Vec<Box<dyn Appender>>,
    timestamp_format: TimestampFormat,
    metrics: Arc<LoggerMetrics>,
}

impl LogProcessor {
    pub fn new(timestamp_format: TimestampFormat, metrics: Arc<LoggerMetrics>) -> Self {
        Self {
            appenders: Vec::new(),
            timestamp_format,
            metrics,
        }
    }

    #[must_use]
    pub fn with_appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Run until the queue is closed and empty, then flush every appender
    pub fn run(mut self, consumer: QueueConsumer) {
        while let Some(batch) = consumer.drain() {
            for message in batch {
                self.process(message);
            }
        }
        self.flush_all();
    }

    /// Deliver one message to every appender
    ///
    /// **Per-Appender Panic Isolation**: each appender call is wrapped in
    /// `catch_unwind` so one broken sink cannot take the worker down.
    pub fn process(&mut self, message: Message) {
        let record = RenderedMessage::new(&message, &self.timestamp_format);

        for appender in self.appenders.iter_mut() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(&record)
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(_)) => {
                    // best effort; reporting it through the logger would recurse
                    self.metrics.record_sink_failure();
                }
                Err(panic_info) => {
                    self.metrics.record_sink_failure();
                    eprintln!(
                        "[LOGGER CRITICAL] Appender '{}' panicked: {}. \
                         Other appenders continue to function.",
                        appender.name(),
                        panic_message(&*panic_info)
                    );
                }
            }
        }

        self.metrics.record_written();
    }

    fn flush_all(&mut self) {
        for appender in self.appenders.iter_mut() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| appender.flush()));
            if !matches!(result, Ok(Ok(()))) {
                self.metrics.record_sink_failure();
            }
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, LoggerError, Result};
    use parking_lot::Mutex;

    struct Recording {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl Appender for Recording {
        fn append(&mut self, record: &RenderedMessage<'_>) -> Result<()> {
            self.lines
                .lock()
                .push(format!("{} {}", record.level(), record.text));
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    struct Failing;

    impl Appender for Failing {
        fn append(&mut self, _record: &RenderedMessage<'_>) -> Result<()> {
            Err(LoggerError::other("disk full"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Panicking;

    impl Appender for Panicking {
        fn append(&mut self, _record: &RenderedMessage<'_>) -> Result<()> {
            panic!("sink exploded");
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_failing_sink_does_not_block_others() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let metrics = Arc::new(LoggerMetrics::new());
        let mut processor = LogProcessor::new(TimestampFormat::default(), Arc::clone(&metrics))
            .with_appender(Failing)
            .with_appender(Panicking)
            .with_appender(Recording {
                lines: Arc::clone(&lines),
            });

        processor.process(Message::new("core", LogLevel::Error, "still delivered"));

        assert_eq!(lines.lock().as_slice(), ["ERROR still delivered"]);
        assert_eq!(metrics.sink_failures(), 2);
        assert_eq!(metrics.written(), 1);
    }

    #[test]
    fn test_run_drains_until_closed() {
        let (producer, consumer) = crate::core::queue::message_queue();
        let lines = Arc::new(Mutex::new(Vec::new()));
        let processor = LogProcessor::new(TimestampFormat::default(), Arc::new(LoggerMetrics::new()))
            .with_appender(Recording {
                lines: Arc::clone(&lines),
            });

        for i in 0..3 {
            producer
                .enqueue(Message::new("core", LogLevel::Info, format!("m{}", i)))
                .unwrap();
        }
        producer.close();
        processor.run(consumer);

        assert_eq!(lines.lock().as_slice(), ["INFO m0", "INFO m1", "INFO m2"]);
    }
}
