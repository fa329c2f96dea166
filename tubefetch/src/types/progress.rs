use tokio::sync::mpsc;

/// Capacity of the progress channel. One download attempt publishes each
/// whole-percent level at most once, so a buffer of the full tick range
/// can never overflow within a single attempt even if the consumer stalls.
pub const PROGRESS_CAPACITY: usize = 100;

/// Byte accounting for one download attempt.
///
/// Every chunk written advances a running total; whenever the total crosses
/// new whole-percent levels of the declared content length, the meter
/// publishes each crossed level individually, in order. A large chunk thus
/// produces a burst of sequential ticks (26, 27, 28, ...) rather than a
/// single jump, and the published sequence is strictly increasing with at
/// most one tick per level, capped at 100.
#[derive(Debug)]
pub(crate) struct ProgressMeter {
    total_written: u64,
    content_length: Option<u64>,
    level: u32,
    tx: mpsc::Sender<u32>
}

impl ProgressMeter {
    pub(crate) fn new(tx: mpsc::Sender<u32>) -> Self {
        Self {
            total_written: 0,
            content_length: None,
            level: 0,
            tx
        }
    }

    /// Declared length of the body being written, used as the percentage
    /// denominator. An absent or zero length disables tick publishing for
    /// this attempt; the transfer itself is unaffected.
    pub(crate) fn set_content_length(&mut self, length: Option<u64>) {
        self.content_length = length.filter(|length| *length > 0);
    }

    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn record(&mut self, written: usize) {
        self.total_written += written as u64;

        let Some(length) = self.content_length else {
            return;
        };
        let current = self.total_written as f64 / length as f64 * 100.0;

        while f64::from(self.level) <= current && self.level < 100 {
            self.level += 1;
            self.publish(self.level);
        }
    }

    fn publish(&self, level: u32) {
        // Never block the transfer on a slow consumer: a tick that does
        // not fit (or has nobody left to read it) is dropped.
        if let Err(err) = self.tx.try_send(level) {
            tracing::trace!(level, "dropping progress tick: {err}");
        }
    }
}
