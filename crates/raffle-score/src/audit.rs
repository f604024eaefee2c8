//! Audit sinks.
//!
//! The ledger publishes every state change to an [`AuditSink`] synchronously,
//! inside the same mutation, so sink order is mutation order.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use raffle_score_core::LedgerEvent;

/// Append-only destination for audit notifications.
///
/// `publish` is infallible: it runs after the mutation has been committed,
/// so there is nothing to roll back. A sink that can fail must not lose
/// records silently; it has to surface the gap some other way, as
/// [`JsonLinesAuditSink::failed_writes`] does.
pub trait AuditSink: Send + Sync {
    /// Record one notification.
    fn publish(&self, event: &LedgerEvent);
}

impl<T: AuditSink + ?Sized> AuditSink for Arc<T> {
    fn publish(&self, event: &LedgerEvent) {
        (**self).publish(event)
    }
}

impl<T: AuditSink + ?Sized> AuditSink for Box<T> {
    fn publish(&self, event: &LedgerEvent) {
        (**self).publish(event)
    }
}

/// Keeps every notification in memory, in publish order.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    events: RwLock<Vec<LedgerEvent>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events so far.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return all events so far.
    pub fn take(&self) -> Vec<LedgerEvent> {
        std::mem::take(&mut *self.events.write().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditLog {
    fn publish(&self, event: &LedgerEvent) {
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Emits each notification as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn publish(&self, event: &LedgerEvent) {
        match event {
            LedgerEvent::ScoreStored {
                client_id,
                date_with_sequence,
                score,
            } => tracing::info!(
                target: "raffle_score::audit",
                event = event.name(),
                client_id = %client_id,
                date_with_sequence = %date_with_sequence,
                score = %score.raw(),
            ),
            LedgerEvent::OwnershipTransferred {
                previous,
                new_owner,
            } => tracing::info!(
                target: "raffle_score::audit",
                event = event.name(),
                previous = %previous,
                new_owner = %new_owner,
            ),
        }
    }
}

/// Writes one JSON object per notification, newline-delimited.
///
/// Write errors are logged and counted. A non-zero
/// [`failed_writes`](Self::failed_writes) means the output is behind the
/// ledger.
pub struct JsonLinesAuditSink<W: Write + Send> {
    writer: Mutex<W>,
    failed: AtomicU64,
}

impl<W: Write + Send> JsonLinesAuditSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            failed: AtomicU64::new(0),
        }
    }

    /// Number of notifications that could not be written.
    pub fn failed_writes(&self) -> u64 {
        self.failed.load(Ordering::Acquire)
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> AuditSink for JsonLinesAuditSink<W> {
    fn publish(&self, event: &LedgerEvent) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let written = serde_json::to_writer(&mut *writer, event)
            .map_err(std::io::Error::from)
            .and_then(|()| writer.write_all(b"\n"))
            .and_then(|()| writer.flush());

        if let Err(e) = written {
            let failed = self.failed.fetch_add(1, Ordering::AcqRel) + 1;
            tracing::error!(
                event = event.name(),
                error = %e,
                failed_writes = failed,
                "failed to write audit record"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raffle_score_core::{ClientId, DateSequence, Identity, Score};

    fn stored(client: u64) -> LedgerEvent {
        LedgerEvent::score_stored(
            ClientId::from(client),
            DateSequence::from_parts(20240327, 1),
            Score::from(10000u64),
        )
    }

    #[test]
    fn test_memory_log_keeps_order() {
        let log = MemoryAuditLog::new();
        log.publish(&stored(1));
        log.publish(&stored(2));

        assert_eq!(log.events(), vec![stored(1), stored(2)]);
        assert_eq!(log.len(), 2);

        assert_eq!(log.take().len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn test_shared_log_through_arc() {
        let log = Arc::new(MemoryAuditLog::new());
        let sink: Arc<dyn AuditSink> = log.clone();
        sink.publish(&stored(7));
        assert_eq!(log.events(), vec![stored(7)]);
    }

    #[test]
    fn test_json_lines_sink() {
        let sink = JsonLinesAuditSink::new(Vec::new());
        sink.publish(&stored(1));
        sink.publish(&LedgerEvent::ownership_transferred(
            Identity::from_bytes([0x01; 20]),
            Identity::from_bytes([0x02; 20]),
        ));

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: LedgerEvent = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, stored(1));
        assert!(lines[1].contains("\"event\":\"ownership_transferred\""));
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_lines_sink_counts_failed_writes() {
        let sink = JsonLinesAuditSink::new(BrokenWriter);
        assert_eq!(sink.failed_writes(), 0);

        sink.publish(&stored(1));
        sink.publish(&stored(2));
        assert_eq!(sink.failed_writes(), 2);
    }

    #[test]
    fn test_json_lines_sink_success_is_not_counted() {
        let sink = JsonLinesAuditSink::new(Vec::new());
        sink.publish(&stored(1));
        assert_eq!(sink.failed_writes(), 0);
    }

    #[test]
    fn test_tracing_sink_does_not_panic_without_subscriber() {
        TracingAuditSink.publish(&stored(1));
    }
}
