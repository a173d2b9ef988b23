use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;

/// Pipeline stage a progress event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Client,
    Libraries,
    Assets,
    Runtime,
}

/// Payload handed to the progress sink after each unit of work.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressEvent {
    pub stage: Stage,
    pub item: String,
    pub processed: usize,
    pub failed: usize,
    pub total: usize,
}

/// Callback invoked after each completed unit of work.
pub type ProgressSink = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// Atomic processed/failed counters for one stage.
///
/// Units are recorded by the single task draining the work stream, so the
/// processed count a sink observes only ever grows.
pub struct ProgressCounter {
    stage: Stage,
    total: usize,
    processed: AtomicUsize,
    failed: AtomicUsize,
    sink: Option<ProgressSink>,
}

impl ProgressCounter {
    pub fn new(stage: Stage, total: usize, sink: Option<ProgressSink>) -> Self {
        Self {
            stage,
            total,
            processed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            sink,
        }
    }

    pub fn record(&self, item: &str, succeeded: bool) {
        let failed = if succeeded {
            self.failed.load(Ordering::SeqCst)
        } else {
            self.failed.fetch_add(1, Ordering::SeqCst) + 1
        };
        let processed = self.processed.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(sink) = &self.sink {
            sink(ProgressEvent {
                stage: self.stage,
                item: item.to_string(),
                processed,
                failed,
                total: self.total,
            });
        }
    }

    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn counts_and_emits_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = seen.clone();
        let sink: ProgressSink = Arc::new(move |event: ProgressEvent| {
            sink_seen.lock().unwrap().push((event.processed, event.failed));
        });

        let counter = ProgressCounter::new(Stage::Assets, 3, Some(sink));
        counter.record("a", true);
        counter.record("b", false);
        counter.record("c", true);

        assert_eq!(counter.processed(), 3);
        assert_eq!(counter.failed(), 1);
        assert_eq!(*seen.lock().unwrap(), vec![(1, 0), (2, 1), (3, 1)]);
    }
}
