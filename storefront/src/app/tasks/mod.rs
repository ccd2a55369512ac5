//! # Async Tasks
//!
//! Background work spawned on the tokio runtime. Every task sends exactly
//! one completing [`AppEvent`] (see [`AppEvent::completes_task`]), which
//! lets [`TaskSpawner::pending`] count work still outstanding.

pub mod checkout;
pub mod queries;

use async_channel::Sender;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::events::AppEvent;

#[derive(Clone)]
pub struct TaskSpawner {
    event_tx: Sender<AppEvent>,
    pending: Arc<AtomicUsize>,
}

impl TaskSpawner {
    pub fn new(event_tx: Sender<AppEvent>) -> Self {
        Self {
            event_tx,
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Channel for intermediate progress events
    pub fn sender(&self) -> Sender<AppEvent> {
        self.event_tx.clone()
    }

    /// Tasks whose completing event has not been handled yet
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Run `task` in the background and deliver its event.
    pub fn spawn<F>(&self, name: &'static str, task: F)
    where
        F: Future<Output = AppEvent> + Send + 'static,
    {
        self.pending.fetch_add(1, Ordering::SeqCst);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = task.await;
            tracing::debug!(task = name, event = event.name(), "Task finished");
            if tx.send(event).await.is_err() {
                tracing::warn!(task = name, "Event channel closed, result dropped");
            }
        });
    }

    pub(crate) fn task_done(&self) {
        let _ = self
            .pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }
}
