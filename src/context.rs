//! Cancellation and deadline propagation for pipeline stages
//!
//! A [`StreamContext`] is handed to every stage that may need to stop early.
//! It becomes *done* when its [`CancelHandle`] is cancelled (or dropped) or
//! when its deadline passes, whichever happens first.

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};

use crate::error::StreamError;

/// Shared cancellation token with an optional deadline
#[derive(Debug, Clone)]
pub struct StreamContext {
    cancelled: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Cancels the [`StreamContext`] it was created with.
///
/// Dropping the handle cancels as well, so keep it alive for as long as the
/// pipeline should run.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation to every clone of the context
    pub fn cancel(&self) {
        if !self.sender.send_replace(true) {
            log::debug!("context: cancelled");
        }
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.sender.send_replace(true);
    }
}

impl StreamContext {
    /// A context that is never done
    pub fn background() -> Self {
        Self {
            cancelled: None,
            deadline: None,
        }
    }

    /// A context that is done once the returned handle is cancelled
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        (
            Self {
                cancelled: Some(receiver),
                deadline: None,
            },
            CancelHandle { sender },
        )
    }

    /// A cancellable context that is also done after `timeout`
    pub fn with_timeout(timeout: Duration) -> (Self, CancelHandle) {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A cancellable context that is also done at `deadline`
    pub fn with_deadline(deadline: Instant) -> (Self, CancelHandle) {
        let (mut ctx, handle) = Self::with_cancel();
        ctx.deadline = Some(deadline);
        (ctx, handle)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Why the context is done, or `None` while it is still live
    pub fn err(&self) -> Option<StreamError> {
        if let Some(receiver) = &self.cancelled {
            if *receiver.borrow() {
                return Some(StreamError::Cancelled);
            }
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(StreamError::Timeout),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    /// Resolves once the context is done.
    ///
    /// The returned future owns its state, so it can be pinned inside a
    /// `stream!` block or moved into a spawned task.
    pub fn done(&self) -> impl Future<Output = ()> + Send + 'static {
        let cancelled = self.cancelled.clone();
        let deadline = self.deadline;
        async move {
            let cancelled = wait_cancelled(cancelled);
            match deadline {
                Some(deadline) => {
                    tokio::select! {
                        _ = cancelled => {},
                        _ = sleep_until(deadline) => {},
                    }
                }
                None => cancelled.await,
            }
        }
    }
}

impl Default for StreamContext {
    fn default() -> Self {
        Self::background()
    }
}

async fn wait_cancelled(receiver: Option<watch::Receiver<bool>>) {
    let Some(mut receiver) = receiver else {
        return std::future::pending().await;
    };
    loop {
        if *receiver.borrow_and_update() {
            return;
        }
        // The handle always publishes `true` before it goes away.
        if receiver.changed().await.is_err() {
            return;
        }
    }
}
