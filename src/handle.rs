//! Non-blocking search submission.
//!
//! Every submission gets its own OS thread running the synchronous search
//! against a configuration snapshot. The outcome travels back either through
//! a single-use [`ProofHandle`] or through a shared [`OutcomeSender`].

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::thread;

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use powork_core::{Proof, SearchError, SearchParams};

/// What a search delivers: a proof or the reason there is none.
pub type SearchOutcome = Result<Proof, SearchError>;

/// Sending half of a channel shared by many searches.
pub type OutcomeSender = mpsc::Sender<SearchOutcome>;

/// Receiving half of a channel shared by many searches.
pub type OutcomeReceiver = mpsc::Receiver<SearchOutcome>;

/// Create a bounded channel for [`crate::Worker::send_to_channel`].
///
/// A `buffer` of zero is raised to one.
pub fn outcome_channel(buffer: usize) -> (OutcomeSender, OutcomeReceiver) {
    mpsc::channel(buffer.max(1))
}

/// Single-use completion handle for one search.
///
/// Await it from async code, or call [`ProofHandle::wait`] from a plain
/// thread. Either way it yields exactly one outcome.
#[derive(Debug)]
#[must_use = "the search outcome is lost when the handle is dropped"]
pub struct ProofHandle {
    rx: oneshot::Receiver<SearchOutcome>,
}

impl ProofHandle {
    pub(crate) fn spawn(params: SearchParams, message: Bytes) -> Self {
        let (tx, rx) = oneshot::channel();
        let spawned = spawn_search(params, message, move |outcome| {
            if tx.send(outcome).is_err() {
                debug!("search handle dropped before completion");
            }
        });
        if let Err(err) = spawned {
            // the sender went down with the closure, so the handle reports
            // `Interrupted`
            warn!(%err, "failed to spawn search thread");
        }
        Self { rx }
    }

    /// Block the current thread until the search finishes.
    ///
    /// # Panics
    ///
    /// Panics when called from within an async runtime; `.await` the handle
    /// there instead.
    pub fn wait(self) -> SearchOutcome {
        self.rx
            .blocking_recv()
            .unwrap_or(Err(SearchError::Interrupted))
    }

    /// Take the outcome if the search has finished, without blocking.
    ///
    /// Returns `None` while the search is still running. Once an outcome has
    /// been taken the handle is spent and reports `Interrupted`.
    pub fn try_outcome(&mut self) -> Option<SearchOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(SearchError::Interrupted)),
        }
    }
}

impl Future for ProofHandle {
    type Output = SearchOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(SearchError::Interrupted)))
    }
}

/// Push one search outcome onto a shared channel from a new thread.
pub(crate) fn spawn_to_channel(params: SearchParams, message: Bytes, sender: &OutcomeSender) {
    let tx = sender.clone();
    let spawned = spawn_search(params, message, move |outcome| {
        if tx.blocking_send(outcome).is_err() {
            warn!("outcome channel closed; dropping search result");
        }
    });

    if let Err(err) = spawned {
        warn!(%err, "failed to spawn search thread");
        if sender.try_send(Err(SearchError::Interrupted)).is_err() {
            warn!("outcome channel full or closed; dropping search failure");
        }
    }
}

fn spawn_search<F>(params: SearchParams, message: Bytes, deliver: F) -> std::io::Result<()>
where
    F: FnOnce(SearchOutcome) + Send + 'static,
{
    thread::Builder::new()
        .name("powork-search".into())
        .spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| params.search(message)))
                .unwrap_or_else(|_| {
                    warn!("proof search panicked");
                    Err(SearchError::Interrupted)
                });
            deliver(outcome);
        })
        .map(drop)
}
