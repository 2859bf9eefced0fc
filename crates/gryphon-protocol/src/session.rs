//! Per-session single-threaded execution context.
//!
//! A session binds a client to one dedicated worker thread for the session's
//! whole lifetime. Every unit of work submitted for the session runs on that
//! thread, one at a time, in submission order; the submitting thread blocks
//! until its unit completes. That blocking hand-off is the backpressure
//! mechanism that keeps per-session serialization ordered, and there is no
//! timeout on a stalled unit: shutting the worker down is the only event
//! that unblocks pending submitters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use gryphon_common::{Error, Result};
use tracing::{debug, trace};

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Create a new unique session ID
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        SessionId(COUNTER.fetch_add(1, Ordering::SeqCst))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

enum Command {
    Run(Box<dyn FnOnce() + Send + 'static>),
    Stop,
}

/// Owns a session's dedicated worker thread.
///
/// Created and destroyed by session lifecycle code; the encoding layer only
/// ever sees [`SessionHandle`]s. Dropping the worker stops the thread once
/// the units already queued have run; units queued after the stop are
/// discarded and their submitters get [`Error::SessionExecution`].
pub struct SessionWorker {
    id: SessionId,
    sender: Sender<Command>,
    thread: Option<JoinHandle<()>>,
}

impl SessionWorker {
    /// Spawn the dedicated thread for a new session.
    pub fn spawn() -> Result<Self> {
        let id = SessionId::new();
        let (sender, receiver) = mpsc::channel();
        let thread = thread::Builder::new()
            .name(id.to_string())
            .spawn(move || Self::run(id, receiver))?;
        debug!(%id, "spawned session worker");
        Ok(SessionWorker {
            id,
            sender,
            thread: Some(thread),
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// A cloneable handle for submitting work to this session's thread.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            id: self.id,
            sender: self.sender.clone(),
        }
    }

    /// Stop the worker. Units already queued still run first.
    pub fn shutdown(self) {
        drop(self);
    }

    fn run(id: SessionId, receiver: Receiver<Command>) {
        while let Ok(command) = receiver.recv() {
            match command {
                Command::Run(job) => {
                    trace!(%id, "running unit of work");
                    job();
                }
                Command::Stop => break,
            }
        }
        debug!(%id, "session worker stopped");
    }
}

impl Drop for SessionWorker {
    fn drop(&mut self) {
        let _ = self.sender.send(Command::Stop);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Handle for submitting work to a session's dedicated thread.
#[derive(Clone)]
pub struct SessionHandle {
    id: SessionId,
    sender: Sender<Command>,
}

impl SessionHandle {
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Run `work` on the session's thread and block until it completes.
    ///
    /// Units submitted through any handle of the same session complete in
    /// submission order, one at a time. Fails with
    /// [`Error::SessionExecution`] when the worker has stopped, either
    /// before the unit could be queued or before it ran.
    pub fn submit<F, R>(&self, work: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply_tx, reply_rx) = mpsc::channel();
        let job = Box::new(move || {
            let _ = reply_tx.send(work());
        });
        self.sender
            .send(Command::Run(job))
            .map_err(|_| Error::SessionExecution(format!("{} worker stopped", self.id)))?;
        reply_rx
            .recv()
            .map_err(|_| Error::SessionExecution(format!("{} discarded the unit of work", self.id)))
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_submit_returns_the_unit_result() {
        let worker = SessionWorker::spawn().unwrap();
        let handle = worker.handle();
        assert_eq!(handle.submit(|| 2 + 2).unwrap(), 4);
    }

    #[test]
    fn test_units_run_on_the_session_thread() {
        let worker = SessionWorker::spawn().unwrap();
        let expected = worker.id().to_string();
        let observed = worker
            .handle()
            .submit(|| thread::current().name().map(str::to_string))
            .unwrap();
        assert_eq!(observed.as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn test_units_complete_in_submission_order() {
        let worker = SessionWorker::spawn().unwrap();
        let handle = worker.handle();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..16 {
            let order = Arc::clone(&order);
            handle.submit(move || order.lock().unwrap().push(i)).unwrap();
        }

        assert_eq!(*order.lock().unwrap(), (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_submit_after_shutdown_fails() {
        let worker = SessionWorker::spawn().unwrap();
        let handle = worker.handle();
        worker.shutdown();

        let err = handle.submit(|| ()).unwrap_err();
        assert!(matches!(err, Error::SessionExecution(_)));
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = SessionId::new();
        let b = SessionId::new();
        assert_ne!(a, b);
        assert_eq!(format!("{}", a), format!("session-{}", a.as_u64()));
    }
}
