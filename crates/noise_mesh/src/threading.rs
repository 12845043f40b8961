//! Task execution on rayon with one-shot result handles.
//!
//! Work goes to rayon's global pool or to a dedicated pool owned by the
//! executor. Each spawned task reports through a bounded crossbeam channel of
//! capacity one, so a handle can block for its result or poll for it:
//!
//! ```ignore
//! let executor = TaskExecutor::with_threads(4)?;
//!
//! // Queue work (non-blocking)
//! let handle = executor.spawn(move || expensive_computation());
//!
//! // Either poll each frame...
//! if let Some(result) = handle.try_take() { /* use result */ }
//!
//! // ...or block at a barrier
//! let result = handle.wait();
//! ```
//!
//! A panicking task is caught on the worker and drops its sender; the handle
//! then reports `None` instead of blocking forever.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::{self as channel, Receiver, RecvError, TryRecvError};

use crate::error::Result;

/// Identifier attached to a spawned task's log events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct TaskId(u64);

impl TaskId {
  fn next() -> Self {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    Self(COUNTER.fetch_add(1, Ordering::Relaxed))
  }
}

/// Receiving end of one spawned task.
#[derive(Debug)]
pub struct TaskHandle<T> {
  receiver: Receiver<T>,
}

impl<T> TaskHandle<T> {
  /// Block until the task delivers. `None` if it ended without a result.
  pub fn wait(self) -> Option<T> {
    match self.receiver.recv() {
      Ok(result) => Some(result),
      Err(RecvError) => None,
    }
  }

  /// Take the result if it is ready (non-blocking).
  pub fn try_take(&self) -> Option<T> {
    match self.receiver.try_recv() {
      Ok(result) => Some(result),
      Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
    }
  }
}

/// Spawns work on rayon, optionally on a dedicated pool.
#[derive(Clone, Debug, Default)]
pub struct TaskExecutor {
  pool: Option<Arc<rayon::ThreadPool>>,
}

impl TaskExecutor {
  /// Executor backed by rayon's global pool.
  pub fn global() -> Self {
    Self { pool: None }
  }

  /// Executor with a dedicated pool of `threads` workers (0 = global pool).
  pub fn with_threads(threads: usize) -> Result<Self> {
    if threads == 0 {
      return Ok(Self::global());
    }

    let pool = rayon::ThreadPoolBuilder::new()
      .num_threads(threads)
      .thread_name(|i| format!("noise-mesh-{i}"))
      .build()?;

    tracing::debug!(threads, "built dedicated worker pool");
    Ok(Self {
      pool: Some(Arc::new(pool)),
    })
  }

  /// True when this executor owns its pool.
  pub fn is_dedicated(&self) -> bool {
    self.pool.is_some()
  }

  /// Worker threads available to spawned work.
  pub fn num_threads(&self) -> usize {
    match &self.pool {
      Some(pool) => pool.current_num_threads(),
      None => rayon::current_num_threads(),
    }
  }

  /// Spawn `work` (non-blocking) and return its handle.
  pub fn spawn<F, T>(&self, work: F) -> TaskHandle<T>
  where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
  {
    let id = TaskId::next();
    let (sender, receiver) = channel::bounded(1);
    let job = move || match panic::catch_unwind(AssertUnwindSafe(work)) {
      // Receiver dropped = result no longer wanted
      Ok(result) => {
        let _ = sender.send(result);
      }
      Err(_) => tracing::error!(task = id.0, "task panicked"),
    };

    match &self.pool {
      Some(pool) => pool.spawn(job),
      None => rayon::spawn(job),
    }

    TaskHandle { receiver }
  }

  /// Run `op` to completion on this executor's pool, blocking the caller.
  /// Parallel iterators inside `op` use the same pool.
  pub fn install<F, R>(&self, op: F) -> R
  where
    F: FnOnce() -> R + Send,
    R: Send,
  {
    match &self.pool {
      Some(pool) => pool.install(op),
      None => op(),
    }
  }
}

#[cfg(test)]
#[path = "threading_test.rs"]
mod threading_test;
