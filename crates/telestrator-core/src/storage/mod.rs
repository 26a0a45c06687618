//! Storage abstraction for saved sessions.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::snapshot::SessionSnapshot;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Session not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for session storage backends.
///
/// Implementations can store session snapshots in memory, on the
/// filesystem, or behind a remote service.
pub trait Storage: Send + Sync {
    /// Save a session snapshot.
    fn save(&self, id: &str, snapshot: &SessionSnapshot) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a session snapshot.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<SessionSnapshot>>;

    /// Delete a session snapshot.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all session IDs.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a session exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Simple blocking executor for storage tests.
#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}
