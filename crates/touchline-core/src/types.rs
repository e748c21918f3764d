//! Type aliases for commonly used complex types.
//!
//! Complex types like `Rc<RefCell<T>>` or `Arc<Mutex<T>>` are hard to read
//! at a glance; these aliases give the recurring patterns names and keep
//! them consistent across crates.

use parking_lot::{Mutex, RwLock};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// The board engine is single-threaded by contract; hosts that share it
/// between UI callbacks use this.
pub type Shared<T> = Rc<RefCell<T>>;

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Used when persistence is offloaded to a background task. Uses
/// `parking_lot::Mutex` for better performance than `std::sync::Mutex`.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// A thread-safe reader-writer lock wrapper for read-heavy workloads.
pub type ThreadSafeRw<T> = Arc<RwLock<T>>;

/// Wraps a value in a [`Shared`] handle.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Wraps a value in a [`ThreadSafe`] handle.
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}
