//! Per-thread activity correlation.
//!
//! Every [`TraceRecord`](crate::TraceRecord) created on a thread captures the
//! activity id that is current there, so listeners can group the events of
//! one logical operation. Transfers link the current activity to another.

use std::cell::Cell;
use std::marker::PhantomData;

use uuid::Uuid;

thread_local! {
    static CURRENT: Cell<Option<Uuid>> = const { Cell::new(None) };
}

/// Activity id current on this thread, if any.
pub fn current_activity() -> Option<Uuid> {
    CURRENT.with(Cell::get)
}

/// Guard that makes an activity current until dropped.
///
/// Scopes nest: dropping one restores whatever was current before it.
/// The guard is tied to the thread it was entered on.
#[derive(Debug)]
pub struct ActivityScope {
    id: Uuid,
    previous: Option<Uuid>,
    _not_send: PhantomData<*const ()>,
}

impl ActivityScope {
    pub fn enter(id: Uuid) -> Self {
        let previous = CURRENT.with(|current| current.replace(Some(id)));
        Self {
            id,
            previous,
            _not_send: PhantomData,
        }
    }

    /// Enter a fresh random activity.
    pub fn start() -> Self {
        Self::enter(Uuid::new_v4())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Drop for ActivityScope {
    fn drop(&mut self) {
        CURRENT.with(|current| current.set(self.previous));
    }
}
