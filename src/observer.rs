//! Progress stream delivery.
//!
//! Runners hand each per-iteration event to an [`Observer`]. The core makes
//! no assumption about how events are displayed; rendering, logging or
//! plotting all live on the consumer side.

use std::sync::mpsc::Sender;

/// Receives one event per completed iteration.
///
/// Implemented for:
///
/// - `()`, which discards every event;
/// - any `FnMut(&E)` closure;
/// - [`std::sync::mpsc::Sender<E>`], which clones the event into the channel.
///   A disconnected receiver is ignored; the run continues.
pub trait Observer<E> {
    /// Called after the iteration's pheromone update has completed.
    fn on_iteration(&mut self, event: &E);
}

impl<E> Observer<E> for () {
    fn on_iteration(&mut self, _event: &E) {}
}

impl<E, F> Observer<E> for F
where
    F: FnMut(&E),
{
    fn on_iteration(&mut self, event: &E) {
        self(event)
    }
}

impl<E: Clone> Observer<E> for Sender<E> {
    fn on_iteration(&mut self, event: &E) {
        if self.send(event.clone()).is_err() {
            tracing::debug!("progress receiver dropped; event discarded");
        }
    }
}
