//! Synchronous, single-threaded notification registries.
//!
//! Every observable component owns one [`Event`] per notification it emits.
//! Observers register a callback and keep the returned [`SubscriptionId`] so
//! they can detach again on teardown.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

/// Identifies one registration on one [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Rc<dyn Fn(&T)>;

/// A listener registry that delivers payloads synchronously, in
/// subscription order, before `emit` returns.
pub struct Event<T> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, Listener<T>)>>,
}

impl<T> Event<T> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Registers `listener` and returns the id needed to remove it.
    pub fn subscribe(
        &self,
        listener: impl Fn(&T) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Removes a registration. Returns `false` if it was already gone.
    pub fn unsubscribe(
        &self,
        id: SubscriptionId,
    ) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Delivers `payload` to every current listener.
    ///
    /// Listeners may subscribe or unsubscribe while being notified. A listener
    /// removed during delivery is not called afterwards; one added during
    /// delivery first hears the next emission.
    pub fn emit(
        &self,
        payload: &T,
    ) {
        let snapshot: Vec<(SubscriptionId, Listener<T>)> = self.listeners.borrow().clone();
        for (id, listener) in snapshot {
            if self.is_subscribed(id) {
                listener(payload);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn is_subscribed(
        &self,
        id: SubscriptionId,
    ) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|(existing, _)| *existing == id)
    }
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
