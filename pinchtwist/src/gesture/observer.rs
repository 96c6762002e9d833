//! Synchronous listener fan-out with per-listener failure isolation.
//!
//! A listener that returns an error or panics is logged and skipped;
//! remaining listeners and remaining events are still delivered.

use std::cell::RefCell;
use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use tracing::{error, warn};

/// Receives gesture events.
pub trait GestureListener<E> {
    fn on_event(&mut self, event: &E) -> anyhow::Result<()>;
}

impl<E, F> GestureListener<E> for F
where
    F: FnMut(&E) -> anyhow::Result<()>,
{
    fn on_event(&mut self, event: &E) -> anyhow::Result<()> {
        self(event)
    }
}

/// A listener also owned elsewhere (e.g. a UI driver the host reads back).
pub struct Shared<L>(pub Rc<RefCell<L>>);

impl<L> Shared<L> {
    pub fn new(inner: &Rc<RefCell<L>>) -> Self {
        Self(Rc::clone(inner))
    }
}

impl<E, L> GestureListener<E> for Shared<L>
where
    L: GestureListener<E>,
{
    fn on_event(&mut self, event: &E) -> anyhow::Result<()> {
        self.0.borrow_mut().on_event(event)
    }
}

/// Registration handle returned by [`Listeners::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered listener list.
pub struct Listeners<E> {
    entries: Vec<(ListenerId, Box<dyn GestureListener<E>>)>,
    next_id: u64,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl<E: Debug> Listeners<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Delivery order is registration order.
    pub fn add<L>(&mut self, listener: L) -> ListenerId
    where
        L: GestureListener<E> + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns true if it was registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() < before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver every event to every listener, in order.
    ///
    /// Returns the number of failed deliveries.
    pub fn dispatch(&mut self, events: &[E]) -> usize {
        let mut failures = 0;
        for event in events {
            for (id, listener) in self.entries.iter_mut() {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener.on_event(event)));
                match outcome {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        failures += 1;
                        warn!(listener = id.0, ?event, "listener failed: {:#}", e);
                    }
                    Err(_) => {
                        failures += 1;
                        error!(listener = id.0, ?event, "listener panicked");
                    }
                }
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Ev {
        A,
        B,
    }

    fn recorder() -> (Rc<RefCell<Vec<Ev>>>, impl FnMut(&Ev) -> anyhow::Result<()>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |e: &Ev| {
            sink.borrow_mut().push(e.clone());
            Ok(())
        })
    }

    #[test]
    fn test_dispatch_in_order() {
        let mut listeners: Listeners<Ev> = Listeners::new();
        let (seen, listener) = recorder();
        listeners.add(listener);
        let failures = listeners.dispatch(&[Ev::A, Ev::B]);
        assert_eq!(failures, 0);
        assert_eq!(*seen.borrow(), vec![Ev::A, Ev::B]);
    }

    #[test]
    fn test_failing_listener_isolated() {
        let mut listeners: Listeners<Ev> = Listeners::new();
        listeners.add(|_: &Ev| -> anyhow::Result<()> { anyhow::bail!("boom") });
        let (seen, listener) = recorder();
        listeners.add(listener);

        let failures = listeners.dispatch(&[Ev::A, Ev::B]);
        assert_eq!(failures, 2);
        assert_eq!(*seen.borrow(), vec![Ev::A, Ev::B]);
    }

    #[test]
    fn test_panicking_listener_isolated() {
        let mut listeners: Listeners<Ev> = Listeners::new();
        listeners.add(|e: &Ev| -> anyhow::Result<()> {
            if *e == Ev::A {
                panic!("listener bug");
            }
            Ok(())
        });
        let (seen, listener) = recorder();
        listeners.add(listener);

        let failures = listeners.dispatch(&[Ev::A, Ev::B]);
        assert_eq!(failures, 1);
        assert_eq!(*seen.borrow(), vec![Ev::A, Ev::B]);
    }

    #[test]
    fn test_remove() {
        let mut listeners: Listeners<Ev> = Listeners::new();
        let (seen, listener) = recorder();
        let id = listeners.add(listener);
        assert_eq!(listeners.len(), 1);
        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        assert!(listeners.is_empty());
        listeners.dispatch(&[Ev::A]);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_shared_listener() {
        struct Counter(usize);
        impl GestureListener<Ev> for Counter {
            fn on_event(&mut self, _event: &Ev) -> anyhow::Result<()> {
                self.0 += 1;
                Ok(())
            }
        }

        let counter = Rc::new(RefCell::new(Counter(0)));
        let mut listeners: Listeners<Ev> = Listeners::new();
        listeners.add(Shared::new(&counter));
        listeners.dispatch(&[Ev::A, Ev::B, Ev::A]);
        assert_eq!(counter.borrow().0, 3);
    }
}
