//! The live OS color-scheme signal.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::warn;

/// A change listener. Receives the new value of `matches`.
pub type SchemeListener = Box<dyn FnMut(bool)>;

type Detector = Box<dyn Fn() -> bool>;

/// A live, subscribable "does the user prefer dark mode" signal.
///
/// Mirrors the shape of a media-query handle: a current boolean
/// ([`matches`](SchemeSignal::matches)) plus a change-event subscription
/// ([`subscribe`](SchemeSignal::subscribe)). The OS-backed variant reads the
/// platform preference through the `dark-light` crate; [`poll`](SchemeSignal::poll)
/// re-detects and notifies listeners when the value changed.
///
/// The signal is shared by reference (`Rc`), not copied: the theme manager
/// and the view layer observe the same object, so a change either side sees
/// is a change both sides see.
///
/// # Single-Threaded Design
///
/// Listener dispatch is run-to-completion on the caller's thread. There is
/// no teardown: subscriptions live as long as the signal, which lives as
/// long as the application.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use vestibule_theme::SchemeSignal;
///
/// let signal = SchemeSignal::fixed(false);
/// let seen = Rc::new(Cell::new(None));
///
/// let seen_by_listener = seen.clone();
/// signal.subscribe(move |matches| seen_by_listener.set(Some(matches)));
///
/// signal.set_matches(true);
/// assert_eq!(seen.get(), Some(true));
/// assert!(signal.matches());
/// ```
pub struct SchemeSignal {
    matches: Cell<bool>,
    listeners: RefCell<Vec<SchemeListener>>,
    detector: Option<Detector>,
}

impl SchemeSignal {
    /// Creates the OS-backed signal, seeded from the current platform
    /// preference.
    ///
    /// Detection failure (or a platform that reports no preference) reads
    /// as "does not prefer dark": the hard default is light.
    pub fn os() -> Rc<Self> {
        Self::with_detector(os_prefers_dark)
    }

    /// Creates a signal backed by a custom detector.
    ///
    /// The detector is consulted by [`poll`](Self::poll) and once at
    /// construction to seed the current value.
    pub fn with_detector<F>(detector: F) -> Rc<Self>
    where
        F: Fn() -> bool + 'static,
    {
        let initial = detector();
        Rc::new(Self {
            matches: Cell::new(initial),
            listeners: RefCell::new(Vec::new()),
            detector: Some(Box::new(detector)),
        })
    }

    /// Creates a signal pinned at the given value, with no detector.
    ///
    /// [`poll`](Self::poll) is a no-op on a fixed signal; tests drive it
    /// through [`set_matches`](Self::set_matches).
    pub fn fixed(matches: bool) -> Rc<Self> {
        Rc::new(Self {
            matches: Cell::new(matches),
            listeners: RefCell::new(Vec::new()),
            detector: None,
        })
    }

    /// The current value of the signal.
    pub fn matches(&self) -> bool {
        self.matches.get()
    }

    /// Registers a change listener.
    ///
    /// Listeners fire on every observed change, with the new value. They
    /// are never removed.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Re-reads the detector and notifies listeners iff the value changed.
    ///
    /// The host event loop is expected to call this at whatever cadence
    /// suits it; each delivery is an independent, atomic trigger.
    pub fn poll(&self) {
        if let Some(detector) = &self.detector {
            let now = detector();
            self.set_matches(now);
        }
    }

    /// Sets the current value, notifying listeners iff it changed.
    ///
    /// This is the event-injection point: tests and embedders that learn
    /// about scheme changes through their own channels call this directly.
    pub fn set_matches(&self, value: bool) {
        if self.matches.get() == value {
            return;
        }
        self.matches.set(value);

        // Dispatch outside the listener cell so a listener may subscribe
        // re-entrantly. Late subscribers do not see this change.
        let mut current = self.listeners.take();
        for listener in current.iter_mut() {
            listener(value);
        }
        let added = self.listeners.take();
        current.extend(added);
        self.listeners.replace(current);
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl std::fmt::Debug for SchemeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemeSignal")
            .field("matches", &self.matches.get())
            .field("listeners", &self.listeners.borrow().len())
            .field("os_backed", &self.detector.is_some())
            .finish()
    }
}

fn os_prefers_dark() -> bool {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => true,
        Ok(dark_light::Mode::Light) | Ok(dark_light::Mode::Unspecified) => false,
        Err(err) => {
            warn!("failed to detect OS color scheme: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_reports_its_value() {
        assert!(SchemeSignal::fixed(true).matches());
        assert!(!SchemeSignal::fixed(false).matches());
    }

    #[test]
    fn test_set_matches_notifies_on_change_only() {
        let signal = SchemeSignal::fixed(false);
        let fired = Rc::new(Cell::new(0));

        let fired_in_listener = fired.clone();
        signal.subscribe(move |_| fired_in_listener.set(fired_in_listener.get() + 1));

        signal.set_matches(false); // unchanged, no event
        assert_eq!(fired.get(), 0);

        signal.set_matches(true);
        assert_eq!(fired.get(), 1);

        signal.set_matches(true); // unchanged again
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_listener_receives_new_value() {
        let signal = SchemeSignal::fixed(false);
        let seen = Rc::new(Cell::new(None));

        let seen_in_listener = seen.clone();
        signal.subscribe(move |matches| seen_in_listener.set(Some(matches)));

        signal.set_matches(true);
        assert_eq!(seen.get(), Some(true));

        signal.set_matches(false);
        assert_eq!(seen.get(), Some(false));
    }

    #[test]
    fn test_all_listeners_fire() {
        let signal = SchemeSignal::fixed(false);
        let count = Rc::new(Cell::new(0));

        for _ in 0..3 {
            let count = count.clone();
            signal.subscribe(move |_| count.set(count.get() + 1));
        }

        signal.set_matches(true);
        assert_eq!(count.get(), 3);
        assert_eq!(signal.listener_count(), 3);
    }

    #[test]
    fn test_detector_seeds_initial_value() {
        let signal = SchemeSignal::with_detector(|| true);
        assert!(signal.matches());
    }

    #[test]
    fn test_poll_follows_detector() {
        let value = Rc::new(Cell::new(false));

        let value_for_detector = value.clone();
        let signal = SchemeSignal::with_detector(move || value_for_detector.get());
        assert!(!signal.matches());

        let fired = Rc::new(Cell::new(0));
        let fired_in_listener = fired.clone();
        signal.subscribe(move |_| fired_in_listener.set(fired_in_listener.get() + 1));

        signal.poll(); // detector still false
        assert_eq!(fired.get(), 0);

        value.set(true);
        signal.poll();
        assert!(signal.matches());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_poll_on_fixed_signal_is_noop() {
        let signal = SchemeSignal::fixed(true);
        signal.poll();
        assert!(signal.matches());
    }

    #[test]
    fn test_reentrant_subscribe_does_not_panic() {
        let signal = SchemeSignal::fixed(false);

        let signal_in_listener = signal.clone();
        signal.subscribe(move |_| {
            signal_in_listener.subscribe(|_| {});
        });

        signal.set_matches(true);
        assert_eq!(signal.listener_count(), 2);
    }
}
