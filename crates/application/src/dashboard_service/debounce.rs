use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Trailing-edge debouncer for the dashboard search box.
///
/// Every keystroke takes a ticket; the driver waits out the quiescence
/// window and only fires the load when its ticket is still the newest.
/// The manual refresh control bypasses this entirely and loads at once.
#[derive(Debug)]
pub struct SearchDebouncer {
    window: Duration,
    generation: AtomicU64,
}

/// Token handed out for one search input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceTicket {
    generation: u64,
    query: String,
}

impl DebounceTicket {
    /// Returns the trimmed query captured with this input event.
    #[must_use]
    pub fn query(&self) -> &str {
        self.query.as_str()
    }
}

impl SearchDebouncer {
    /// Creates a debouncer with the given quiescence window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: AtomicU64::new(0),
        }
    }

    /// Returns the quiescence window the driver must wait out.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Registers an input event, invalidating every earlier ticket.
    pub fn note_input(&self, query: &str) -> DebounceTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        DebounceTicket {
            generation,
            query: query.trim().to_owned(),
        }
    }

    /// Returns whether no newer input arrived since the ticket was taken.
    #[must_use]
    pub fn is_current(&self, ticket: &DebounceTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}
