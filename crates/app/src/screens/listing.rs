//! List state shared by the screens that display server lists

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

struct ListingState<T> {
    items: Vec<T>,
    /// Ticket of the fetch whose items are displayed (0 = initial empty list)
    generation: u64,
}

/// Displayed list plus the ordering of the fetches that feed it.
///
/// Each fetch takes a ticket before its request goes out; a response is
/// applied only if no later ticket has been applied already, so overlapping
/// fetches cannot roll the list back to older data.
pub(crate) struct Listing<T> {
    state: RwLock<ListingState<T>>,
    issued: AtomicU64,
}

impl<T: Clone> Listing<T> {
    pub(crate) fn new() -> Self {
        Self {
            state: RwLock::new(ListingState {
                items: Vec::new(),
                generation: 0,
            }),
            issued: AtomicU64::new(0),
        }
    }

    pub(crate) fn ticket(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Replace the list wholesale. Returns false if a newer fetch already won.
    pub(crate) async fn apply(&self, ticket: u64, items: Vec<T>) -> bool {
        let mut state = self.state.write().await;
        if ticket <= state.generation {
            return false;
        }
        state.items = items;
        state.generation = ticket;
        true
    }

    pub(crate) async fn snapshot(&self) -> Vec<T> {
        self.state.read().await.items.clone()
    }
}
