//! Generic fetch/loading/records state shared by every page.
//!
//! Each page used to hand-roll the same triple of signals; this module
//! implements it once. Overlapping fetches are tagged with a monotonically
//! increasing generation token and a response is applied only if its token
//! is still the latest issued, so a slow earlier fetch can never overwrite
//! the rows of a later one.

use leptos::prelude::*;
use std::future::Future;
use wasm_bindgen_futures::spawn_local;

/// Monotonic token dispenser for in-flight requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation {
    issued: u64,
}

impl Generation {
    /// Issue the next token, which becomes the current one.
    pub fn next(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Whether `token` is the most recently issued one.
    pub fn is_current(&self, token: u64) -> bool {
        token == self.issued
    }
}

/// View state for one fetched collection: the records, a loading flag and
/// the last fetch error, if any.
pub struct ListResource<T: Send + Sync + 'static> {
    pub records: RwSignal<Vec<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    generation: StoredValue<Generation>,
}

impl<T: Send + Sync + 'static> Clone for ListResource<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListResource<T> {}

impl<T: Send + Sync + 'static> Default for ListResource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> ListResource<T> {
    pub fn new() -> Self {
        Self {
            records: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            generation: StoredValue::new(Generation::default()),
        }
    }

    /// Replace `records` with the outcome of `fut`. Stale outcomes (a
    /// newer `load` started in the meantime) are discarded without
    /// touching any state.
    pub fn load<Fut>(self, fut: Fut)
    where
        Fut: Future<Output = Result<Vec<T>, String>> + 'static,
    {
        // Disposed resource (the page unmounted): nothing to load into.
        let Some(mut generation) = self.generation.try_get_value() else {
            return;
        };
        let token = generation.next();
        self.generation.set_value(generation);

        self.loading.set(true);
        spawn_local(async move {
            let outcome = fut.await;
            // The owning page may have unmounted while the request was in
            // flight; a disposed resource drops the outcome.
            let Some(generation) = self.generation.try_get_value() else {
                return;
            };
            if !generation.is_current(token) {
                return;
            }
            match outcome {
                Ok(rows) => {
                    _ = self.records.try_set(rows);
                    _ = self.error.try_set(None);
                }
                Err(e) => {
                    log::warn!("fetch failed: {}", e);
                    _ = self.error.try_set(Some(e));
                }
            }
            _ = self.loading.try_set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_increase_monotonically() {
        let mut generation = Generation::default();
        let first = generation.next();
        let second = generation.next();
        assert!(second > first);
    }

    #[test]
    fn only_the_latest_token_is_current() {
        let mut generation = Generation::default();
        let slow = generation.next();
        let fast = generation.next();
        // The slow fetch lands after the fast one started: discarded.
        assert!(!generation.is_current(slow));
        assert!(generation.is_current(fast));
    }

    #[test]
    fn a_token_stays_current_until_superseded() {
        let mut generation = Generation::default();
        let token = generation.next();
        assert!(generation.is_current(token));
        generation.next();
        assert!(!generation.is_current(token));
    }
}
