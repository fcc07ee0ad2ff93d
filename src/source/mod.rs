//! Data source adapter: one background retrieval plus a locally held list.
//!
//! [`UserStore::spawn`] hands a [`UserSource`] to a worker thread and returns
//! immediately in the pending state. The UI thread calls [`UserStore::poll`]
//! every tick; the first outcome that arrives moves the store to ready or
//! failed, and both are final.
mod http;

pub use http::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_ENDPOINT, HttpUserSource};

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::FetchError;
use crate::model::{User, UserId};

/// Anything that can produce the full user collection in one call.
pub trait UserSource: Send + 'static {
    fn fetch_users(&self) -> Result<Vec<User>, FetchError>;

    /// Short description shown while the retrieval is pending.
    fn label(&self) -> String {
        "remote source".to_string()
    }
}

/// Retrieval status of the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Failed(String),
    Ready(Vec<User>),
}

pub struct UserStore {
    state: LoadState,
    label: String,
    outcome_rx: Option<Receiver<Result<Vec<User>, FetchError>>>,
}

impl UserStore {
    /// Start retrieving from `source` on a worker thread.
    pub fn spawn<S: UserSource>(source: S) -> Self {
        let label = source.label();
        let (tx, rx) = mpsc::channel();
        tracing::info!(source = %label, "starting user retrieval");
        let spawned = thread::Builder::new()
            .name("user-fetch".into())
            .spawn(move || {
                let outcome = source.fetch_users();
                // The store may be gone already (app quit while pending).
                let _ = tx.send(outcome);
            });
        match spawned {
            Ok(_) => Self {
                state: LoadState::Pending,
                label,
                outcome_rx: Some(rx),
            },
            Err(e) => {
                tracing::error!(error = %e, "could not spawn retrieval thread");
                Self {
                    state: LoadState::Failed(format!("could not start retrieval: {e}")),
                    label,
                    outcome_rx: None,
                }
            }
        }
    }

    /// Build a store that is already resolved with `outcome`.
    pub fn from_outcome(outcome: Result<Vec<User>, FetchError>) -> Self {
        let mut store = Self {
            state: LoadState::Pending,
            label: String::new(),
            outcome_rx: None,
        };
        store.resolve(outcome);
        store
    }

    /// Check for the retrieval outcome without blocking.
    ///
    /// Returns `true` on the single call that moved the store out of pending.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = self.outcome_rx.as_ref() else {
            return false;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(FetchError::WorkerGone),
        };
        self.outcome_rx = None;
        self.resolve(outcome);
        true
    }

    fn resolve(&mut self, outcome: Result<Vec<User>, FetchError>) {
        if self.state != LoadState::Pending {
            return;
        }
        self.state = match outcome {
            Ok(users) => {
                tracing::info!(count = users.len(), "user retrieval finished");
                LoadState::Ready(users)
            }
            Err(e) => {
                tracing::warn!(error = %e, "user retrieval failed");
                LoadState::Failed(e.to_string())
            }
        };
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// The current collection; empty unless the retrieval succeeded.
    pub fn users(&self) -> &[User] {
        match &self.state {
            LoadState::Ready(users) => users,
            _ => &[],
        }
    }

    /// Drop the record with `id` from the local collection.
    ///
    /// Nothing is sent to the remote source. Returns the removed record, or
    /// `None` when no record has that id.
    pub fn remove(&mut self, id: UserId) -> Option<User> {
        let LoadState::Ready(users) = &mut self.state else {
            return None;
        };
        let idx = users.iter().position(|u| u.id == id)?;
        let removed = users.remove(idx);
        tracing::info!(id, name = %removed.name, "removed user from local list");
        Some(removed)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{Address, Company, Geo};
    use std::sync::{Arc, Barrier};
    use std::time::{Duration, Instant};

    pub(crate) fn mk_user(id: UserId, name: &str) -> User {
        let handle = name.to_lowercase().replace(' ', ".");
        User {
            id,
            name: name.to_string(),
            username: handle.clone(),
            email: format!("{handle}@example.com"),
            phone: format!("555-01{id:02}"),
            website: format!("{handle}.org"),
            address: Address {
                street: "Main St".into(),
                suite: format!("Apt. {id}"),
                city: "Springfield".into(),
                zipcode: "12345".into(),
                geo: Geo {
                    lat: "1.5".into(),
                    lng: "-2.25".into(),
                },
            },
            company: Company {
                name: format!("{name} Inc"),
                catch_phrase: "Synergy".into(),
                bs: "widgets".into(),
            },
        }
    }

    struct Fixed(Vec<User>);

    impl UserSource for Fixed {
        fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct Gated(Arc<Barrier>);

    impl UserSource for Gated {
        fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
            self.0.wait();
            Err(FetchError::WorkerGone)
        }
    }

    struct Panicking;

    impl UserSource for Panicking {
        fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
            panic!("source blew up");
        }
    }

    fn poll_until_resolved(store: &mut UserStore) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !store.poll() {
            assert!(Instant::now() < deadline, "retrieval never resolved");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn spawn_reaches_ready() {
        let mut store = UserStore::spawn(Fixed(vec![mk_user(1, "Ann"), mk_user(2, "Bo")]));
        poll_until_resolved(&mut store);
        assert!(!store.is_loading());
        assert_eq!(store.error(), None);
        assert_eq!(store.users().len(), 2);
        // Terminal: further polls report nothing.
        assert!(!store.poll());
    }

    #[test]
    fn stays_pending_until_source_answers() {
        let gate = Arc::new(Barrier::new(2));
        let mut store = UserStore::spawn(Gated(gate.clone()));
        assert!(!store.poll());
        assert!(store.is_loading());
        assert!(store.users().is_empty());
        gate.wait();
        poll_until_resolved(&mut store);
        assert!(store.error().is_some());
        assert!(store.users().is_empty());
    }

    #[test]
    fn worker_that_dies_counts_as_failure() {
        let mut store = UserStore::spawn(Panicking);
        poll_until_resolved(&mut store);
        assert_eq!(
            store.error(),
            Some("retrieval stopped before reporting a result")
        );
    }

    #[test]
    fn remove_present_id_drops_exactly_one() {
        let mut store = UserStore::from_outcome(Ok(vec![
            mk_user(1, "Ann"),
            mk_user(2, "Bo"),
            mk_user(3, "Cy"),
        ]));
        let removed = store.remove(2).map(|u| u.name);
        assert_eq!(removed.as_deref(), Some("Bo"));
        let ids: Vec<_> = store.users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn remove_absent_id_is_a_noop() {
        let mut store = UserStore::from_outcome(Ok(vec![mk_user(1, "Ann")]));
        assert!(store.remove(42).is_none());
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn remove_before_ready_does_nothing() {
        let mut store = UserStore::from_outcome(Err(FetchError::WorkerGone));
        assert!(store.remove(1).is_none());
        assert!(store.users().is_empty());
    }
}
