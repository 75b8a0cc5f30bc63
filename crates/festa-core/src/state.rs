// ── Generic resource state cells ──
//
// Every accessor owns its slice of view-state through one of these
// cells: an in-memory collection (or single record), a loading flag,
// and an error value, published to subscribers via `watch` channels.
//
// Cells also own the stale-settlement policy. Collection-replacing
// operations (fetches, scope changes) take a sequence token at issue
// time; a settlement applies only while its token is still the latest
// issued. An older in-flight fetch can therefore never overwrite a
// newer one's result, and clearing a cell on a scope change invalidates
// everything still in flight for the old scope.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

/// The view-state every list accessor maintains.
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    pub items: Vec<T>,
    /// True strictly between issuing a request and its settlement.
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

/// The view-state for single-record accessors (dashboards, reports,
/// summaries).
#[derive(Debug, Clone)]
pub struct RecordState<T> {
    pub record: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for RecordState<T> {
    fn default() -> Self {
        Self {
            record: None,
            loading: false,
            error: None,
        }
    }
}

/// A sequence token handed out at issue time. Settlements carry it back
/// so the cell can reject the stale ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FetchToken(u64);

// ── ListCell ────────────────────────────────────────────────────────

pub(crate) struct ListCell<T: Clone + Send + Sync + 'static> {
    tx: watch::Sender<Arc<ResourceState<T>>>,
    seq: AtomicU64,
}

impl<T: Clone + Send + Sync + 'static> ListCell<T> {
    pub(crate) fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(ResourceState::default()));
        Self {
            tx,
            seq: AtomicU64::new(0),
        }
    }

    /// Current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<ResourceState<T>> {
        self.tx.borrow().clone()
    }

    /// Subscribe to state changes.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<ResourceState<T>>> {
        self.tx.subscribe()
    }

    /// Start a collection-replacing operation: bumps the sequence,
    /// raises `loading`, clears the previous error. Items stay visible
    /// while the request is in flight.
    pub(crate) fn begin_fetch(&self) -> FetchToken {
        let token = FetchToken(self.seq.fetch_add(1, Ordering::SeqCst) + 1);
        self.tx.send_modify(|state| {
            let mut next = (**state).clone();
            next.loading = true;
            next.error = None;
            *state = Arc::new(next);
        });
        token
    }

    /// Start a mutating operation. Does not bump the sequence: a
    /// mutation settles through [`Self::modify`] or an explicit refetch,
    /// never by replacing the collection directly.
    pub(crate) fn begin_mutation(&self) {
        self.tx.send_modify(|state| {
            let mut next = (**state).clone();
            next.loading = true;
            next.error = None;
            *state = Arc::new(next);
        });
    }

    /// Settle a fetch with a fresh collection. Dropped silently when a
    /// newer collection-replacing operation has been issued since.
    pub(crate) fn settle_items(&self, token: FetchToken, items: Vec<T>) {
        if !self.is_current(token) {
            tracing::debug!("dropping stale fetch settlement");
            return;
        }
        self.tx.send_modify(|state| {
            *state = Arc::new(ResourceState {
                items,
                loading: false,
                error: None,
            });
        });
    }

    /// Settle a fetch with a failure. The collection is reset to empty:
    /// never show possibly-wrong data in preference to last-known-good.
    pub(crate) fn settle_fetch_error(&self, token: FetchToken, message: String) {
        if !self.is_current(token) {
            tracing::debug!("dropping stale fetch failure");
            return;
        }
        self.tx.send_modify(|state| {
            *state = Arc::new(ResourceState {
                items: Vec::new(),
                loading: false,
                error: Some(message),
            });
        });
    }

    /// Settle a mutation that has no local edit to apply.
    pub(crate) fn end_mutation(&self) {
        self.tx.send_modify(|state| {
            let mut next = (**state).clone();
            next.loading = false;
            *state = Arc::new(next);
        });
    }

    /// Settle a mutation with a failure: error recorded, collection
    /// untouched.
    pub(crate) fn settle_mutation_error(&self, message: String) {
        self.tx.send_modify(|state| {
            let mut next = (**state).clone();
            next.loading = false;
            next.error = Some(message);
            *state = Arc::new(next);
        });
    }

    /// Apply a local edit to the collection (update/delete reconciliation)
    /// and settle the mutation.
    pub(crate) fn modify(&self, edit: impl FnOnce(&mut Vec<T>)) {
        self.tx.send_modify(|state| {
            let mut next = (**state).clone();
            edit(&mut next.items);
            next.loading = false;
            next.error = None;
            *state = Arc::new(next);
        });
    }

    /// Discard everything and invalidate all in-flight fetches. Used on
    /// scope changes: records from the old scope must never be visible
    /// under the new one, even transiently.
    pub(crate) fn clear(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
        self.tx.send_modify(|state| {
            *state = Arc::new(ResourceState::default());
        });
    }

    fn is_current(&self, token: FetchToken) -> bool {
        self.seq.load(Ordering::SeqCst) == token.0
    }
}

// ── RecordCell ──────────────────────────────────────────────────────

pub(crate) struct RecordCell<T: Clone + Send + Sync + 'static> {
    tx: watch::Sender<Arc<RecordState<T>>>,
    seq: AtomicU64,
}

impl<T: Clone + Send + Sync + 'static> RecordCell<T> {
    pub(crate) fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(RecordState::default()));
        Self {
            tx,
            seq: AtomicU64::new(0),
        }
    }

    pub(crate) fn snapshot(&self) -> Arc<RecordState<T>> {
        self.tx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<RecordState<T>>> {
        self.tx.subscribe()
    }

    pub(crate) fn begin_fetch(&self) -> FetchToken {
        let token = FetchToken(self.seq.fetch_add(1, Ordering::SeqCst) + 1);
        self.tx.send_modify(|state| {
            let mut next = (**state).clone();
            next.loading = true;
            next.error = None;
            *state = Arc::new(next);
        });
        token
    }

    pub(crate) fn settle_record(&self, token: FetchToken, record: Option<T>) {
        if !self.is_current(token) {
            tracing::debug!("dropping stale record settlement");
            return;
        }
        self.tx.send_modify(|state| {
            *state = Arc::new(RecordState {
                record,
                loading: false,
                error: None,
            });
        });
    }

    pub(crate) fn settle_error(&self, token: FetchToken, message: String) {
        if !self.is_current(token) {
            tracing::debug!("dropping stale record failure");
            return;
        }
        self.tx.send_modify(|state| {
            *state = Arc::new(RecordState {
                record: None,
                loading: false,
                error: Some(message),
            });
        });
    }

    pub(crate) fn clear(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
        self.tx.send_modify(|state| {
            *state = Arc::new(RecordState::default());
        });
    }

    fn is_current(&self, token: FetchToken) -> bool {
        self.seq.load(Ordering::SeqCst) == token.0
    }
}
