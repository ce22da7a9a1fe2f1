//! Message Store - the observable timeline of one session view.
//!
//! All mutations go through the [`Timeline`] aggregate under a single lock,
//! so readers always see a sorted, duplicate-free snapshot. Every accepted
//! mutation is announced to subscribers (callbacks) and watchers (channels)
//! before that lock is released, so observers see changes in the order they
//! were applied.
//!
//! Subscriber callbacks run with the timeline locked. They may call
//! [`MessageStore::subscribe`] or [`MessageStore::watch`], but must not read,
//! mutate or close the store; consumers that need to do so should use
//! `watch()` instead.
//!
//! Once [`MessageStore::close`] has been called the store is frozen: further
//! mutations are discarded and return `None`. This is how responses that
//! arrive after the view was torn down are dropped.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_channel::mpsc;
use talekeeper_domain::{
    DomainError, PageEdge, PlaceholderId, Timeline, TimelineChange, Turn,
};

type Subscriber = Box<dyn FnMut(TimelineChange) + Send + 'static>;

struct Inner {
    timeline: Mutex<Timeline>,
    subscribers: Mutex<Vec<Subscriber>>,
    watchers: Mutex<Vec<mpsc::UnboundedSender<TimelineChange>>>,
    open: AtomicBool,
    /// Bumped whenever the timeline is replaced wholesale
    generation: AtomicU64,
}

/// Cheaply cloneable handle to a session's timeline
#[derive(Clone)]
pub struct MessageStore {
    inner: Arc<Inner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MessageStore {
    pub fn new() -> Self {
        Self::from_timeline(Timeline::new())
    }

    pub fn from_timeline(timeline: Timeline) -> Self {
        Self {
            inner: Arc::new(Inner {
                timeline: Mutex::new(timeline),
                subscribers: Mutex::new(Vec::new()),
                watchers: Mutex::new(Vec::new()),
                open: AtomicBool::new(true),
                generation: AtomicU64::new(0),
            }),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn snapshot(&self) -> Vec<Turn> {
        lock(&self.inner.timeline).snapshot()
    }

    pub fn len(&self) -> usize {
        lock(&self.inner.timeline).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.inner.timeline).is_empty()
    }

    pub fn confirmed_len(&self) -> usize {
        lock(&self.inner.timeline).confirmed_len()
    }

    pub fn placeholder(&self) -> Option<Turn> {
        lock(&self.inner.timeline).placeholder().cloned()
    }

    pub fn is_open(&self) -> bool {
        self.inner.open.load(Ordering::Acquire)
    }

    /// Changes each time the timeline is replaced. A page fetched under an
    /// older generation no longer lines up with the timeline.
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Acquire)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert an optimistic turn.
    ///
    /// `Ok(None)` means the store is closed and nothing changed.
    pub fn insert_placeholder(&self, turn: Turn) -> Result<Option<TimelineChange>, DomainError> {
        self.mutate(|timeline| timeline.insert_placeholder(turn))
            .transpose()
    }

    pub fn discard_placeholder(&self, id: PlaceholderId) -> Option<TimelineChange> {
        self.mutate(|timeline| timeline.discard_placeholder(id))
            .flatten()
    }

    pub fn merge_page(&self, turns: Vec<Turn>, edge: PageEdge) -> Option<TimelineChange> {
        self.mutate(|timeline| timeline.merge_page(turns, edge))
    }

    /// Merge a page only if no replace happened since `generation` was read.
    pub fn merge_page_at(
        &self,
        generation: u64,
        turns: Vec<Turn>,
        edge: PageEdge,
    ) -> Option<TimelineChange> {
        self.mutate(|timeline| {
            (self.generation() == generation).then(|| timeline.merge_page(turns, edge))
        })
        .flatten()
    }

    pub fn replace(&self, turns: Vec<Turn>) -> Option<TimelineChange> {
        self.mutate(|timeline| {
            self.inner.generation.fetch_add(1, Ordering::AcqRel);
            timeline.replace(turns)
        })
    }

    /// Freeze the store and hang up on all watchers.
    pub fn close(&self) {
        {
            let _timeline = lock(&self.inner.timeline);
            self.inner.open.store(false, Ordering::Release);
        }
        lock(&self.inner.watchers).clear();
        lock(&self.inner.subscribers).clear();
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Register a callback invoked after every change.
    pub fn subscribe(&self, callback: impl FnMut(TimelineChange) + Send + 'static) {
        if self.is_open() {
            lock(&self.inner.subscribers).push(Box::new(callback));
        }
    }

    /// Stream of changes. Ends when the store is closed.
    pub fn watch(&self) -> mpsc::UnboundedReceiver<TimelineChange> {
        let (tx, rx) = mpsc::unbounded();
        if self.is_open() {
            lock(&self.inner.watchers).push(tx);
        }
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner.subscribers).len() + lock(&self.inner.watchers).len()
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut Timeline) -> R) -> Option<R>
    where
        R: Announce,
    {
        let mut timeline = lock(&self.inner.timeline);
        if !self.is_open() {
            tracing::debug!("store closed, dropping mutation");
            return None;
        }
        let result = f(&mut *timeline);

        if let Some(change) = result.change() {
            self.dispatch(change);
        }
        drop(timeline);
        Some(result)
    }

    /// Caller holds the timeline lock.
    fn dispatch(&self, change: &TimelineChange) {
        lock(&self.inner.watchers).retain(|tx| tx.unbounded_send(change.clone()).is_ok());

        // Callbacks run outside the subscribers lock so they can subscribe.
        let mut running = std::mem::take(&mut *lock(&self.inner.subscribers));
        for subscriber in running.iter_mut() {
            subscriber(change.clone());
        }
        let mut subscribers = lock(&self.inner.subscribers);
        running.append(&mut subscribers);
        *subscribers = running;
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStore")
            .field("len", &self.len())
            .field("open", &self.is_open())
            .field("generation", &self.generation())
            .finish()
    }
}

/// Mutation results that may carry a change worth announcing
trait Announce {
    fn change(&self) -> Option<&TimelineChange>;
}

impl Announce for TimelineChange {
    fn change(&self) -> Option<&TimelineChange> {
        Some(self)
    }
}

impl Announce for Option<TimelineChange> {
    fn change(&self) -> Option<&TimelineChange> {
        self.as_ref()
    }
}

impl Announce for Result<TimelineChange, DomainError> {
    fn change(&self) -> Option<&TimelineChange> {
        self.as_ref().ok()
    }
}
