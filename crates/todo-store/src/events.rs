//! Change notification for the todo store.
//!
//! Every successful insert publishes one `StoreEvent` to the listeners whose
//! filter matches it. Listeners are registered explicitly, either as a
//! `Subscription` (a queue the caller drains) or as a callback that runs on
//! its own Tokio task.
//!
//! # Delivery
//!
//! - Each listener owns a bounded `tokio::sync::mpsc` queue
//! - Publishing never blocks: a full queue drops the event for that listener
//!   only, a closed queue removes the listener
//! - Events reach a listener in the order the mutations happened
//!
//! # Event Types
//!
//! - `todo_added`: a todo was created
//! - `note_added`: a note was appended to a todo (carries the parent id)
//!
//! Adding a note does not publish anything about the parent todo itself.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::stream::{self, Stream};
use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use todo_core::{Note, Todo, TodoId};

/// Default capacity of each listener's queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

// ============================================================================
// Event Types
// ============================================================================

/// An event published after a successful store mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A todo was created.
    TodoAdded { todo: Todo },
    /// A note was appended to the todo `todo_id`.
    NoteAdded { todo_id: TodoId, note: Note },
}

impl StoreEvent {
    /// Wire name of the event kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TodoAdded { .. } => "todo_added",
            Self::NoteAdded { .. } => "note_added",
        }
    }
}

/// Selects which events a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFilter {
    /// Every `TodoAdded` event.
    TodoAdded,
    /// `NoteAdded` events, restricted to one parent todo when `todo_id` is set.
    NoteAdded { todo_id: Option<TodoId> },
}

impl EventFilter {
    /// Whether `event` should be delivered to a listener with this filter.
    pub fn matches(&self, event: &StoreEvent) -> bool {
        match (self, event) {
            (Self::TodoAdded, StoreEvent::TodoAdded { .. }) => true,
            (Self::NoteAdded { todo_id: None }, StoreEvent::NoteAdded { .. }) => true,
            (Self::NoteAdded { todo_id: Some(wanted) }, StoreEvent::NoteAdded { todo_id, .. }) => {
                wanted == todo_id
            }
            _ => false,
        }
    }
}

// ============================================================================
// Subscription
// ============================================================================

/// Receiving end of a registered listener.
///
/// Dropping the subscription unregisters the listener on the next publish or
/// subscribe.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    filter: EventFilter,
    rx: mpsc::Receiver<StoreEvent>,
}

impl Subscription {
    /// Listener id, unique within its notifier.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The filter this subscription was registered with.
    pub fn filter(&self) -> EventFilter {
        self.filter
    }

    /// Wait for the next event.
    ///
    /// Returns `None` once the notifier has been dropped and the queue is empty.
    pub async fn recv(&mut self) -> Option<StoreEvent> {
        self.rx.recv().await
    }

    /// Take the next queued event without waiting.
    pub fn try_recv(&mut self) -> Option<StoreEvent> {
        self.rx.try_recv().ok()
    }

    /// Convert into a stream of events.
    pub fn into_stream(self) -> impl Stream<Item = StoreEvent> + Send + 'static {
        stream::unfold(self, |mut sub| async move {
            let event = sub.recv().await?;
            Some((event, sub))
        })
    }
}

// ============================================================================
// Notifier
// ============================================================================

/// Notifier configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Capacity of each listener's queue. Values below 1 are raised to 1.
    pub queue_capacity: usize,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

#[derive(Debug)]
struct Listener {
    id: u64,
    filter: EventFilter,
    tx: mpsc::Sender<StoreEvent>,
}

/// Registry of listeners for store events.
#[derive(Debug)]
pub struct Notifier {
    listeners: Mutex<Vec<Listener>>,
    capacity: usize,
    next_id: AtomicU64,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(NotifierConfig::default())
    }
}

impl Notifier {
    /// Create a notifier with the given configuration.
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            capacity: config.queue_capacity.max(1),
            next_id: AtomicU64::new(1),
        }
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<Listener>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a listener for events matching `filter`.
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        let (tx, rx) = mpsc::channel(self.capacity);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let mut listeners = self.listeners();
        listeners.retain(|listener| !listener.tx.is_closed());
        listeners.push(Listener { id, filter, tx });
        drop(listeners);

        tracing::debug!(listener_id = id, ?filter, "Registered store listener");

        Subscription { id, filter, rx }
    }

    /// Register a listener for every created todo.
    pub fn subscribe_todos(&self) -> Subscription {
        self.subscribe(EventFilter::TodoAdded)
    }

    /// Register a listener for created notes, optionally only those of one todo.
    pub fn subscribe_notes(&self, todo_id: Option<TodoId>) -> Subscription {
        self.subscribe(EventFilter::NoteAdded { todo_id })
    }

    /// Run `callback` for every created todo.
    ///
    /// The callback runs on a spawned task fed by its own queue, so it never
    /// delays the mutating caller. The task ends when the notifier is dropped.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn on_todo_added<F>(&self, mut callback: F) -> JoinHandle<()>
    where
        F: FnMut(Todo) + Send + 'static,
    {
        let mut sub = self.subscribe_todos();
        tokio::spawn(async move {
            while let Some(event) = sub.recv().await {
                if let StoreEvent::TodoAdded { todo } = event {
                    callback(todo);
                }
            }
        })
    }

    /// Run `callback` for every note created under `todo_id`, or under any
    /// todo when `todo_id` is `None`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn on_note_added<F>(&self, todo_id: Option<TodoId>, mut callback: F) -> JoinHandle<()>
    where
        F: FnMut(TodoId, Note) + Send + 'static,
    {
        let mut sub = self.subscribe_notes(todo_id);
        tokio::spawn(async move {
            while let Some(event) = sub.recv().await {
                if let StoreEvent::NoteAdded { todo_id, note } = event {
                    callback(todo_id, note);
                }
            }
        })
    }

    /// Deliver `event` to every matching listener.
    ///
    /// Returns the number of listeners the event was queued for.
    pub(crate) fn publish(&self, event: &StoreEvent) -> usize {
        let mut listeners = self.listeners();
        let mut delivered = 0;

        listeners.retain(|listener| {
            if !listener.filter.matches(event) {
                return !listener.tx.is_closed();
            }
            match listener.tx.try_send(event.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        listener_id = listener.id,
                        event = event.name(),
                        "Listener queue full, dropping event"
                    );
                    true
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!(listener_id = listener.id, "Removing closed store listener");
                    false
                }
            }
        });

        tracing::trace!(event = event.name(), receivers = delivered, "Published store event");

        delivered
    }

    /// Number of registered listeners, including ones whose receiver was
    /// dropped since the last publish or subscribe.
    pub fn listener_count(&self) -> usize {
        self.listeners().len()
    }

    /// Queue capacity given to each new listener.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// ============================================================================
// Tests
// ============================================================================
