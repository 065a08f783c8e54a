//! Runtime for executing conversations
//!
//! Every conversation is an actor task that owns its turn log exclusively.
//! Callers talk to it through a [`ConversationHandle`]; the
//! [`ConversationManager`] keeps one handle per live conversation.

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::ConversationRuntime;

use crate::llm::LlmService;
use crate::persona::{Difficulty, Product};
use crate::state_machine::{ConvContext, Conversation, Event, Outcome, Phase, Turn};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch, RwLock};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Read-only view of a conversation handed to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSnapshot {
    pub id: String,
    pub difficulty: Difficulty,
    pub product: Product,
    pub turns: Vec<Turn>,
    pub phase: Phase,
    pub outcome: Option<Outcome>,
    /// A completion is in flight and new submissions are ignored
    pub awaiting_reply: bool,
}

impl ConversationSnapshot {
    pub fn capture(context: &ConvContext, conversation: &Conversation) -> Self {
        Self {
            id: context.conversation_id.clone(),
            difficulty: context.difficulty,
            product: context.product,
            turns: conversation.turns.clone(),
            phase: conversation.state.phase(),
            outcome: conversation.state.outcome(),
            awaiting_reply: conversation.state.is_awaiting_reply(),
        }
    }
}

/// Events pushed to live subscribers
#[derive(Debug, Clone)]
pub enum EngineEvent {
    Snapshot(ConversationSnapshot),
    /// Transient message for the trainee; never part of the turn log
    Notice { message: String },
}

/// Handle to interact with a running conversation
///
/// Dropping the handle tears the conversation down, including any pending
/// completion or deferred verdict.
pub struct ConversationHandle {
    event_tx: mpsc::Sender<Event>,
    snapshot_rx: watch::Receiver<ConversationSnapshot>,
    broadcast_tx: broadcast::Sender<EngineEvent>,
    shutdown: CancellationToken,
    /// Last time a caller read from or wrote to this conversation
    last_touched: Mutex<Instant>,
}

impl ConversationHandle {
    /// Start the conversation actor in the background
    pub fn spawn<L>(context: ConvContext, llm: Arc<L>) -> Self
    where
        L: LlmService + ?Sized + 'static,
    {
        let (event_tx, event_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);
        let shutdown = CancellationToken::new();

        let runtime = ConversationRuntime::new(
            context,
            llm,
            event_rx,
            event_tx.clone(),
            broadcast_tx.clone(),
            shutdown.clone(),
        );
        let snapshot_rx = runtime.watch();

        tokio::spawn(runtime.run());

        Self {
            event_tx,
            snapshot_rx,
            broadcast_tx,
            shutdown,
            last_touched: Mutex::new(Instant::now()),
        }
    }

    fn touch(&self) {
        *self.last_touched.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    /// No live stream and no calls for at least `max_idle`
    fn is_idle(&self, max_idle: Duration) -> bool {
        let last = *self.last_touched.lock().unwrap_or_else(PoisonError::into_inner);
        self.broadcast_tx.receiver_count() == 0 && last.elapsed() >= max_idle
    }

    /// Queue a trainee line. Returns false once the runtime has stopped.
    pub async fn submit_user_turn(&self, text: impl Into<String>) -> bool {
        self.touch();
        self.event_tx
            .send(Event::UserTurn { text: text.into() })
            .await
            .is_ok()
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        self.touch();
        self.snapshot_rx.borrow().clone()
    }

    #[cfg(test)]
    pub fn watch(&self) -> watch::Receiver<ConversationSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Current snapshot plus a receiver for everything after it
    pub fn subscribe(&self) -> (ConversationSnapshot, broadcast::Receiver<EngineEvent>) {
        let rx = self.broadcast_tx.subscribe();
        (self.snapshot(), rx)
    }
}

impl Drop for ConversationHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Manager for all conversation runtimes
///
/// A client that leaves without going back still holds an entry; such
/// entries are dropped by [`ConversationManager::reap_idle`] once nothing has
/// touched them for `idle_timeout` and no stream is open.
pub struct ConversationManager {
    llm: Arc<dyn LlmService>,
    conclusion_delay: Duration,
    idle_timeout: Duration,
    conversations: RwLock<HashMap<String, ConversationHandle>>,
}

impl ConversationManager {
    pub fn new(llm: Arc<dyn LlmService>, conclusion_delay: Duration, idle_timeout: Duration) -> Self {
        Self {
            llm,
            conclusion_delay,
            idle_timeout,
            conversations: RwLock::new(HashMap::new()),
        }
    }

    /// Start a fresh conversation and return its seeded snapshot
    pub async fn start(&self, difficulty: Difficulty, product: Product) -> ConversationSnapshot {
        self.reap_idle().await;

        let id = uuid::Uuid::new_v4().to_string();
        let context = ConvContext::new(&id, difficulty, product)
            .with_conclusion_delay(self.conclusion_delay);

        let handle = ConversationHandle::spawn(context, self.llm.clone());
        let snapshot = handle.snapshot();

        self.conversations.write().await.insert(id, handle);
        snapshot
    }

    /// Forward a trainee line. False if the conversation does not exist.
    pub async fn submit_user_turn(&self, id: &str, text: impl Into<String>) -> bool {
        match self.conversations.read().await.get(id) {
            Some(handle) => handle.submit_user_turn(text).await,
            None => false,
        }
    }

    /// Discard a conversation entirely. Returns whether anything was removed.
    pub async fn go_back(&self, id: &str) -> bool {
        let removed = self.conversations.write().await.remove(id);
        if removed.is_some() {
            tracing::info!(conv_id = %id, "Conversation discarded");
        }
        removed.is_some()
    }

    /// Tear down abandoned conversations. Returns how many were dropped.
    pub async fn reap_idle(&self) -> usize {
        let mut conversations = self.conversations.write().await;
        let before = conversations.len();
        conversations.retain(|id, handle| {
            let idle = handle.is_idle(self.idle_timeout);
            if idle {
                tracing::info!(conv_id = %id, "Idle conversation discarded");
            }
            !idle
        });
        before - conversations.len()
    }

    /// Reap on a fixed period until the manager is dropped
    pub fn spawn_reaper(self: &Arc<Self>, period: Duration) {
        let manager_weak = Arc::downgrade(self);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                if let Some(manager) = manager_weak.upgrade() {
                    manager.reap_idle().await;
                } else {
                    tracing::debug!("ConversationManager dropped, reaper exiting");
                    break;
                }
            }
        });
    }

    pub async fn snapshot(&self, id: &str) -> Option<ConversationSnapshot> {
        self.conversations
            .read()
            .await
            .get(id)
            .map(ConversationHandle::snapshot)
    }

    pub async fn subscribe(
        &self,
        id: &str,
    ) -> Option<(ConversationSnapshot, broadcast::Receiver<EngineEvent>)> {
        self.conversations
            .read()
            .await
            .get(id)
            .map(ConversationHandle::subscribe)
    }
}
