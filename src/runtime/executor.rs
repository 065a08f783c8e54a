//! Conversation runtime executor

use super::{ConversationSnapshot, EngineEvent};

use crate::llm::LlmService;
use crate::prompt;
use crate::state_machine::{transition, ConvContext, Conversation, Effect, Event};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tokio_util::sync::CancellationToken;

/// Actor owning one conversation; generic over the completion provider
pub struct ConversationRuntime<L>
where
    L: LlmService + ?Sized + 'static,
{
    context: ConvContext,
    conversation: Conversation,
    llm: Arc<L>,
    event_rx: mpsc::Receiver<Event>,
    /// Cloned into background tasks so they can report back
    event_tx: mpsc::Sender<Event>,
    snapshot_tx: watch::Sender<ConversationSnapshot>,
    broadcast_tx: broadcast::Sender<EngineEvent>,
    /// Root token; completions and the deferred verdict hang off child tokens
    shutdown: CancellationToken,
}

impl<L> ConversationRuntime<L>
where
    L: LlmService + ?Sized + 'static,
{
    pub fn new(
        context: ConvContext,
        llm: Arc<L>,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::Sender<Event>,
        broadcast_tx: broadcast::Sender<EngineEvent>,
        shutdown: CancellationToken,
    ) -> Self {
        let conversation = Conversation::new(context.difficulty, context.product);
        let (snapshot_tx, _) = watch::channel(ConversationSnapshot::capture(&context, &conversation));
        Self {
            context,
            conversation,
            llm,
            event_rx,
            event_tx,
            snapshot_tx,
            broadcast_tx,
            shutdown,
        }
    }

    /// Receiver that always holds the latest snapshot
    pub fn watch(&self) -> watch::Receiver<ConversationSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub async fn run(mut self) {
        tracing::info!(
            conv_id = %self.context.conversation_id,
            difficulty = self.context.difficulty.key(),
            product = self.context.product.key(),
            "Starting conversation runtime"
        );

        loop {
            tokio::select! {
                biased;

                () = self.shutdown.cancelled() => break,

                event = self.event_rx.recv() => match event {
                    Some(event) => self.process_event(event),
                    None => break,
                },
            }
        }

        // Outstanding background tasks must not outlive the conversation
        self.shutdown.cancel();
        tracing::info!(conv_id = %self.context.conversation_id, "Conversation runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        if let Event::CompletionFailed { error } = &event {
            tracing::warn!(
                conv_id = %self.context.conversation_id,
                kind = ?error.kind,
                error = %error,
                "Customer reply failed"
            );
        }

        let result = match transition(&self.conversation, &self.context, event) {
            Ok(r) => r,
            Err(e) if e.is_ignorable() => {
                tracing::debug!(
                    conv_id = %self.context.conversation_id,
                    reason = %e,
                    "Ignoring event"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(conv_id = %self.context.conversation_id, error = %e, "Rejected event");
                return;
            }
        };

        let old_state = std::mem::replace(&mut self.conversation.state, result.new_state);
        if old_state.phase() != result.new_state.phase() {
            tracing::info!(
                conv_id = %self.context.conversation_id,
                from = ?old_state.phase(),
                to = ?result.new_state.phase(),
                "Phase changed"
            );
        }

        for effect in result.effects {
            self.execute_effect(effect);
        }

        if let Some(outcome) = self.conversation.state.outcome() {
            tracing::info!(
                conv_id = %self.context.conversation_id,
                outcome = ?outcome,
                turns = self.conversation.turns.len(),
                "Conversation concluded"
            );
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendTurn(turn) => {
                self.conversation.turns.push(turn);
            }

            Effect::PublishSnapshot => {
                let snapshot = ConversationSnapshot::capture(&self.context, &self.conversation);
                self.snapshot_tx.send_replace(snapshot.clone());
                // No subscribers is fine
                let _ = self.broadcast_tx.send(EngineEvent::Snapshot(snapshot));
            }

            Effect::RequestCompletion => {
                let request = prompt::compose(
                    self.context.difficulty,
                    self.context.product,
                    &self.conversation.turns,
                );
                let cancel_token = self.shutdown.child_token();
                let llm = self.llm.clone();
                let event_tx = self.event_tx.clone();
                let conv_id = self.context.conversation_id.clone();

                tokio::spawn(async move {
                    tracing::debug!(
                        conv_id = %conv_id,
                        history_len = request.messages.len(),
                        "Requesting customer reply (background)"
                    );

                    tokio::select! {
                        biased;

                        () = cancel_token.cancelled() => {
                            tracing::debug!(conv_id = %conv_id, "Completion abandoned");
                        }

                        result = llm.complete(&request) => {
                            let event = match result {
                                Ok(response) => Event::CompletionReply { text: response.text },
                                Err(error) => Event::CompletionFailed { error },
                            };
                            let _ = event_tx.send(event).await;
                        }
                    }
                });
            }

            Effect::ScheduleConclusion { delay } => {
                let cancel_token = self.shutdown.child_token();
                let event_tx = self.event_tx.clone();
                let conv_id = self.context.conversation_id.clone();

                tokio::spawn(async move {
                    tokio::select! {
                        biased;

                        () = cancel_token.cancelled() => {
                            tracing::debug!(conv_id = %conv_id, "Deferred verdict cancelled");
                        }

                        () = tokio::time::sleep(delay) => {
                            let _ = event_tx.send(Event::ConclusionDue).await;
                        }
                    }
                });
            }

            Effect::Notify { message } => {
                tracing::debug!(conv_id = %self.context.conversation_id, notice = %message, "Notifying trainee");
                let _ = self.broadcast_tx.send(EngineEvent::Notice { message });
            }
        }
    }
}
