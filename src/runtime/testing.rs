//! Mock implementations for testing
//!
//! These mocks enable integration testing without real I/O.

use super::{ConversationHandle, ConversationSnapshot, EngineEvent};
use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use crate::persona::{Difficulty, Product};
use crate::state_machine::ConvContext;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, watch, Notify};

// ============================================================================
// Mock LLM Client
// ============================================================================

/// Mock completion client that returns queued responses
pub struct MockLlmClient {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    model_id: String,
    /// Record of all requests made
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmClient {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, text: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(LlmResponse::text(text)));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self) -> Result<LlmResponse, LlmError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::unavailable("No mock response queued")))
    }
}

#[async_trait]
impl LlmService for MockLlmClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.next_response()
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// ============================================================================
// Delayed Mock LLM Client (for in-flight and teardown testing)
// ============================================================================

/// Mock completion client with configurable delay
pub struct DelayedMockLlmClient {
    inner: MockLlmClient,
    delay: Duration,
    /// Notified when a request starts (for test synchronization)
    pub request_started: Arc<Notify>,
}

impl DelayedMockLlmClient {
    pub fn new(model_id: impl Into<String>, delay: Duration) -> Self {
        Self {
            inner: MockLlmClient::new(model_id),
            delay,
            request_started: Arc::new(Notify::new()),
        }
    }

    pub fn queue_reply(&self, text: &str) {
        self.inner.queue_reply(text);
    }

    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.inner.recorded_requests()
    }
}

#[async_trait]
impl LlmService for DelayedMockLlmClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.inner.requests.lock().unwrap().push(request.clone());
        self.request_started.notify_one();
        tokio::time::sleep(self.delay).await;
        self.inner.next_response()
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }
}

// ============================================================================
// Test Conversation
// ============================================================================

/// Helper for spawning test conversations with minimal boilerplate
pub struct TestConversation<L: LlmService + 'static> {
    pub handle: ConversationHandle,
    pub llm: Arc<L>,
    pub events: broadcast::Receiver<EngineEvent>,
    pub snapshots: watch::Receiver<ConversationSnapshot>,
}

impl TestConversation<MockLlmClient> {
    /// Create a test conversation with an instant mock
    pub fn builder() -> TestConversationBuilder {
        TestConversationBuilder::new()
    }
}

pub struct TestConversationBuilder {
    conv_id: String,
    difficulty: Difficulty,
    product: Product,
    conclusion_delay: Duration,
}

impl TestConversationBuilder {
    pub fn new() -> Self {
        Self {
            conv_id: "test-conv".to_string(),
            difficulty: Difficulty::Medium,
            product: Product::CheckingAccount,
            conclusion_delay: Duration::from_millis(20),
        }
    }

    pub fn persona(mut self, difficulty: Difficulty, product: Product) -> Self {
        self.difficulty = difficulty;
        self.product = product;
        self
    }

    pub fn conclusion_delay(mut self, delay: Duration) -> Self {
        self.conclusion_delay = delay;
        self
    }

    pub fn build(self) -> TestConversation<MockLlmClient> {
        self.build_with(MockLlmClient::new("test-model"))
    }

    pub fn build_with<L: LlmService + 'static>(self, llm: L) -> TestConversation<L> {
        let llm = Arc::new(llm);
        let context = ConvContext::new(self.conv_id, self.difficulty, self.product)
            .with_conclusion_delay(self.conclusion_delay);

        let handle = ConversationHandle::spawn(context, llm.clone());
        let (_, events) = handle.subscribe();
        let snapshots = handle.watch();

        TestConversation {
            handle,
            llm,
            events,
            snapshots,
        }
    }
}

impl Default for TestConversationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LlmService + 'static> TestConversation<L> {
    pub async fn send(&self, text: &str) {
        assert!(
            self.handle.submit_user_turn(text).await,
            "runtime stopped unexpectedly"
        );
    }

    /// Wait until the latest snapshot satisfies `pred`
    pub async fn wait_for(
        &mut self,
        timeout: Duration,
        pred: impl Fn(&ConversationSnapshot) -> bool,
    ) -> Option<ConversationSnapshot> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            {
                let snapshot = self.snapshots.borrow_and_update();
                if pred(&snapshot) {
                    return Some(snapshot.clone());
                }
            }
            match tokio::time::timeout_at(deadline, self.snapshots.changed()).await {
                Ok(Ok(())) => continue,
                _ => return None,
            }
        }
    }

    /// Wait for the next notice event with timeout
    pub async fn wait_for_notice(&mut self, timeout: Duration) -> Option<String> {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            match tokio::time::timeout(Duration::from_millis(50), self.events.recv()).await {
                Ok(Ok(EngineEvent::Notice { message })) => return Some(message),
                _ => continue,
            }
        }
        None
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MessageRole;
    use crate::persona;
    use crate::runtime::ConversationManager;
    use crate::state_machine::{Outcome, Phase, Turn, SEND_FAILED_NOTICE};

    const WAIT: Duration = Duration::from_secs(2);

    #[tokio::test]
    async fn test_mock_llm_client() {
        let mock = MockLlmClient::new("test-model");
        mock.queue_reply("Olá");

        let request = LlmRequest {
            system: "sys".to_string(),
            messages: vec![],
            max_tokens: None,
        };
        let response = mock.complete(&request).await.unwrap();
        assert_eq!(response.text, "Olá");
        assert_eq!(mock.recorded_requests().len(), 1);

        // Exhausted queue behaves like a network failure
        assert!(mock.complete(&request).await.is_err());
    }

    #[tokio::test]
    async fn test_conversation_starts_with_greeting() {
        let conv = TestConversation::builder()
            .persona(Difficulty::Hard, Product::Insurance)
            .build();

        let snapshot = conv.handle.snapshot();
        assert_eq!(snapshot.phase, Phase::Active);
        assert_eq!(snapshot.outcome, None);
        assert!(!snapshot.awaiting_reply);
        assert_eq!(
            snapshot.turns,
            vec![Turn::customer(persona::greeting(Difficulty::Hard, Product::Insurance))]
        );
    }

    #[tokio::test]
    async fn test_plain_reply_extends_log() {
        let mut conv = TestConversation::builder()
            .persona(Difficulty::Hard, Product::Insurance)
            .build();
        conv.llm.queue_reply("E quanto tempo leva para pagar um sinistro?");

        conv.send("Oferecemos cobertura total.").await;

        let snapshot = conv
            .wait_for(WAIT, |s| s.turns.len() == 3 && !s.awaiting_reply)
            .await
            .expect("reply should arrive");
        assert_eq!(snapshot.phase, Phase::Active);
        assert_eq!(
            snapshot.turns[1],
            Turn::salesperson("Oferecemos cobertura total.")
        );
        assert_eq!(
            snapshot.turns[2],
            Turn::customer("E quanto tempo leva para pagar um sinistro?")
        );

        // History goes out after the instructions, customer as assistant
        let requests = conv.llm.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].system.contains("SEGUROS"));
        let roles: Vec<_> = requests[0].messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![MessageRole::Assistant, MessageRole::User]);
    }

    #[tokio::test]
    async fn test_sold_marker_concludes_after_delay() {
        let mut conv = TestConversation::builder()
            .conclusion_delay(Duration::from_millis(200))
            .build();
        conv.llm.queue_reply("Fechado, pode abrir a conta! [VENDA_FECHADA]");

        conv.send("Posso abrir agora mesmo, sem tarifa no primeiro ano.").await;

        let concluding = conv
            .wait_for(WAIT, |s| s.phase == Phase::Concluding)
            .await
            .expect("marker should start the conclusion");
        assert_eq!(concluding.outcome, None);
        assert_eq!(
            concluding.turns.last(),
            Some(&Turn::customer("Fechado, pode abrir a conta!"))
        );

        let concluded = conv
            .wait_for(WAIT, |s| s.phase == Phase::Concluded)
            .await
            .expect("verdict should follow");
        assert_eq!(concluded.outcome, Some(Outcome::Sold));
        assert_eq!(concluded.turns.len(), 4);
        assert_eq!(concluded.turns.last(), Some(&Turn::verdict(Outcome::Sold)));
    }

    #[tokio::test]
    async fn test_marker_only_reply_goes_straight_to_verdict() {
        let mut conv = TestConversation::builder().build();
        conv.llm.queue_reply("[VENDA_PERDIDA]");

        conv.send("É pegar ou largar.").await;

        let snapshot = conv
            .wait_for(WAIT, |s| s.phase == Phase::Concluded)
            .await
            .expect("conversation should conclude");
        assert_eq!(snapshot.outcome, Some(Outcome::Lost));
        assert_eq!(snapshot.turns.len(), 3);
        assert_eq!(snapshot.turns[1], Turn::salesperson("É pegar ou largar."));
        assert_eq!(snapshot.turns[2], Turn::verdict(Outcome::Lost));
    }

    #[tokio::test]
    async fn test_submissions_after_conclusion_are_ignored() {
        let mut conv = TestConversation::builder().build();
        conv.llm.queue_reply("Tudo certo. [VENDA_FECHADA]");

        conv.send("Vamos fechar?").await;
        conv.wait_for(WAIT, |s| s.phase == Phase::Concluded)
            .await
            .expect("conversation should conclude");

        conv.send("Mais uma coisa...").await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(conv.handle.snapshot().turns.len(), 4);
        assert_eq!(conv.llm.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_keeps_salesperson_turn() {
        let mut conv = TestConversation::builder().build();
        conv.llm.queue_error(LlmError::from_status(502, "bad gateway"));

        conv.send("Temos a menor tarifa do mercado.").await;

        let notice = conv.wait_for_notice(WAIT).await.expect("notice expected");
        assert_eq!(notice, SEND_FAILED_NOTICE);

        let snapshot = conv
            .wait_for(WAIT, |s| !s.awaiting_reply && s.turns.len() == 2)
            .await
            .expect("submission should be re-enabled");
        assert_eq!(snapshot.phase, Phase::Active);
        assert_eq!(
            snapshot.turns.last(),
            Some(&Turn::salesperson("Temos a menor tarifa do mercado."))
        );

        // Retrying works once the upstream recovers
        conv.llm.queue_reply("Menor do que a do meu banco atual?");
        conv.send("Temos a menor tarifa do mercado.").await;
        let snapshot = conv
            .wait_for(WAIT, |s| s.turns.len() == 4 && !s.awaiting_reply)
            .await
            .expect("retry should succeed");
        assert_eq!(
            snapshot.turns.last(),
            Some(&Turn::customer("Menor do que a do meu banco atual?"))
        );
    }

    #[tokio::test]
    async fn test_second_submit_while_awaiting_is_dropped() {
        let llm = DelayedMockLlmClient::new("test-model", Duration::from_millis(100));
        llm.queue_reply("Calma, uma pergunta de cada vez.");
        let mut conv = TestConversation::builder().build_with(llm);

        conv.send("Primeira pergunta").await;
        conv.send("Segunda pergunta").await;

        let snapshot = conv
            .wait_for(WAIT, |s| s.turns.len() == 3 && !s.awaiting_reply)
            .await
            .expect("reply should arrive");
        assert_eq!(snapshot.turns[1], Turn::salesperson("Primeira pergunta"));
        assert_eq!(snapshot.turns[2], Turn::customer("Calma, uma pergunta de cada vez."));
        assert_eq!(conv.llm.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_submit_is_ignored() {
        let mut conv = TestConversation::builder().build();
        conv.llm.queue_reply("Oi, tudo bem?");

        conv.send("   ").await;
        conv.send("Olá!").await;

        let snapshot = conv
            .wait_for(WAIT, |s| s.turns.len() == 3 && !s.awaiting_reply)
            .await
            .expect("reply should arrive");
        assert_eq!(snapshot.turns[1], Turn::salesperson("Olá!"));
        assert_eq!(conv.llm.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_teardown_cancels_pending_verdict() {
        let mut conv = TestConversation::builder()
            .conclusion_delay(Duration::from_millis(150))
            .build();
        conv.llm.queue_reply("Desisto. [VENDA_PERDIDA]");

        conv.send("Então é isso.").await;
        conv.wait_for(WAIT, |s| s.phase == Phase::Concluding)
            .await
            .expect("marker should start the conclusion");

        let TestConversation { handle, snapshots, .. } = conv;
        drop(handle);
        tokio::time::sleep(Duration::from_millis(300)).await;

        let last = snapshots.borrow().clone();
        assert_eq!(last.phase, Phase::Concluding);
        assert!(!last.turns.iter().any(|t| matches!(t, Turn::Verdict { .. })));
    }

    #[tokio::test]
    async fn test_teardown_abandons_inflight_completion() {
        let llm = DelayedMockLlmClient::new("test-model", Duration::from_secs(5));
        llm.queue_reply("Resposta que nunca deve chegar");
        let request_started = llm.request_started.clone();
        let conv = TestConversation::builder().build_with(llm);

        conv.send("Alô?").await;
        tokio::time::timeout(WAIT, request_started.notified())
            .await
            .expect("request should start");

        let TestConversation { handle, snapshots, .. } = conv;
        drop(handle);
        tokio::time::sleep(Duration::from_millis(100)).await;

        let last = snapshots.borrow().clone();
        assert!(last.awaiting_reply);
        assert_eq!(last.turns.len(), 2);
    }

    // ------------------------------------------------------------------------
    // Manager
    // ------------------------------------------------------------------------

    fn test_manager(llm: Arc<MockLlmClient>) -> ConversationManager {
        ConversationManager::new(llm, Duration::from_millis(10), Duration::from_secs(60))
    }

    fn quickly_idle_manager() -> ConversationManager {
        let llm = Arc::new(MockLlmClient::new("test-model"));
        ConversationManager::new(llm, Duration::from_millis(10), Duration::from_millis(30))
    }

    #[tokio::test]
    async fn test_manager_start_and_lookup() {
        let manager = test_manager(Arc::new(MockLlmClient::new("test-model")));

        let a = manager.start(Difficulty::Easy, Product::Loan).await;
        let b = manager.start(Difficulty::Hard, Product::Loan).await;
        assert_ne!(a.id, b.id);
        assert!(uuid::Uuid::parse_str(&a.id).is_ok());
        assert_eq!(a.turns.len(), 1);
        assert_ne!(a.turns[0], b.turns[0]);

        let fetched = manager.snapshot(&a.id).await;
        assert_eq!(fetched, Some(a));
        assert!(manager.snapshot("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_manager_submit_and_subscribe() {
        let llm = Arc::new(MockLlmClient::new("test-model"));
        llm.queue_reply("Qual é a taxa de juros?");
        let manager = test_manager(llm.clone());

        let started = manager.start(Difficulty::Medium, Product::Loan).await;
        let (initial, mut rx) = manager.subscribe(&started.id).await.expect("live conversation");
        assert_eq!(initial, started);

        assert!(manager.submit_user_turn(&started.id, "Temos crédito pré-aprovado.").await);
        assert!(!manager.submit_user_turn("missing", "Oi").await);

        let mut last = None;
        while let Ok(Ok(event)) = tokio::time::timeout(WAIT, rx.recv()).await {
            if let EngineEvent::Snapshot(snapshot) = event {
                let done = snapshot.turns.len() == 3;
                last = Some(snapshot);
                if done {
                    break;
                }
            }
        }
        let last = last.expect("snapshots should be broadcast");
        assert_eq!(last.turns[2], Turn::customer("Qual é a taxa de juros?"));
        assert_eq!(llm.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_manager_go_back_is_idempotent() {
        let manager = test_manager(Arc::new(MockLlmClient::new("test-model")));
        let started = manager.start(Difficulty::Easy, Product::CreditCard).await;

        assert!(manager.go_back(&started.id).await);
        assert!(!manager.go_back(&started.id).await);
        assert!(manager.snapshot(&started.id).await.is_none());
        assert!(!manager.submit_user_turn(&started.id, "Oi").await);
    }

    #[tokio::test]
    async fn test_abandoned_conversation_is_reaped() {
        let manager = quickly_idle_manager();
        let started = manager.start(Difficulty::Easy, Product::CheckingAccount).await;

        assert_eq!(manager.reap_idle().await, 0);
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(manager.reap_idle().await, 1);
        assert!(manager.snapshot(&started.id).await.is_none());
    }

    #[tokio::test]
    async fn test_open_stream_keeps_conversation_alive() {
        let manager = quickly_idle_manager();
        let watched = manager.start(Difficulty::Hard, Product::Loan).await;
        let abandoned = manager.start(Difficulty::Hard, Product::Insurance).await;
        let (_, rx) = manager.subscribe(&watched.id).await.expect("live conversation");

        tokio::time::sleep(Duration::from_millis(60)).await;
        // Starting a new conversation sweeps the idle ones first
        let fresh = manager.start(Difficulty::Medium, Product::Loan).await;

        assert!(manager.snapshot(&abandoned.id).await.is_none());
        assert!(manager.snapshot(&watched.id).await.is_some());
        assert!(manager.snapshot(&fresh.id).await.is_some());

        // Closing the stream makes it eligible again
        drop(rx);
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(manager.reap_idle().await, 2);
    }
}
