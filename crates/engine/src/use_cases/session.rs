//! Live game session.
//!
//! Wraps a frozen [`Case`] and its [`Investigation`] state behind an async
//! lock and drives the dialogue service for interviews. The lock is held
//! across the dialogue call, so questions to any suspect are answered one
//! at a time and the transcript order always matches the order of play.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use sleuthr_domain::{
    evidence_against, has_sufficient_evidence, Accusation, Case, ClueId, GameOutcome,
    Investigation, QuestionType, RoomId, SuspectId, DEFAULT_EVIDENCE_THRESHOLD,
};
use sleuthr_domain::DomainError;

use crate::infrastructure::ports::{DialoguePort, DialogueRequest};
use crate::prompts;

/// Tunable session behavior.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Clues against the true killer before the accusation warning stops
    pub evidence_threshold: usize,
    /// Pause between the last answer and the out-of-actions loss
    pub loss_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            evidence_threshold: DEFAULT_EVIDENCE_THRESHOLD,
            loss_delay: Duration::from_millis(1500),
        }
    }
}

/// What came back from asking a question.
#[derive(Debug, Clone)]
pub enum AskOutcome {
    /// The suspect's reply, already recorded in the transcript
    Reply(String),
    /// The budget was already spent; the game ended instead
    GameOver(GameOutcome),
}

/// State shared with the deferred-loss task.
struct SessionInner {
    case: Arc<Case>,
    state: Mutex<Investigation>,
}

/// One running game.
pub struct GameSession {
    inner: Arc<SessionInner>,
    dialogue: Arc<dyn DialoguePort>,
    config: SessionConfig,
    pending_loss: Mutex<Option<JoinHandle<()>>>,
}

impl GameSession {
    pub fn new(case: Arc<Case>, dialogue: Arc<dyn DialoguePort>, config: SessionConfig) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                case,
                state: Mutex::new(Investigation::new()),
            }),
            dialogue,
            config,
            pending_loss: Mutex::new(None),
        }
    }

    pub fn case(&self) -> &Arc<Case> {
        &self.inner.case
    }

    /// A point-in-time copy of the investigation state for presentation.
    pub async fn snapshot(&self) -> Investigation {
        self.inner.state.lock().await.clone()
    }

    pub async fn begin(&self) -> Result<(), DomainError> {
        let mut state = self.inner.state.lock().await;
        state.begin(&self.inner.case)?;
        tracing::info!(
            case = %self.inner.case.id,
            actions = self.inner.case.max_actions,
            "Investigation started"
        );
        Ok(())
    }

    pub async fn enter_room(&self, room_id: RoomId) -> Result<(), DomainError> {
        let mut state = self.inner.state.lock().await;
        state.enter_room(&self.inner.case, room_id)
    }

    /// Returns `true` when the clue is newly discovered.
    pub async fn discover_clue(&self, clue_id: ClueId) -> Result<bool, DomainError> {
        let mut state = self.inner.state.lock().await;
        let newly = state.discover_clue(&self.inner.case, clue_id.clone())?;
        if newly {
            tracing::info!(clue = %clue_id, "Clue discovered");
        }
        Ok(newly)
    }

    pub async fn start_interview(&self, suspect_id: SuspectId) -> Result<(), DomainError> {
        let mut state = self.inner.state.lock().await;
        state.start_interview(&self.inner.case, suspect_id)
    }

    pub async fn end_interview(&self) -> Result<(), DomainError> {
        let mut state = self.inner.state.lock().await;
        state.end_interview()
    }

    /// Ask the current suspect a question.
    ///
    /// The action is charged and the question recorded before the dialogue
    /// service is consulted; a failed request substitutes a canned evasive
    /// line and the action stays spent. Asking with nothing left in the
    /// budget ends the game instead of erroring.
    pub async fn ask_question(
        &self,
        question: QuestionType,
        clue_id: Option<ClueId>,
    ) -> Result<AskOutcome, DomainError> {
        let case = &self.inner.case;
        let mut state = self.inner.state.lock().await;

        if state.current_suspect().is_some() && state.actions_remaining() == 0 {
            let outcome = state.force_out_of_actions(case)?;
            drop(state);
            self.cancel_pending_loss().await;
            return Ok(AskOutcome::GameOver(outcome));
        }

        state.record_question(case, question, clue_id.as_ref())?;
        let suspect_id = state
            .current_suspect()
            .cloned()
            .ok_or_else(|| DomainError::invalid_state_transition("no suspect selected"))?;

        let request = DialogueRequest {
            suspect_id: suspect_id.clone(),
            question,
            clue_id,
            case: Arc::clone(case),
            history: state.transcript(&suspect_id).to_vec(),
            discovered_clues: state.discovered_clues().to_vec(),
        };

        // Lock stays held here: one question in flight at a time.
        let message = match self.dialogue.reply(request).await {
            Ok(reply) => reply.message,
            Err(e) => {
                tracing::warn!(suspect = %suspect_id, error = %e, "Dialogue failed, using fallback");
                match case.suspect(&suspect_id) {
                    Some(suspect) => prompts::fallback_response(suspect),
                    None => "The suspect seems evasive and doesn't give a clear answer.".to_string(),
                }
            }
        };
        state.record_reply(message.clone())?;

        if state.actions_remaining() == 0 {
            drop(state);
            self.schedule_out_of_actions().await;
        }
        Ok(AskOutcome::Reply(message))
    }

    pub async fn open_evidence(&self) -> Result<(), DomainError> {
        self.inner.state.lock().await.open_evidence()
    }

    pub async fn close_evidence(&self) -> Result<(), DomainError> {
        self.inner.state.lock().await.close_evidence()
    }

    pub async fn open_accusation(&self) -> Result<(), DomainError> {
        self.inner.state.lock().await.open_accusation()
    }

    pub async fn close_accusation(&self) -> Result<(), DomainError> {
        self.inner.state.lock().await.close_accusation()
    }

    pub async fn make_accusation(&self, accusation: &Accusation) -> Result<GameOutcome, DomainError> {
        let outcome = {
            let mut state = self.inner.state.lock().await;
            state.make_accusation(&self.inner.case, accusation)?
        };
        self.cancel_pending_loss().await;
        tracing::info!(won = outcome.won, accused = %accusation.suspect_id, "Accusation made");
        Ok(outcome)
    }

    /// Discard the game and return to the menu.
    pub async fn reset(&self) {
        self.inner.state.lock().await.reset();
        self.cancel_pending_loss().await;
    }

    /// How many discovered clues implicate the given suspect.
    pub async fn evidence_against(&self, suspect_id: &SuspectId) -> usize {
        let state = self.inner.state.lock().await;
        evidence_against(&self.inner.case, state.discovered_clues(), suspect_id)
    }

    /// Whether the pre-accusation warning can be skipped. Advisory only.
    pub async fn has_sufficient_evidence(&self) -> bool {
        let state = self.inner.state.lock().await;
        has_sufficient_evidence(
            &self.inner.case,
            state.discovered_clues(),
            self.config.evidence_threshold,
        )
    }

    /// Arrange the out-of-actions loss after a short pause, so the player
    /// sees the final answer before the result screen. The state guard makes
    /// the trigger a no-op if the game ends another way first.
    async fn schedule_out_of_actions(&self) {
        let inner = Arc::clone(&self.inner);
        let delay = self.config.loss_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = inner.state.lock().await;
            if let Ok(outcome) = state.force_out_of_actions(&inner.case) {
                tracing::info!(won = outcome.won, "Action budget exhausted");
            }
        });

        let mut pending = self.pending_loss.lock().await;
        if let Some(old) = pending.replace(handle) {
            old.abort();
        }
    }

    async fn cancel_pending_loss(&self) {
        if let Some(handle) = self.pending_loss.lock().await.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{DialogueError, DialogueReply};
    use crate::test_fixtures::sample_scenario;
    use async_trait::async_trait;
    use sleuthr_domain::{Phase, WeaponId};

    mockall::mock! {
        Dialogue {}

        #[async_trait]
        impl DialoguePort for Dialogue {
            async fn reply(&self, request: DialogueRequest) -> Result<DialogueReply, DialogueError>;
        }
    }

    fn test_case(max_actions: u32) -> Arc<Case> {
        let mut scenario = sample_scenario();
        scenario.max_actions = max_actions;
        Arc::new(scenario.assemble(|_| 0).expect("assemble"))
    }

    fn fast_config() -> SessionConfig {
        SessionConfig {
            evidence_threshold: DEFAULT_EVIDENCE_THRESHOLD,
            loss_delay: Duration::from_millis(10),
        }
    }

    async fn in_marcus_interview(session: &Arc<GameSession>) {
        session.begin().await.expect("begin");
        session
            .enter_room(RoomId::new("library"))
            .await
            .expect("enter library");
        session
            .start_interview(SuspectId::new("marcus"))
            .await
            .expect("interview");
    }

    #[tokio::test]
    async fn test_ask_question_records_both_sides() {
        let mut mock = MockDialogue::new();
        mock.expect_reply()
            .times(1)
            .returning(|_| {
                Ok(DialogueReply {
                    message: "I was in the library all evening.".to_string(),
                })
            });
        let session = Arc::new(GameSession::new(
            test_case(5),
            Arc::new(mock),
            fast_config(),
        ));
        in_marcus_interview(&session).await;

        let result = session
            .ask_question(QuestionType::Whereabouts, None)
            .await
            .expect("ask");
        assert!(matches!(result, AskOutcome::Reply(ref msg) if msg.contains("library")));

        let state = session.snapshot().await;
        assert_eq!(state.actions_remaining(), 4);
        let transcript = state.transcript(&SuspectId::new("marcus"));
        assert_eq!(transcript.len(), 2);
        assert_eq!(state.interviewed_suspects(), &[SuspectId::new("marcus")]);
    }

    #[tokio::test]
    async fn test_dialogue_failure_falls_back_and_stays_charged() {
        let mut mock = MockDialogue::new();
        mock.expect_reply()
            .times(1)
            .returning(|_| Err(DialogueError::RequestFailed("boom".to_string())));
        let session = Arc::new(GameSession::new(
            test_case(5),
            Arc::new(mock),
            fast_config(),
        ));
        in_marcus_interview(&session).await;

        let result = session
            .ask_question(QuestionType::Whereabouts, None)
            .await
            .expect("ask");
        let AskOutcome::Reply(message) = result else {
            panic!("expected a reply");
        };
        assert_eq!(
            message,
            "Marcus Blackwood seems evasive and doesn't give a clear answer."
        );

        // The action is spent and the fallback is in the transcript.
        let state = session.snapshot().await;
        assert_eq!(state.actions_remaining(), 4);
        assert_eq!(state.transcript(&SuspectId::new("marcus")).len(), 2);
    }

    #[tokio::test]
    async fn test_last_action_schedules_deferred_loss() {
        let mut mock = MockDialogue::new();
        mock.expect_reply().times(1).returning(|_| {
            Ok(DialogueReply {
                message: "Why do you ask?".to_string(),
            })
        });
        let session = Arc::new(GameSession::new(
            test_case(1),
            Arc::new(mock),
            fast_config(),
        ));
        in_marcus_interview(&session).await;

        let result = session
            .ask_question(QuestionType::Whereabouts, None)
            .await
            .expect("ask");
        assert!(matches!(result, AskOutcome::Reply(_)));

        // The answer arrives first; the loss lands after the pause.
        let state = session.snapshot().await;
        assert_ne!(state.phase(), Phase::Result);

        tokio::time::sleep(Duration::from_millis(60)).await;
        let state = session.snapshot().await;
        assert_eq!(state.phase(), Phase::Result);
        let outcome = state.outcome().expect("outcome");
        assert!(!outcome.won);
    }

    #[tokio::test]
    async fn test_ask_with_empty_budget_ends_the_game() {
        let mut mock = MockDialogue::new();
        // Exactly one dialogue call: the second ask must not reach the service.
        mock.expect_reply().times(1).returning(|_| {
            Ok(DialogueReply {
                message: "Why do you ask?".to_string(),
            })
        });
        let session = Arc::new(GameSession::new(
            test_case(1),
            Arc::new(mock),
            SessionConfig {
                loss_delay: Duration::from_secs(60),
                ..fast_config()
            },
        ));
        in_marcus_interview(&session).await;

        session
            .ask_question(QuestionType::Whereabouts, None)
            .await
            .expect("ask");
        let result = session
            .ask_question(QuestionType::Relationship, None)
            .await
            .expect("second ask");
        let AskOutcome::GameOver(outcome) = result else {
            panic!("expected game over");
        };
        assert!(!outcome.won);
        assert_eq!(session.snapshot().await.phase(), Phase::Result);
    }

    #[tokio::test]
    async fn test_reset_cancels_pending_loss() {
        let mut mock = MockDialogue::new();
        mock.expect_reply().times(1).returning(|_| {
            Ok(DialogueReply {
                message: "Why do you ask?".to_string(),
            })
        });
        let session = Arc::new(GameSession::new(
            test_case(1),
            Arc::new(mock),
            fast_config(),
        ));
        in_marcus_interview(&session).await;

        session
            .ask_question(QuestionType::Whereabouts, None)
            .await
            .expect("ask");
        session.reset().await;

        tokio::time::sleep(Duration::from_millis(60)).await;
        let state = session.snapshot().await;
        assert_eq!(state.phase(), Phase::Menu);
        assert!(state.outcome().is_none());
    }

    #[tokio::test]
    async fn test_accusation_ends_the_game() {
        let session = Arc::new(GameSession::new(
            test_case(5),
            Arc::new(MockDialogue::new()),
            fast_config(),
        ));
        session.begin().await.expect("begin");
        session.open_accusation().await.expect("open");

        let outcome = session
            .make_accusation(&Accusation {
                suspect_id: SuspectId::new("marcus"),
                weapon_id: WeaponId::new("carving_knife"),
                location_id: RoomId::new("study"),
            })
            .await
            .expect("accuse");
        assert!(outcome.won);
        assert_eq!(session.snapshot().await.phase(), Phase::Result);
    }

    #[tokio::test]
    async fn test_evidence_advisory() {
        let session = Arc::new(GameSession::new(
            test_case(5),
            Arc::new(MockDialogue::new()),
            fast_config(),
        ));
        session.begin().await.expect("begin");

        // Entry room is the study; threatening_note points at Marcus.
        assert!(session
            .discover_clue(ClueId::new("threatening_note"))
            .await
            .expect("discover"));
        assert_eq!(
            session.evidence_against(&SuspectId::new("marcus")).await,
            1
        );
        assert!(!session.has_sufficient_evidence().await);
    }
}
