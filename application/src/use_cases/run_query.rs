//! Run Query use case.
//!
//! Drives one query through the stage machine:
//!
//! ```text
//! Classifying → Dispatching → Responding → Evaluating ─┬─ Accept ──────────→ Terminating
//!                                 ↑                    └─ Reject ─┬─ attempts left → Retrying
//!                                 └──────── Retrying ←───────────┘└─ exhausted ────→ Terminating
//! ```
//!
//! Every outbound stage call is bounded by its timeout and raced against the
//! optional cancellation token. Classification and responder failures end
//! the run with an error. Evaluation failures count as a rejection.

use crate::config::RunParams;
use crate::ports::progress::{NoRunProgress, RunProgressNotifier};
use crate::use_cases::classify::{ClassificationError, ClassifyUseCase};
use crate::use_cases::evaluate::{EvaluateUseCase, EvaluationError};
use crate::use_cases::respond::{Answer, ResponderError, ResponderErrorKind, ResponderRegistry};
use crate::use_cases::shared::{StageWait, await_stage, is_cancelled};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};
use triage_domain::util::preview;
use triage_domain::{Classification, DomainError, Query, RunOutcome, RunStage, RunState, Verdict};

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);

/// Errors that end a run without an outcome
#[derive(Error, Debug)]
pub enum RunQueryError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Classification failed: {0}")]
    Classification(#[from] ClassificationError),

    #[error("Responder failed: {0}")]
    Responder(#[from] ResponderError),

    #[error("Run terminated without a judged draft")]
    NoDraft,

    #[error("Operation cancelled")]
    Cancelled,
}

impl RunQueryError {
    /// Caller-side mistakes (as opposed to failures while serving).
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RunQueryError::InvalidQuery(_))
    }

    /// Message safe to show to an end user.
    ///
    /// Only input validation is echoed; internal failures stay generic.
    pub fn user_message(&self) -> String {
        match self {
            RunQueryError::InvalidQuery(msg) => msg.clone(),
            RunQueryError::Cancelled => "Request cancelled".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

/// Input for the [`RunQueryUseCase`].
#[derive(Debug, Clone, Default)]
pub struct RunQueryInput {
    pub query: String,
    pub cancellation: Option<CancellationToken>,
}

impl RunQueryInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            cancellation: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Use case for answering one query end to end.
#[derive(Clone)]
pub struct RunQueryUseCase {
    classifier: ClassifyUseCase,
    responders: ResponderRegistry,
    evaluator: EvaluateUseCase,
    params: RunParams,
}

impl RunQueryUseCase {
    pub fn new(
        classifier: ClassifyUseCase,
        responders: ResponderRegistry,
        evaluator: EvaluateUseCase,
    ) -> Self {
        Self {
            classifier,
            responders,
            evaluator,
            params: RunParams::default(),
        }
    }

    pub fn with_params(mut self, params: RunParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &RunParams {
        &self.params
    }

    /// Execute without progress reporting.
    pub async fn execute(&self, input: RunQueryInput) -> Result<RunOutcome, RunQueryError> {
        self.execute_with_progress(input, &NoRunProgress).await
    }

    /// Execute with progress callbacks.
    pub async fn execute_with_progress(
        &self,
        input: RunQueryInput,
        progress: &dyn RunProgressNotifier,
    ) -> Result<RunOutcome, RunQueryError> {
        let run_id = NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed);
        let span = info_span!("run", id = run_id);
        self.run(input, progress).instrument(span).await
    }

    async fn run(
        &self,
        input: RunQueryInput,
        progress: &dyn RunProgressNotifier,
    ) -> Result<RunOutcome, RunQueryError> {
        let query = Query::try_new(input.query).map_err(|e| match e {
            DomainError::InvalidQuery(msg) => RunQueryError::InvalidQuery(msg),
            DomainError::Cancelled => RunQueryError::Cancelled,
        })?;
        let cancellation = input.cancellation;

        info!("Starting run: {}", preview(query.content(), 100));

        let mut state = RunState::new(query);
        let mut stage = RunStage::Classifying;

        loop {
            if is_cancelled(&cancellation) {
                info!("Run cancelled during {}", stage);
                return Err(RunQueryError::Cancelled);
            }
            progress.on_stage(stage, state.attempt_count());
            debug!(stage = stage.as_str(), attempt = state.attempt_count(), "Entering stage");

            stage = match stage {
                RunStage::Classifying => {
                    let classification = self.classify(&state, &cancellation).await?;
                    progress.on_classified(classification.domain, classification.is_fallback());
                    state = state.with_responder(classification.domain);
                    RunStage::Dispatching
                }
                RunStage::Dispatching => {
                    let responder = self.responders.resolve(state.active_responder());
                    info!("Dispatching to {}", responder.domain());
                    RunStage::Responding
                }
                RunStage::Retrying => {
                    info!(
                        "Draft rejected, retrying ({}/{})",
                        state.attempt_count() + 1,
                        self.params.max_attempts()
                    );
                    RunStage::Responding
                }
                RunStage::Responding => {
                    let answer = self.respond(&state, progress, &cancellation).await?;
                    if !answer.tools_used.is_empty() {
                        debug!("Tools used: {}", answer.tools_used.join(", "));
                    }
                    state = state.with_draft(answer.text);
                    if let Some(domain) = state.active_responder() {
                        progress.on_draft(domain, state.attempt_count(), state.draft_text().len());
                    }
                    RunStage::Evaluating
                }
                RunStage::Evaluating => {
                    let verdict = self.evaluate(&state, progress, &cancellation).await?;
                    progress.on_verdict(verdict, state.attempt_count());
                    let (next_state, next) = state.with_verdict(verdict, self.params.max_retries);
                    state = next_state;
                    next
                }
                RunStage::Terminating => {
                    let outcome = state.outcome().ok_or(RunQueryError::NoDraft)?;
                    info!(
                        "Run finished: {} accepted={} attempts={}",
                        outcome.domain, outcome.accepted, outcome.attempts
                    );
                    progress.on_finished(&outcome);
                    return Ok(outcome);
                }
            };
        }
    }

    async fn classify(
        &self,
        state: &RunState,
        cancellation: &Option<CancellationToken>,
    ) -> Result<Classification, RunQueryError> {
        let limit = self.params.timeouts.classify;
        match await_stage(self.classifier.execute(state.query()), limit, cancellation).await {
            StageWait::Completed(result) => Ok(result?),
            StageWait::TimedOut => Err(ClassificationError::Timeout(limit).into()),
            StageWait::Cancelled => Err(RunQueryError::Cancelled),
        }
    }

    async fn respond(
        &self,
        state: &RunState,
        progress: &dyn RunProgressNotifier,
        cancellation: &Option<CancellationToken>,
    ) -> Result<Answer, RunQueryError> {
        let responder = self.responders.resolve(state.active_responder());
        let limit = self.params.timeouts.respond;
        let call = responder.respond(state.query().content(), progress);
        match await_stage(call, limit, cancellation).await {
            StageWait::Completed(result) => Ok(result?),
            StageWait::TimedOut => Err(ResponderError::new(
                responder.domain(),
                ResponderErrorKind::Timeout(limit),
            )
            .into()),
            StageWait::Cancelled => Err(RunQueryError::Cancelled),
        }
    }

    /// Judge the current draft. Evaluator failures are logged and count as
    /// a rejection.
    async fn evaluate(
        &self,
        state: &RunState,
        progress: &dyn RunProgressNotifier,
        cancellation: &Option<CancellationToken>,
    ) -> Result<Verdict, RunQueryError> {
        let limit = self.params.timeouts.evaluate;
        let call = self.evaluator.execute(state.query(), state.draft_text());
        let error = match await_stage(call, limit, cancellation).await {
            StageWait::Completed(Ok(verdict)) => return Ok(verdict),
            StageWait::Completed(Err(e)) => e,
            StageWait::TimedOut => EvaluationError::Timeout(limit),
            StageWait::Cancelled => return Err(RunQueryError::Cancelled),
        };
        warn!("Evaluation failed, treating draft as rejected: {}", error);
        progress.on_evaluation_failed(&error.to_string());
        Ok(Verdict::Reject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StageTimeouts;
    use crate::ports::llm_gateway::GatewayError;
    use crate::use_cases::respond::{GeneralResponder, Responder, ToolAugmentedResponder};
    use crate::use_cases::testing::{MockInvoker, ScriptedGateway};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use triage_domain::{Domain, ToolDefinition, ToolSpec};

    // ==================== Test Mocks ====================

    /// Responder returning scripted results and counting calls.
    struct ScriptedResponder {
        domain: Domain,
        results: Mutex<Vec<Result<String, GatewayError>>>,
        calls: Mutex<u32>,
    }

    impl ScriptedResponder {
        fn new(domain: Domain, drafts: &[&str]) -> Self {
            Self {
                domain,
                results: Mutex::new(drafts.iter().rev().map(|d| Ok(d.to_string())).collect()),
                calls: Mutex::new(0),
            }
        }

        fn failing(domain: Domain) -> Self {
            Self {
                domain,
                results: Mutex::new(vec![Err(GatewayError::RequestFailed("500".to_string()))]),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl Responder for ScriptedResponder {
        fn domain(&self) -> Domain {
            self.domain
        }

        async fn respond(
            &self,
            _query: &str,
            _progress: &dyn RunProgressNotifier,
        ) -> Result<Answer, ResponderError> {
            *self.calls.lock().unwrap() += 1;
            let next = self
                .results
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok("fallback draft".to_string()));
            next.map(Answer::new)
                .map_err(|e| ResponderError::new(self.domain, e))
        }
    }

    /// Records stage transitions.
    #[derive(Default)]
    struct StageRecorder {
        stages: Mutex<Vec<RunStage>>,
        evaluation_failures: Mutex<u32>,
    }

    impl RunProgressNotifier for StageRecorder {
        fn on_stage(&self, stage: RunStage, _attempt: u32) {
            self.stages.lock().unwrap().push(stage);
        }

        fn on_evaluation_failed(&self, _error: &str) {
            *self.evaluation_failures.lock().unwrap() += 1;
        }
    }

    struct Harness {
        classifier: Arc<ScriptedGateway>,
        evaluator: Arc<ScriptedGateway>,
        it: Arc<ScriptedResponder>,
        general: Arc<ScriptedResponder>,
    }

    impl Harness {
        fn new(
            classifier: ScriptedGateway,
            evaluator: ScriptedGateway,
            it: ScriptedResponder,
            general: ScriptedResponder,
        ) -> Self {
            Self {
                classifier: Arc::new(classifier),
                evaluator: Arc::new(evaluator),
                it: Arc::new(it),
                general: Arc::new(general),
            }
        }

        fn use_case(&self) -> RunQueryUseCase {
            let registry =
                ResponderRegistry::new(self.general.clone()).with_responder(self.it.clone());
            RunQueryUseCase::new(
                ClassifyUseCase::new(self.classifier.clone()),
                registry,
                EvaluateUseCase::new(self.evaluator.clone()),
            )
        }
    }

    // ==================== Scenarios ====================

    #[tokio::test]
    async fn test_vpn_query_accepted_first_attempt() {
        let h = Harness::new(
            ScriptedGateway::replying(&["IT"]),
            ScriptedGateway::replying(&["YES"]),
            ScriptedResponder::new(Domain::It, &["Reset it at the VPN portal."]),
            ScriptedResponder::new(Domain::General, &[]),
        );
        let recorder = StageRecorder::default();

        let outcome = h
            .use_case()
            .execute_with_progress(RunQueryInput::new("How do I reset my VPN password?"), &recorder)
            .await
            .unwrap();

        assert_eq!(outcome.domain, Domain::It);
        assert_eq!(outcome.text, "Reset it at the VPN portal.");
        assert!(outcome.accepted);
        assert_eq!(outcome.attempts, 1);
        assert_eq!(h.general.calls(), 0);
        assert_eq!(
            *recorder.stages.lock().unwrap(),
            vec![
                RunStage::Classifying,
                RunStage::Dispatching,
                RunStage::Responding,
                RunStage::Evaluating,
                RunStage::Terminating,
            ]
        );
    }

    #[tokio::test]
    async fn test_blank_query_makes_no_model_call() {
        let h = Harness::new(
            ScriptedGateway::replying(&["IT"]),
            ScriptedGateway::replying(&["YES"]),
            ScriptedResponder::new(Domain::It, &["x"]),
            ScriptedResponder::new(Domain::General, &["x"]),
        );

        let err = h.use_case().execute(RunQueryInput::new("   ")).await.unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(h.classifier.calls(), 0);
        assert_eq!(h.evaluator.calls(), 0);
        assert_eq!(h.it.calls() + h.general.calls(), 0);
    }

    #[tokio::test]
    async fn test_unrecognized_label_routes_to_general() {
        let h = Harness::new(
            ScriptedGateway::replying(&["Unknown category"]),
            ScriptedGateway::replying(&["YES"]),
            ScriptedResponder::new(Domain::It, &[]),
            ScriptedResponder::new(Domain::General, &["Hi!"]),
        );

        let outcome = h.use_case().execute(RunQueryInput::new("hello")).await.unwrap();

        assert_eq!(outcome.domain, Domain::General);
        assert_eq!(outcome.text, "Hi!");
        assert_eq!(h.it.calls(), 0);
    }

    #[tokio::test]
    async fn test_retry_until_accept() {
        let h = Harness::new(
            ScriptedGateway::replying(&["IT"]),
            ScriptedGateway::replying(&["NO", "YES"]),
            ScriptedResponder::new(Domain::It, &["first", "second"]),
            ScriptedResponder::new(Domain::General, &[]),
        );

        let outcome = h.use_case().execute(RunQueryInput::new("printer")).await.unwrap();

        assert!(outcome.accepted);
        assert_eq!(outcome.text, "second");
        assert_eq!(outcome.attempts, 2);
        assert_eq!(h.it.calls(), 2);
        // Classification happens once per run.
        assert_eq!(h.classifier.calls(), 1);
    }

    #[tokio::test]
    async fn test_reject_all_returns_last_draft() {
        let h = Harness::new(
            ScriptedGateway::replying(&["IT"]),
            ScriptedGateway::replying(&["NO", "NO", "NO", "NO"]),
            ScriptedResponder::new(Domain::It, &["d1", "d2", "d3", "d4"]),
            ScriptedResponder::new(Domain::General, &[]),
        );

        let outcome = h
            .use_case()
            .with_params(RunParams::default().with_max_retries(3))
            .execute(RunQueryInput::new("printer"))
            .await
            .unwrap();

        assert!(!outcome.accepted);
        assert_eq!(outcome.text, "d3");
        assert_eq!(outcome.attempts, 3);
        assert_eq!(h.it.calls(), 3);
        assert_eq!(h.evaluator.calls(), 3);
    }

    #[tokio::test]
    async fn test_zero_retries_still_runs_once() {
        let h = Harness::new(
            ScriptedGateway::replying(&["IT"]),
            ScriptedGateway::replying(&["NO"]),
            ScriptedResponder::new(Domain::It, &["only"]),
            ScriptedResponder::new(Domain::General, &[]),
        );

        let outcome = h
            .use_case()
            .with_params(RunParams::default().with_max_retries(0))
            .execute(RunQueryInput::new("printer"))
            .await
            .unwrap();

        assert_eq!(outcome.attempts, 1);
        assert!(!outcome.accepted);
    }

    #[tokio::test]
    async fn test_responder_error_is_not_retried() {
        let h = Harness::new(
            ScriptedGateway::replying(&["IT"]),
            ScriptedGateway::replying(&["YES"]),
            ScriptedResponder::failing(Domain::It),
            ScriptedResponder::new(Domain::General, &[]),
        );

        let err = h.use_case().execute(RunQueryInput::new("printer")).await.unwrap_err();

        assert!(matches!(err, RunQueryError::Responder(_)));
        assert_eq!(err.user_message(), "Internal server error");
        assert_eq!(h.it.calls(), 1);
        assert_eq!(h.evaluator.calls(), 0);
    }

    #[tokio::test]
    async fn test_classification_error_ends_run() {
        let h = Harness::new(
            ScriptedGateway::new(vec![Err(GatewayError::ConnectionError(
                "refused".to_string(),
            ))]),
            ScriptedGateway::replying(&["YES"]),
            ScriptedResponder::new(Domain::It, &[]),
            ScriptedResponder::new(Domain::General, &[]),
        );

        let err = h.use_case().execute(RunQueryInput::new("vpn")).await.unwrap_err();

        assert!(matches!(err, RunQueryError::Classification(_)));
        assert_eq!(h.it.calls() + h.general.calls(), 0);
    }

    #[tokio::test]
    async fn test_evaluation_error_counts_as_reject() {
        let h = Harness::new(
            ScriptedGateway::replying(&["IT"]),
            ScriptedGateway::new(vec![
                Err(GatewayError::RequestFailed("503".to_string())),
                Ok("YES".to_string()),
            ]),
            ScriptedResponder::new(Domain::It, &["first", "second"]),
            ScriptedResponder::new(Domain::General, &[]),
        );
        let recorder = StageRecorder::default();

        let outcome = h
            .use_case()
            .execute_with_progress(RunQueryInput::new("vpn"), &recorder)
            .await
            .unwrap();

        assert!(outcome.accepted);
        assert_eq!(outcome.attempts, 2);
        assert_eq!(*recorder.evaluation_failures.lock().unwrap(), 1);
        assert!(recorder.stages.lock().unwrap().contains(&RunStage::Retrying));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let h = Harness::new(
            ScriptedGateway::replying(&["IT"]),
            ScriptedGateway::replying(&["YES"]),
            ScriptedResponder::new(Domain::It, &["x"]),
            ScriptedResponder::new(Domain::General, &[]),
        );
        let token = CancellationToken::new();
        token.cancel();

        let err = h
            .use_case()
            .execute(RunQueryInput::new("vpn").with_cancellation(token))
            .await
            .unwrap_err();

        assert!(matches!(err, RunQueryError::Cancelled));
        assert_eq!(h.classifier.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_classifier_timeout() {
        let h = Harness::new(
            ScriptedGateway::replying(&["IT"]).with_delay(Duration::from_secs(120)),
            ScriptedGateway::replying(&["YES"]),
            ScriptedResponder::new(Domain::It, &["x"]),
            ScriptedResponder::new(Domain::General, &[]),
        );
        let timeouts = StageTimeouts {
            classify: Duration::from_secs(5),
            ..StageTimeouts::default()
        };

        let err = h
            .use_case()
            .with_params(RunParams::default().with_timeouts(timeouts))
            .execute(RunQueryInput::new("vpn"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RunQueryError::Classification(ClassificationError::Timeout(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_evaluator_timeout_counts_as_reject() {
        let h = Harness::new(
            ScriptedGateway::replying(&["IT"]),
            ScriptedGateway::replying(&["YES"]).with_delay(Duration::from_secs(120)),
            ScriptedResponder::new(Domain::It, &["only"]),
            ScriptedResponder::new(Domain::General, &[]),
        );

        let outcome = h
            .use_case()
            .with_params(RunParams::default().with_max_retries(1))
            .execute(RunQueryInput::new("vpn"))
            .await
            .unwrap();

        assert!(!outcome.accepted);
        assert_eq!(outcome.text, "only");
    }

    #[tokio::test]
    async fn test_end_to_end_with_tool_responder() {
        let classifier = Arc::new(ScriptedGateway::replying(&["IT"]));
        let responder_gateway = Arc::new(ScriptedGateway::replying(&[
            "```tool\n{\"tool\": \"read_it_docs\", \"input\": \"vpn\"}\n```",
            "Open the VPN portal and choose Reset.",
        ]));
        let evaluator = Arc::new(ScriptedGateway::replying(&["YES"]));
        let invoker = Arc::new(
            MockInvoker::new(
                ToolSpec::new()
                    .register(ToolDefinition::document_retrieval(Domain::It))
                    .register(ToolDefinition::web_search(Domain::It)),
            )
            .with_result("read_it_docs", Ok("[vpn.md] Choose Reset".to_string())),
        );

        let registry = ResponderRegistry::new(Arc::new(GeneralResponder::new(
            responder_gateway.clone(),
        )))
        .with_responder(Arc::new(ToolAugmentedResponder::new(
            Domain::It,
            responder_gateway.clone(),
            invoker.clone(),
        )));
        let use_case = RunQueryUseCase::new(
            ClassifyUseCase::new(classifier),
            registry,
            EvaluateUseCase::new(evaluator),
        );

        let outcome = use_case
            .execute(RunQueryInput::new("How do I reset my VPN password?"))
            .await
            .unwrap();

        assert_eq!(outcome.domain, Domain::It);
        assert!(outcome.accepted);
        assert_eq!(outcome.text, "Open the VPN portal and choose Reset.");
        assert_eq!(invoker.calls().len(), 1);
    }
}
