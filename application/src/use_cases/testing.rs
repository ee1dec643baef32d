//! Scripted port doubles shared by use case tests.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::tool_invoker::ToolInvokerPort;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use triage_domain::{CompletionRequest, ToolError, ToolSpec};

/// Gateway returning pre-scripted replies in order and recording requests.
pub(crate) struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    delay: Option<Duration>,
}

impl ScriptedGateway {
    pub(crate) fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from(replies)),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub(crate) fn replying(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
    }
}

/// Tool invoker with canned per-tool results and a call log.
pub(crate) struct MockInvoker {
    spec: ToolSpec,
    results: HashMap<String, Result<String, ToolError>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockInvoker {
    pub(crate) fn new(spec: ToolSpec) -> Self {
        Self {
            spec,
            results: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_result(mut self, tool: &str, result: Result<String, ToolError>) -> Self {
        self.results.insert(tool.to_string(), result);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolInvokerPort for MockInvoker {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn invoke(&self, name: &str, input: &str) -> Result<String, ToolError> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), input.to_string()));
        self.results
            .get(name)
            .cloned()
            .unwrap_or_else(|| Ok(format!("{} output", name)))
    }
}
