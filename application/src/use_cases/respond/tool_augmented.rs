use super::{Answer, Responder, ResponderError, ResponderErrorKind};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::RunProgressNotifier;
use crate::ports::tool_invoker::ToolInvokerPort;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use triage_domain::util::preview;
use triage_domain::{
    CompletionRequest, Domain, Message, PromptTemplate, ToolCall, ToolError, ToolKind,
    parse_tool_call,
};

const DEFAULT_MAX_TOOL_TURNS: usize = 6;

/// Responder for IT and Finance: a model-driven tool loop over internal
/// documentation (primary) and web search (secondary).
///
/// Retrieval comes first. A web search requested before any document
/// lookup is served by the document tool instead and the model is told so.
/// A failing document lookup aborts the responder; a failing web search
/// becomes an observation and the loop continues.
pub struct ToolAugmentedResponder {
    domain: Domain,
    gateway: Arc<dyn LlmGateway>,
    tools: Arc<dyn ToolInvokerPort>,
    max_tool_turns: usize,
}

/// What one tool call fed back into the conversation.
struct Observation {
    message: String,
    tool: Option<String>,
}

impl ToolAugmentedResponder {
    pub fn new(domain: Domain, gateway: Arc<dyn LlmGateway>, tools: Arc<dyn ToolInvokerPort>) -> Self {
        Self {
            domain,
            gateway,
            tools,
            max_tool_turns: DEFAULT_MAX_TOOL_TURNS,
        }
    }

    pub fn with_max_tool_turns(mut self, max: usize) -> Self {
        self.max_tool_turns = max;
        self
    }

    fn fail(&self, kind: impl Into<ResponderErrorKind>) -> ResponderError {
        ResponderError::new(self.domain, kind)
    }

    async fn observe(
        &self,
        call: &ToolCall,
        query: &str,
        retrieved: &mut bool,
        progress: &dyn RunProgressNotifier,
    ) -> Result<Observation, ResponderError> {
        let Some(definition) = self.tools.get_tool(&call.tool_name) else {
            warn!("{} requested unknown tool '{}'", self.domain, call.tool_name);
            return Ok(Observation {
                message: PromptTemplate::tool_failure(&ToolError::not_found(&call.tool_name)),
                tool: None,
            });
        };
        let input = call.input_or(query);

        match definition.kind {
            ToolKind::WebSearch if !*retrieved => {
                match self.tools.tool_spec().first_of(ToolKind::DocumentRetrieval) {
                    Some(docs) => {
                        let docs_name = docs.name.clone();
                        info!(
                            "{} requested {} before retrieval; running {} first",
                            self.domain, call.tool_name, docs_name
                        );
                        let output = self.retrieve(&docs_name, input, progress).await?;
                        *retrieved = true;
                        Ok(Observation {
                            message: format!(
                                "{}\n\n{}",
                                PromptTemplate::retrieval_first_notice(&call.tool_name, &docs_name),
                                PromptTemplate::tool_result(&docs_name, &output)
                            ),
                            tool: Some(docs_name),
                        })
                    }
                    None => self.search(&definition.name.clone(), input, progress).await,
                }
            }
            ToolKind::WebSearch => self.search(&definition.name.clone(), input, progress).await,
            ToolKind::DocumentRetrieval => {
                let name = definition.name.clone();
                let output = self.retrieve(&name, input, progress).await?;
                *retrieved = true;
                Ok(Observation {
                    message: PromptTemplate::tool_result(&name, &output),
                    tool: Some(name),
                })
            }
        }
    }

    async fn retrieve(
        &self,
        name: &str,
        input: &str,
        progress: &dyn RunProgressNotifier,
    ) -> Result<String, ResponderError> {
        progress.on_tool_call(name);
        debug!("{} -> {}({})", self.domain, name, preview(input, 80));
        self.tools
            .invoke(name, input)
            .await
            .map_err(|e| self.fail(ResponderErrorKind::Tool(e)))
    }

    async fn search(
        &self,
        name: &str,
        input: &str,
        progress: &dyn RunProgressNotifier,
    ) -> Result<Observation, ResponderError> {
        progress.on_tool_call(name);
        debug!("{} -> {}({})", self.domain, name, preview(input, 80));
        let message = match self.tools.invoke(name, input).await {
            Ok(output) => PromptTemplate::tool_result(name, &output),
            Err(e) => {
                warn!("{} web search failed, continuing: {}", self.domain, e);
                PromptTemplate::tool_failure(&e)
            }
        };
        Ok(Observation {
            message,
            tool: Some(name.to_string()),
        })
    }
}

#[async_trait]
impl Responder for ToolAugmentedResponder {
    fn domain(&self) -> Domain {
        self.domain
    }

    async fn respond(
        &self,
        query: &str,
        progress: &dyn RunProgressNotifier,
    ) -> Result<Answer, ResponderError> {
        let mut request = CompletionRequest::new(vec![
            Message::system(PromptTemplate::tool_augmented_system(
                self.domain,
                self.tools.tool_spec(),
            )),
            Message::user(query),
        ]);
        let mut retrieved = false;
        let mut tools_used = Vec::new();
        let mut turns = 0;

        loop {
            let reply = self
                .gateway
                .complete(&request)
                .await
                .map_err(|e| self.fail(e))?;

            let Some(call) = parse_tool_call(&reply) else {
                return Ok(Answer::new(reply.trim()).with_tools_used(tools_used));
            };

            if turns >= self.max_tool_turns {
                return Err(self.fail(ResponderErrorKind::ToolLoopExhausted(self.max_tool_turns)));
            }
            turns += 1;

            let observation = self.observe(&call, query, &mut retrieved, progress).await?;
            tools_used.extend(observation.tool);
            request.push(Message::assistant(reply));
            request.push(Message::user(observation.message));
        }
    }
}
