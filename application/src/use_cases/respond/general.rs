use super::{Answer, Responder, ResponderError};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::RunProgressNotifier;
use async_trait::async_trait;
use std::sync::Arc;
use triage_domain::{CompletionRequest, Domain, Message, PromptTemplate};

/// Answers greetings and non-domain questions with one model call, no tools.
pub struct GeneralResponder {
    gateway: Arc<dyn LlmGateway>,
}

impl GeneralResponder {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Responder for GeneralResponder {
    fn domain(&self) -> Domain {
        Domain::General
    }

    async fn respond(
        &self,
        query: &str,
        _progress: &dyn RunProgressNotifier,
    ) -> Result<Answer, ResponderError> {
        let request = CompletionRequest::new(vec![
            Message::system(PromptTemplate::general_system()),
            Message::user(query),
        ]);
        let text = self
            .gateway
            .complete(&request)
            .await
            .map_err(|e| ResponderError::new(Domain::General, e))?;
        Ok(Answer::new(text.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::ports::progress::NoRunProgress;
    use crate::use_cases::respond::ResponderErrorKind;
    use crate::use_cases::testing::ScriptedGateway;
    use triage_domain::Role;

    #[tokio::test]
    async fn test_single_call_with_system_prompt() {
        let gateway = Arc::new(ScriptedGateway::replying(&["Hello! How can I help?\n"]));
        let responder = GeneralResponder::new(gateway.clone());

        let answer = responder.respond("hi there", &NoRunProgress).await.unwrap();

        assert_eq!(answer.text, "Hello! How can I help?");
        assert!(answer.tools_used.is_empty());
        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[0].role, Role::System);
        assert_eq!(requests[0].messages[1].content, "hi there");
        assert_eq!(requests[0].temperature, None);
    }

    #[tokio::test]
    async fn test_gateway_failure_is_tagged_general() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Err(GatewayError::Timeout)]));
        let err = GeneralResponder::new(gateway)
            .respond("hi", &NoRunProgress)
            .await
            .unwrap_err();
        assert_eq!(err.domain, Domain::General);
        assert!(matches!(err.kind, ResponderErrorKind::Gateway(_)));
    }
}
