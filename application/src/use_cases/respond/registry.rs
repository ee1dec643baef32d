use super::Responder;
use std::collections::HashMap;
use std::sync::Arc;
use triage_domain::Domain;

/// Maps each domain to its responder.
///
/// General is mandatory and also serves any domain without a registered
/// responder (and runs with no classification at all).
#[derive(Clone)]
pub struct ResponderRegistry {
    general: Arc<dyn Responder>,
    by_domain: HashMap<Domain, Arc<dyn Responder>>,
}

impl ResponderRegistry {
    pub fn new(general: Arc<dyn Responder>) -> Self {
        Self {
            general,
            by_domain: HashMap::new(),
        }
    }

    /// Register a responder under its own [`Responder::domain`].
    pub fn with_responder(mut self, responder: Arc<dyn Responder>) -> Self {
        let domain = responder.domain();
        if domain == Domain::General {
            self.general = responder;
        } else {
            self.by_domain.insert(domain, responder);
        }
        self
    }

    pub fn resolve(&self, domain: Option<Domain>) -> Arc<dyn Responder> {
        domain
            .and_then(|d| self.by_domain.get(&d).cloned())
            .unwrap_or_else(|| self.general.clone())
    }
}
