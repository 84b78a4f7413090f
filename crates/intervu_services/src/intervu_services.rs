use std::sync::Arc;

use intervu_config::InterviewConfig;
use intervu_domain::SessionId;

use crate::{
    AuthService, AuthenticatedClient, ContentService, EvaluationLoader, Infrastructure,
    InterviewController,
};

/// Entry point that wires every service onto one shared infrastructure and
/// request pipeline
pub struct IntervuServices<I> {
    infra: Arc<I>,
    client: Arc<AuthenticatedClient<I>>,
    interview: InterviewConfig,
}

impl<I: Infrastructure> IntervuServices<I> {
    pub fn new(infra: Arc<I>, interview: InterviewConfig) -> Self {
        let client = Arc::new(AuthenticatedClient::new(infra.clone()));
        Self { infra, client, interview }
    }

    pub fn client(&self) -> &Arc<AuthenticatedClient<I>> {
        &self.client
    }

    pub fn auth(&self) -> AuthService<I> {
        AuthService::new(self.infra.clone(), self.client.clone())
    }

    pub fn content(&self) -> ContentService<I> {
        ContentService::new(self.client.clone())
    }

    /// A fresh controller in the idle state
    pub fn interview(&self) -> InterviewController<I> {
        InterviewController::new(self.infra.clone(), self.client.clone(), self.interview.clone())
    }

    pub fn evaluation(&self, session_id: SessionId) -> EvaluationLoader<I> {
        EvaluationLoader::new(self.client.clone(), session_id)
    }
}
