use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use intervu_domain::{
    ApiRequest, Error, EvaluationReport, EvaluationRequest, EvaluationResponse,
    MSG_INVALID_EVALUATION, Result, SessionId,
};
use tracing::{debug, warn};

use crate::{AuthenticatedClient, Infrastructure};

pub const EVALUATION_PATH: &str = "/api/interview/chat/evaluation";

/// Fetches the scored report for one finished session, at most once.
///
/// A request that fails before the server produced a report re-arms the
/// loader so the caller can try again. A report in the wrong shape does not.
pub struct EvaluationLoader<I> {
    client: Arc<AuthenticatedClient<I>>,
    session_id: SessionId,
    requested: AtomicBool,
}

impl<I: Infrastructure> EvaluationLoader<I> {
    pub fn new(client: Arc<AuthenticatedClient<I>>, session_id: SessionId) -> Self {
        Self { client, session_id, requested: AtomicBool::new(false) }
    }

    /// Returns `Ok(None)` when the report was already requested
    pub async fn load(&self) -> Result<Option<EvaluationReport>> {
        if self.requested.swap(true, Ordering::SeqCst) {
            debug!(session_id = %self.session_id, "Evaluation already requested");
            return Ok(None);
        }

        let request = ApiRequest::post(EVALUATION_PATH)
            .json(&EvaluationRequest { session_id: self.session_id.clone() })?;
        let response: EvaluationResponse = match self.client.json(request).await {
            Ok(response) => response,
            Err(error) => {
                warn!(session_id = %self.session_id, error = %error, "Evaluation request failed");
                self.requested.store(false, Ordering::SeqCst);
                return Err(error);
            }
        };

        response
            .evaluation_report
            .map(Some)
            .ok_or_else(|| Error::MalformedPayload(MSG_INVALID_EVALUATION.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use intervu_domain::ScoreBand;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::mock::{MockInfra, Reply};

    fn loader(infra: MockInfra) -> (Arc<MockInfra>, EvaluationLoader<MockInfra>) {
        let infra = Arc::new(infra.with_tokens("A1", "R1"));
        let client = Arc::new(AuthenticatedClient::new(infra.clone()));
        (infra, EvaluationLoader::new(client, SessionId::from("s-1")))
    }

    fn report() -> serde_json::Value {
        json!({
            "evaluation_report": {
                "overall_score": 72.5,
                "overall_feedback": "Solid fundamentals",
                "improvement_keywords": ["paging", "TLB"],
                "turn_evaluations": [
                    {"turn": 1, "question": "What is a process?", "score": 80, "feedback": "Clear"}
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_report_is_fetched_once() {
        let (infra, loader) = loader(
            MockInfra::default()
                .reply(EVALUATION_PATH, Reply::ok(report()))
                .reply(EVALUATION_PATH, Reply::ok(report())),
        );

        let first = loader.load().await.unwrap().unwrap();
        let second = loader.load().await.unwrap();

        assert_eq!(first.overall_score, 72.5);
        assert_eq!(first.improvement_keywords, vec!["paging", "TLB"]);
        assert_eq!(ScoreBand::of(first.turn_evaluations[0].score), ScoreBand::Excellent);
        assert_eq!(second, None);
        assert_eq!(infra.requests_to(EVALUATION_PATH).len(), 1);
        assert_eq!(
            infra.requests_to(EVALUATION_PATH)[0].body,
            Some(json!({"sessionId": "s-1"}))
        );
    }

    #[tokio::test]
    async fn test_failed_request_can_be_retried() {
        let (infra, loader) = loader(
            MockInfra::default()
                .reply(EVALUATION_PATH, Reply::Status(500, String::new()))
                .reply(EVALUATION_PATH, Reply::ok(report())),
        );

        let first = loader.load().await;
        let second = loader.load().await.unwrap();

        assert!(matches!(first, Err(Error::Http { .. })));
        assert!(second.is_some());
        assert_eq!(infra.requests_to(EVALUATION_PATH).len(), 2);
    }

    #[tokio::test]
    async fn test_missing_report_is_malformed_and_not_retried() {
        let (infra, loader) =
            loader(MockInfra::default().reply(EVALUATION_PATH, Reply::ok(json!({}))));

        let first = loader.load().await;
        let second = loader.load().await.unwrap();

        assert!(matches!(first, Err(Error::MalformedPayload(ref m)) if m == MSG_INVALID_EVALUATION));
        assert_eq!(second, None);
        assert_eq!(infra.requests_to(EVALUATION_PATH).len(), 1);
    }
}
