use std::sync::Arc;

use intervu_domain::{
    ApiRequest, BestQna, BestQnaData, BodyData, BodyRequest, CategoriesData, Company,
    CompanyReviews, ContentsData, ContentsRequest, Error, InterviewRecord, Result, SearchData,
    SearchResult, StudyCategory, StudyContent,
};
use serde_json::json;
use tracing::debug;

use crate::{AuthenticatedClient, Infrastructure};

pub const CATEGORIES_PATH: &str = "/api/study/categories";
pub const CONTENTS_PATH: &str = "/api/study/contents";
pub const BODY_PATH: &str = "/api/study/getBody";
pub const BEST_QNA_PATH: &str = "/api/interview/community/best-qna";
pub const REVIEWS_PATH: &str = "/api/interview/reviews";
pub const SEARCH_PATH: &str = "/api/search";
pub const RECORDS_PATH: &str = "/api/interview/chat/record";

/// Read-only study material, community answers and past sessions
pub struct ContentService<I> {
    client: Arc<AuthenticatedClient<I>>,
}

impl<I: Infrastructure> ContentService<I> {
    pub fn new(client: Arc<AuthenticatedClient<I>>) -> Self {
        Self { client }
    }

    pub async fn categories(&self) -> Result<Vec<StudyCategory>> {
        let data: CategoriesData = self.client.data(ApiRequest::get(CATEGORIES_PATH)).await?;
        Ok(data.categories)
    }

    pub async fn contents(&self, first: &str, second: &str) -> Result<Vec<StudyContent>> {
        let request = ApiRequest::post(CONTENTS_PATH).json(&ContentsRequest {
            first_category: first.to_string(),
            second_category: second.to_string(),
        })?;
        let data: ContentsData = self.client.data(request).await?;
        Ok(data.contents)
    }

    pub async fn body(&self, title: &str) -> Result<String> {
        let request = ApiRequest::post(BODY_PATH).json(&BodyRequest { title: title.to_string() })?;
        let data: BodyData = self.client.data(request).await?;
        Ok(data.body)
    }

    pub async fn best_answers(&self) -> Result<Vec<BestQna>> {
        let data: BestQnaData = self.client.data(ApiRequest::get(BEST_QNA_PATH)).await?;
        Ok(data.best_qnas)
    }

    pub async fn reviews(&self, company: Company) -> Result<CompanyReviews> {
        let request = ApiRequest::get(REVIEWS_PATH).query("company_name", company.key());
        self.client.json(request).await
    }

    /// Reference links for a keyword. A response without results is an
    /// empty list.
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchResult>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(Error::Validation("Please enter a keyword.".to_string()));
        }
        let request = ApiRequest::get(SEARCH_PATH).query("keyword", keyword);
        let data: SearchData = self.client.json(request).await?;
        Ok(data.data.unwrap_or_default())
    }

    pub async fn records(&self) -> Result<Vec<InterviewRecord>> {
        let request = ApiRequest::post(RECORDS_PATH).json(&json!({}))?;
        let records: Vec<InterviewRecord> = self.client.data(request).await?;
        debug!(count = records.len(), "Interview records loaded");
        Ok(records)
    }

    /// There is no single-record endpoint, so this filters the full list
    pub async fn record(&self, id: u64) -> Result<Option<InterviewRecord>> {
        Ok(self.records().await?.into_iter().find(|record| record.id == id))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mock::{MockInfra, Reply};

    fn service(infra: MockInfra) -> (Arc<MockInfra>, ContentService<MockInfra>) {
        let infra = Arc::new(infra.with_tokens("A1", "R1"));
        let client = Arc::new(AuthenticatedClient::new(infra.clone()));
        (infra, ContentService::new(client))
    }

    #[tokio::test]
    async fn test_categories_from_envelope() {
        let (_infra, service) = service(MockInfra::default().reply(
            CATEGORIES_PATH,
            Reply::ok(json!({
                "success": true,
                "data": {"categories": [
                    {"firstCategory": "OS", "secondCategory": ["Process", "Memory"]}
                ]}
            })),
        ));

        let actual = service.categories().await.unwrap();

        let expected = vec![StudyCategory {
            first_category: "OS".to_string(),
            second_category: vec!["Process".to_string(), "Memory".to_string()],
        }];
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_unsuccessful_categories_are_malformed() {
        let (_infra, service) = service(MockInfra::default().reply(
            CATEGORIES_PATH,
            Reply::ok(json!({"success": false, "message": "not ready", "data": null})),
        ));

        let actual = service.categories().await;

        assert!(matches!(actual, Err(Error::MalformedPayload(_))));
    }

    #[tokio::test]
    async fn test_failed_contents_are_not_an_empty_list() {
        let (_infra, service) = service(MockInfra::default().reply(
            CONTENTS_PATH,
            Reply::ok(json!({"success": false, "message": "no such category", "data": null})),
        ));

        let actual = service.contents("OS", "Nothing").await;

        assert!(matches!(actual, Err(Error::MalformedPayload(m)) if m == "no such category"));
    }

    #[tokio::test]
    async fn test_wrong_shaped_best_answers_are_malformed() {
        let (_infra, service) = service(
            MockInfra::default()
                .reply(BEST_QNA_PATH, Reply::ok(json!({"success": true, "data": {"bestQnas": "oops"}}))),
        );

        let actual = service.best_answers().await;

        assert!(matches!(actual, Err(Error::MalformedPayload(_))));
    }

    #[tokio::test]
    async fn test_contents_sends_both_categories() {
        let (infra, service) = service(MockInfra::default().reply(
            CONTENTS_PATH,
            Reply::ok(json!({"data": {"contents": [{"title": "Paging", "body": "# Paging"}]}})),
        ));

        let actual = service.contents("OS", "Memory").await.unwrap();

        assert_eq!(actual[0].title, "Paging");
        assert_eq!(
            infra.requests_to(CONTENTS_PATH)[0].body,
            Some(json!({"firstCategory": "OS", "secondCategory": "Memory"}))
        );
    }

    #[tokio::test]
    async fn test_body_by_title() {
        let (_infra, service) = service(
            MockInfra::default()
                .reply(BODY_PATH, Reply::ok(json!({"data": {"body": "Pages are fixed-size"}}))),
        );

        let actual = service.body("Paging").await.unwrap();

        assert_eq!(actual, "Pages are fixed-size");
    }

    #[tokio::test]
    async fn test_reviews_use_company_key() {
        let (infra, service) = service(MockInfra::default().reply(
            REVIEWS_PATH,
            Reply::ok(json!({"reviews": [{"questions": [{"question": "1. Why us?", "answer": "Growth"}]}]})),
        ));

        let actual = service.reviews(Company::Kakao).await.unwrap();

        assert_eq!(actual.reviews[0].questions[0].display_question(), "Why us?");
        assert_eq!(
            infra.requests_to(REVIEWS_PATH)[0].query,
            vec![("company_name".to_string(), "kakao".to_string())]
        );
    }

    #[tokio::test]
    async fn test_search_without_data_is_empty() {
        let (_infra, service) =
            service(MockInfra::default().reply(SEARCH_PATH, Reply::ok(json!({}))));

        let actual = service.search("deadlock").await.unwrap();

        assert_eq!(actual, Vec::<SearchResult>::new());
    }

    #[tokio::test]
    async fn test_search_with_blank_keyword_sends_nothing() {
        let (infra, service) = service(MockInfra::default());

        let actual = service.search("   ").await;

        assert!(matches!(actual, Err(Error::Validation(_))));
        assert!(infra.requests().is_empty());
    }

    #[tokio::test]
    async fn test_record_is_found_by_id() {
        let (infra, service) = service(MockInfra::default().reply(
            RECORDS_PATH,
            Reply::ok(json!({"data": [
                {"id": 1, "interviewType": "cs", "messages": "[]"},
                {"id": 2, "interviewType": "project", "messages": "[]"}
            ]})),
        ));

        let actual = service.record(2).await.unwrap().map(|record| record.interview_type);

        assert_eq!(actual, Some("project".to_string()));
        assert_eq!(infra.requests_to(RECORDS_PATH)[0].body, Some(json!({})));
    }
}
