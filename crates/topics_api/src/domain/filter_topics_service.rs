use common::domain::{
    DomainError, DomainResult, PaginationWindow, TopicFilter, TopicRepository,
};
use garde::Validate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Largest page a caller may request
pub const MAX_TOPIC_PAGE_SIZE: u32 = 10;

/// Page size used when the caller does not specify one
pub const DEFAULT_TOPIC_PAGE_SIZE: u32 = 10;

// ============================================================================
// Service Request / Response Types
// ============================================================================

/// Request to list the topics of an organization environment, one page at a time
#[derive(Debug, Clone, PartialEq, Eq, Default, Validate, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterTopicsRequest {
    #[garde(length(min = 1))]
    pub organization_id: String,
    #[garde(length(min = 1))]
    pub environment_id: String,
    /// Exact topic key; empty is treated as absent
    #[garde(skip)]
    #[serde(default)]
    pub key: Option<String>,
    /// Zero-based page index, defaults to 0
    #[garde(skip)]
    #[serde(default)]
    pub page: Option<u32>,
    /// Defaults to [`DEFAULT_TOPIC_PAGE_SIZE`], capped at [`MAX_TOPIC_PAGE_SIZE`]
    #[garde(skip)]
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// Topic as returned to callers, every identifier in string form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_organizationId")]
    pub organization_id: String,
    #[serde(rename = "_environmentId")]
    pub environment_id: String,
    pub key: String,
    pub name: String,
    pub subscribers: Vec<String>,
}

/// One page of topics plus the size of the whole match set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterTopicsResponse {
    pub page: u32,
    pub page_size: u32,
    /// Matches for the filter with no pagination applied
    pub total_count: u64,
    pub data: Vec<TopicDto>,
}

/// Domain service answering paginated topic queries
pub struct FilterTopicsService {
    topic_repository: Arc<dyn TopicRepository>,
}

impl FilterTopicsService {
    pub fn new(topic_repository: Arc<dyn TopicRepository>) -> Self {
        Self { topic_repository }
    }

    /// Count and fetch one page of topics matching the request scope and key.
    ///
    /// Both storage reads run against the same [`TopicFilter`], so
    /// `total_count` always describes the set the page was cut from.
    /// Order within and across pages is whatever the repository returns.
    #[instrument(skip(self, request), fields(organization_id = %request.organization_id, environment_id = %request.environment_id, key = ?request.key))]
    pub async fn execute(&self, request: FilterTopicsRequest) -> DomainResult<FilterTopicsResponse> {
        let page_size = request.page_size.unwrap_or(DEFAULT_TOPIC_PAGE_SIZE);
        let page = request.page.unwrap_or(0);

        if page_size > MAX_TOPIC_PAGE_SIZE {
            return Err(DomainError::InvalidPageSize(format!(
                "page size must not exceed {}, got {}",
                MAX_TOPIC_PAGE_SIZE, page_size
            )));
        }

        // Empty ids are rejected here, before they reach the identifier codec
        common::garde::validate_struct(&request)?;

        let filter = TopicFilter::try_from(&request)?;
        let window = PaginationWindow::for_page(page, page_size);

        debug!(page, page_size, skip = window.skip, "filtering topics");

        let (total_count, topics) = tokio::try_join!(
            self.topic_repository.count_topics(&filter),
            self.topic_repository.filter_topics(&filter, window),
        )?;

        let data: Vec<TopicDto> = topics.iter().map(TopicDto::from).collect();

        debug!(total_count, returned = data.len(), "topics filtered");
        Ok(FilterTopicsResponse {
            page,
            page_size,
            total_count,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::domain::{MockTopicRepository, ObjectId, Topic};

    const ORG: &str = "64a1f0c2e4b0a1b2c3d4e5f6";
    const ENV: &str = "64a1f0c2e4b0a1b2c3d4e5f7";

    fn request() -> FilterTopicsRequest {
        FilterTopicsRequest {
            organization_id: ORG.to_string(),
            environment_id: ENV.to_string(),
            ..Default::default()
        }
    }

    fn expected_filter(key: Option<&str>) -> TopicFilter {
        TopicFilter {
            environment_id: ObjectId::parse_str(ENV).unwrap(),
            organization_id: ObjectId::parse_str(ORG).unwrap(),
            key: key.map(str::to_string),
        }
    }

    fn stored_topic(key: &str) -> Topic {
        Topic {
            id: ObjectId::new(),
            organization_id: ObjectId::parse_str(ORG).unwrap(),
            environment_id: ObjectId::parse_str(ENV).unwrap(),
            key: key.to_string(),
            name: format!("{} name", key),
            subscribers: vec!["subscriber-1".to_string(), "subscriber-2".to_string()],
        }
    }

    #[tokio::test]
    async fn test_page_size_above_max_is_rejected_before_storage() {
        // No expectations: any repository call panics
        let mock_repo = MockTopicRepository::new();
        let service = FilterTopicsService::new(Arc::new(mock_repo));

        let result = service
            .execute(FilterTopicsRequest {
                page_size: Some(11),
                ..request()
            })
            .await;

        assert!(matches!(result, Err(DomainError::InvalidPageSize(_))));
    }

    #[tokio::test]
    async fn test_zero_page_size_returns_count_with_empty_page() {
        let mut mock_repo = MockTopicRepository::new();

        mock_repo
            .expect_count_topics()
            .times(1)
            .return_once(|_| Ok(3));
        mock_repo
            .expect_filter_topics()
            .withf(|_, window: &PaginationWindow| {
                *window == PaginationWindow { limit: 0, skip: 0 }
            })
            .times(1)
            .return_once(|_, _| Ok(vec![]));

        let service = FilterTopicsService::new(Arc::new(mock_repo));
        let response = service
            .execute(FilterTopicsRequest {
                page_size: Some(0),
                ..request()
            })
            .await
            .unwrap();

        assert_eq!(response.page_size, 0);
        assert_eq!(response.total_count, 3);
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn test_max_page_size_is_accepted() {
        let mut mock_repo = MockTopicRepository::new();

        mock_repo
            .expect_count_topics()
            .times(1)
            .return_once(|_| Ok(0));
        mock_repo
            .expect_filter_topics()
            .withf(|_, window: &PaginationWindow| window.limit == 10)
            .times(1)
            .return_once(|_, _| Ok(vec![]));

        let service = FilterTopicsService::new(Arc::new(mock_repo));
        let result = service
            .execute(FilterTopicsRequest {
                page_size: Some(MAX_TOPIC_PAGE_SIZE),
                ..request()
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_defaults_applied_when_page_fields_absent() {
        let mut mock_repo = MockTopicRepository::new();

        mock_repo
            .expect_count_topics()
            .times(1)
            .return_once(|_| Ok(0));
        mock_repo
            .expect_filter_topics()
            .withf(|_, window: &PaginationWindow| {
                *window == PaginationWindow { limit: 10, skip: 0 }
            })
            .times(1)
            .return_once(|_, _| Ok(vec![]));

        let service = FilterTopicsService::new(Arc::new(mock_repo));
        let response = service.execute(request()).await.unwrap();

        assert_eq!(response.page, 0);
        assert_eq!(response.page_size, 10);
        assert_eq!(response.total_count, 0);
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn test_count_and_filter_receive_identical_predicate() {
        let mut mock_repo = MockTopicRepository::new();

        mock_repo
            .expect_count_topics()
            .withf(|filter: &TopicFilter| *filter == expected_filter(Some("promotions")))
            .times(1)
            .return_once(|_| Ok(12));
        mock_repo
            .expect_filter_topics()
            .withf(|filter: &TopicFilter, window: &PaginationWindow| {
                *filter == expected_filter(Some("promotions"))
                    && *window == PaginationWindow { limit: 5, skip: 10 }
            })
            .times(1)
            .return_once(|_, _| Ok(vec![stored_topic("promotions"), stored_topic("promotions")]));

        let service = FilterTopicsService::new(Arc::new(mock_repo));
        let response = service
            .execute(FilterTopicsRequest {
                key: Some("promotions".to_string()),
                page: Some(2),
                page_size: Some(5),
                ..request()
            })
            .await
            .unwrap();

        assert_eq!(response.page, 2);
        assert_eq!(response.page_size, 5);
        assert_eq!(response.total_count, 12);
        assert_eq!(response.data.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_key_matches_all_keys() {
        let mut mock_repo = MockTopicRepository::new();

        mock_repo
            .expect_count_topics()
            .withf(|filter: &TopicFilter| filter.key.is_none())
            .times(1)
            .return_once(|_| Ok(0));
        mock_repo
            .expect_filter_topics()
            .withf(|filter: &TopicFilter, _| filter.key.is_none())
            .times(1)
            .return_once(|_, _| Ok(vec![]));

        let service = FilterTopicsService::new(Arc::new(mock_repo));
        let result = service
            .execute(FilterTopicsRequest {
                key: Some(String::new()),
                ..request()
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_records_are_returned_with_string_ids() {
        let topic = stored_topic("alerts");
        let expected_id = topic.id.to_hex();

        let mut mock_repo = MockTopicRepository::new();
        mock_repo
            .expect_count_topics()
            .times(1)
            .return_once(|_| Ok(1));
        mock_repo
            .expect_filter_topics()
            .times(1)
            .return_once(move |_, _| Ok(vec![topic]));

        let service = FilterTopicsService::new(Arc::new(mock_repo));
        let response = service.execute(request()).await.unwrap();

        let dto = &response.data[0];
        assert_eq!(dto.id, expected_id);
        assert_eq!(dto.organization_id, ORG);
        assert_eq!(dto.environment_id, ENV);
        assert_eq!(dto.key, "alerts");
        assert_eq!(dto.name, "alerts name");
        assert_eq!(dto.subscribers, vec!["subscriber-1", "subscriber-2"]);
    }

    #[tokio::test]
    async fn test_malformed_organization_id_fails_before_storage() {
        let mock_repo = MockTopicRepository::new();
        let service = FilterTopicsService::new(Arc::new(mock_repo));

        let result = service
            .execute(FilterTopicsRequest {
                organization_id: "not-an-object-id".to_string(),
                ..request()
            })
            .await;

        assert!(matches!(result, Err(DomainError::InvalidIdentifier(_))));
    }

    #[tokio::test]
    async fn test_empty_environment_id_is_a_validation_error() {
        let mock_repo = MockTopicRepository::new();
        let service = FilterTopicsService::new(Arc::new(mock_repo));

        let result = service
            .execute(FilterTopicsRequest {
                environment_id: "".to_string(),
                ..request()
            })
            .await;

        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_empty_id_is_reported_before_malformed_id() {
        let mock_repo = MockTopicRepository::new();
        let service = FilterTopicsService::new(Arc::new(mock_repo));

        let result = service
            .execute(FilterTopicsRequest {
                organization_id: "".to_string(),
                environment_id: "not-an-object-id".to_string(),
                ..request()
            })
            .await;

        match result {
            Err(DomainError::ValidationError(msg)) => {
                assert!(msg.contains("organization_id"));
                assert!(!msg.contains("environment_id"));
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_repository_error_propagates_unchanged() {
        let mut mock_repo = MockTopicRepository::new();

        mock_repo
            .expect_count_topics()
            .times(1)
            .return_once(|_| Err(DomainError::RepositoryError(anyhow::anyhow!("connection reset"))));
        mock_repo
            .expect_filter_topics()
            .times(0..=1)
            .returning(|_, _| Ok(vec![]));

        let service = FilterTopicsService::new(Arc::new(mock_repo));
        let result = service.execute(request()).await;

        match result {
            Err(DomainError::RepositoryError(e)) => assert_eq!(e.to_string(), "connection reset"),
            other => panic!("Expected RepositoryError, got {:?}", other),
        }
    }

    #[test]
    fn test_response_serializes_with_wire_names() {
        let response = FilterTopicsResponse {
            page: 1,
            page_size: 10,
            total_count: 11,
            data: vec![TopicDto {
                id: "64a1f0c2e4b0a1b2c3d4e5f8".to_string(),
                organization_id: ORG.to_string(),
                environment_id: ENV.to_string(),
                key: "promotions".to_string(),
                name: "Promotions".to_string(),
                subscribers: vec!["sub-1".to_string()],
            }],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["pageSize"], 10);
        assert_eq!(json["totalCount"], 11);
        assert_eq!(json["data"][0]["_id"], "64a1f0c2e4b0a1b2c3d4e5f8");
        assert_eq!(json["data"][0]["_organizationId"], ORG);
        assert_eq!(json["data"][0]["_environmentId"], ENV);
        assert_eq!(json["data"][0]["subscribers"][0], "sub-1");
    }

    #[test]
    fn test_request_deserializes_camel_case_with_optional_fields() {
        let request: FilterTopicsRequest = serde_json::from_value(serde_json::json!({
            "organizationId": ORG,
            "environmentId": ENV,
            "pageSize": 5
        }))
        .unwrap();

        assert_eq!(request.page_size, Some(5));
        assert_eq!(request.page, None);
        assert_eq!(request.key, None);
    }
}
