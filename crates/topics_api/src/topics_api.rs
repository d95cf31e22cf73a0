use crate::config::ServiceConfig;
use crate::domain::FilterTopicsService;
use common::domain::TopicRepository;
use common::postgres::{PostgresClient, PostgresTopicRepository};
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point for embedding the topic query service.
///
/// Owns the wired [`FilterTopicsService`]; the transport in front of it is
/// left to the host process.
pub struct TopicsApi {
    filter_topics: Arc<FilterTopicsService>,
}

impl TopicsApi {
    pub fn new(topic_repository: Arc<dyn TopicRepository>) -> Self {
        debug!("Initializing topics API module");
        Self {
            filter_topics: Arc::new(FilterTopicsService::new(topic_repository)),
        }
    }

    /// Build the service on top of PostgreSQL, failing fast if the database
    /// is unreachable
    pub async fn connect(config: &ServiceConfig) -> anyhow::Result<Self> {
        let client = PostgresClient::new(&config.postgres_config())?;
        client.ping().await?;

        info!(
            host = %config.postgres_host,
            database = %config.postgres_database,
            "connected to topic store"
        );

        Ok(Self::new(Arc::new(PostgresTopicRepository::new(client))))
    }

    pub fn filter_topics_service(&self) -> Arc<FilterTopicsService> {
        Arc::clone(&self.filter_topics)
    }
}
