use crate::domain::{DomainResult, PaginationWindow, Topic, TopicFilter, TopicRepository};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of TopicRepository backed by an insertion-ordered Vec
#[derive(Clone)]
pub struct InMemoryTopicRepository {
    topics: Arc<RwLock<Vec<Topic>>>,
}

impl InMemoryTopicRepository {
    pub fn new() -> Self {
        Self {
            topics: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn insert(&self, topic: Topic) {
        let mut topics = self.topics.write().await;
        topics.push(topic);
    }
}

impl Default for InMemoryTopicRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TopicRepository for InMemoryTopicRepository {
    async fn count_topics(&self, filter: &TopicFilter) -> DomainResult<u64> {
        let topics = self.topics.read().await;
        Ok(topics.iter().filter(|t| filter.matches(t)).count() as u64)
    }

    async fn filter_topics(
        &self,
        filter: &TopicFilter,
        window: PaginationWindow,
    ) -> DomainResult<Vec<Topic>> {
        let skip = usize::try_from(window.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);

        let topics = self.topics.read().await;
        Ok(topics
            .iter()
            .filter(|t| filter.matches(t))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }
}
