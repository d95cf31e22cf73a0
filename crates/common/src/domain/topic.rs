use crate::domain::object_id::ObjectId;
use crate::domain::pagination::PaginationWindow;
use crate::domain::result::DomainResult;
use async_trait::async_trait;

/// Topic entity as stored: a keyed group of subscribers scoped to an
/// organization environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: ObjectId,
    pub organization_id: ObjectId,
    pub environment_id: ObjectId,
    pub key: String,
    pub name: String,
    /// External subscriber ids, in subscription order
    pub subscribers: Vec<String>,
}

/// Predicate for topic lookups, shared by counting and fetching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicFilter {
    pub environment_id: ObjectId,
    pub organization_id: ObjectId,
    /// Exact key match; `None` matches every key in scope
    pub key: Option<String>,
}

impl TopicFilter {
    pub fn matches(&self, topic: &Topic) -> bool {
        topic.environment_id == self.environment_id
            && topic.organization_id == self.organization_id
            && self.key.as_deref().is_none_or(|key| topic.key == key)
    }
}

/// Repository trait for topic storage operations
/// Infrastructure layer (e.g., postgres) implements this trait
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Count topics matching the filter, ignoring pagination
    async fn count_topics(&self, filter: &TopicFilter) -> DomainResult<u64>;

    /// Fetch at most `window.limit` matching topics after skipping `window.skip`
    async fn filter_topics(
        &self,
        filter: &TopicFilter,
        window: PaginationWindow,
    ) -> DomainResult<Vec<Topic>>;
}
