use crate::domain::{
    DomainError, DomainResult, ObjectId, PaginationWindow, Topic, TopicFilter, TopicRepository,
};
use crate::postgres::PostgresClient;
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use tokio_postgres::Row;
use tracing::{debug, instrument};

/// Scope predicate shared by the count and page queries.
/// $1 = environment_id, $2 = organization_id, $3 = key (NULL matches every key)
const TOPIC_SCOPE_CLAUSE: &str =
    "t.environment_id = $1 AND t.organization_id = $2 AND ($3::TEXT IS NULL OR t.key = $3)";

/// Topic row as read from PostgreSQL, ids still in raw column form
#[derive(Debug, Clone)]
pub struct TopicRow {
    pub id: Vec<u8>,
    pub organization_id: Vec<u8>,
    pub environment_id: Vec<u8>,
    pub key: String,
    pub name: String,
    pub subscribers: Vec<String>,
}

impl TopicRow {
    fn from_row(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            organization_id: row.get("organization_id"),
            environment_id: row.get("environment_id"),
            key: row.get("key"),
            name: row.get("name"),
            subscribers: row.get("subscribers"),
        }
    }
}

impl TryFrom<TopicRow> for Topic {
    type Error = DomainError;

    fn try_from(row: TopicRow) -> Result<Self, Self::Error> {
        Ok(Topic {
            id: ObjectId::try_from(row.id.as_slice())?,
            organization_id: ObjectId::try_from(row.organization_id.as_slice())?,
            environment_id: ObjectId::try_from(row.environment_id.as_slice())?,
            key: row.key,
            name: row.name,
            subscribers: row.subscribers,
        })
    }
}

/// PostgreSQL implementation of TopicRepository trait
#[derive(Clone)]
pub struct PostgresTopicRepository {
    client: PostgresClient,
}

impl PostgresTopicRepository {
    pub fn new(client: PostgresClient) -> Self {
        Self { client }
    }

    /// Insert a topic and its subscribers in one transaction.
    /// Subscriber order is preserved through `created_at`.
    #[instrument(skip(self, topic), fields(topic_id = %topic.id, key = %topic.key))]
    pub async fn create_topic(&self, topic: &Topic) -> DomainResult<()> {
        let mut conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::RepositoryError)?;

        let tx = conn
            .transaction()
            .await
            .map_err(|e| DomainError::RepositoryError(e.into()))?;

        let now = Utc::now();

        tx.execute(
            "INSERT INTO topics (id, organization_id, environment_id, key, name, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
            &[
                &topic.id.bytes().as_slice(),
                &topic.organization_id.bytes().as_slice(),
                &topic.environment_id.bytes().as_slice(),
                &topic.key,
                &topic.name,
                &now,
            ],
        )
        .await
        .map_err(|e| DomainError::RepositoryError(e.into()))?;

        for (position, subscriber_id) in topic.subscribers.iter().enumerate() {
            let subscribed_at = now + chrono::Duration::microseconds(position as i64);
            tx.execute(
                "INSERT INTO topic_subscribers (topic_id, external_subscriber_id, created_at)
                 VALUES ($1, $2, $3)",
                &[&topic.id.bytes().as_slice(), subscriber_id, &subscribed_at],
            )
            .await
            .map_err(|e| DomainError::RepositoryError(e.into()))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::RepositoryError(e.into()))?;

        debug!(
            subscriber_count = topic.subscribers.len(),
            "topic created in database"
        );
        Ok(())
    }
}

fn window_bound(value: u64, name: &str) -> DomainResult<i64> {
    i64::try_from(value)
        .map_err(|_| DomainError::RepositoryError(anyhow!("{} {} exceeds BIGINT", name, value)))
}

#[async_trait]
impl TopicRepository for PostgresTopicRepository {
    #[instrument(skip(self, filter), fields(organization_id = %filter.organization_id, environment_id = %filter.environment_id, key = ?filter.key))]
    async fn count_topics(&self, filter: &TopicFilter) -> DomainResult<u64> {
        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::RepositoryError)?;

        let sql = format!(
            "SELECT COUNT(*) AS total FROM topics t WHERE {}",
            TOPIC_SCOPE_CLAUSE
        );

        let row = conn
            .query_one(
                &sql,
                &[
                    &filter.environment_id.bytes().as_slice(),
                    &filter.organization_id.bytes().as_slice(),
                    &filter.key.as_deref(),
                ],
            )
            .await
            .map_err(|e| DomainError::RepositoryError(e.into()))?;

        let total: i64 = row.get("total");
        debug!(total, "counted topics in database");

        u64::try_from(total)
            .map_err(|_| DomainError::RepositoryError(anyhow!("negative topic count {}", total)))
    }

    #[instrument(skip(self, filter), fields(organization_id = %filter.organization_id, environment_id = %filter.environment_id, key = ?filter.key, limit = window.limit, skip = window.skip))]
    async fn filter_topics(
        &self,
        filter: &TopicFilter,
        window: PaginationWindow,
    ) -> DomainResult<Vec<Topic>> {
        let limit = window_bound(window.limit, "limit")?;
        let offset = window_bound(window.skip, "skip")?;

        let conn = self
            .client
            .get_connection()
            .await
            .map_err(DomainError::RepositoryError)?;

        let sql = format!(
            "SELECT t.id, t.organization_id, t.environment_id, t.key, t.name,
                    COALESCE(
                        ARRAY_AGG(s.external_subscriber_id ORDER BY s.created_at, s.external_subscriber_id)
                            FILTER (WHERE s.external_subscriber_id IS NOT NULL),
                        '{{}}'::TEXT[]
                    ) AS subscribers
             FROM topics t
             LEFT JOIN topic_subscribers s ON s.topic_id = t.id
             WHERE {}
             GROUP BY t.id
             ORDER BY t.created_at, t.id
             LIMIT $4 OFFSET $5",
            TOPIC_SCOPE_CLAUSE
        );

        let rows = conn
            .query(
                &sql,
                &[
                    &filter.environment_id.bytes().as_slice(),
                    &filter.organization_id.bytes().as_slice(),
                    &filter.key.as_deref(),
                    &limit,
                    &offset,
                ],
            )
            .await
            .map_err(|e| DomainError::RepositoryError(e.into()))?;

        debug!(row_count = rows.len(), "fetched topics from database");

        rows.iter()
            .map(|row| Topic::try_from(TopicRow::from_row(row)))
            .collect()
    }
}
