//! Conversions between the service boundary and storage types.
//!
//! Inbound identifiers are parsed into [`ObjectId`] before they reach a
//! repository; outbound topics carry only hex strings.

use crate::domain::{FilterTopicsRequest, TopicDto};
use common::domain::{DomainError, ObjectId, Topic, TopicFilter};

impl TryFrom<&FilterTopicsRequest> for TopicFilter {
    type Error = DomainError;

    fn try_from(request: &FilterTopicsRequest) -> Result<Self, Self::Error> {
        Ok(TopicFilter {
            environment_id: ObjectId::parse_str(&request.environment_id)?,
            organization_id: ObjectId::parse_str(&request.organization_id)?,
            key: request.key.clone().filter(|key| !key.is_empty()),
        })
    }
}

impl From<&Topic> for TopicDto {
    fn from(topic: &Topic) -> Self {
        TopicDto {
            id: topic.id.to_hex(),
            organization_id: topic.organization_id.to_hex(),
            environment_id: topic.environment_id.to_hex(),
            key: topic.key.clone(),
            name: topic.name.clone(),
            subscribers: topic.subscribers.clone(),
        }
    }
}
