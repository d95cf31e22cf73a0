mod filter_topics_service;
mod topic_mapper;

pub use filter_topics_service::*;
