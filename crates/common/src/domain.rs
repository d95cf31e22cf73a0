mod in_memory_topic_repository;
mod object_id;
mod pagination;
mod result;
mod topic;

pub use in_memory_topic_repository::*;
pub use object_id::*;
pub use pagination::*;
pub use result::*;
pub use topic::*;
