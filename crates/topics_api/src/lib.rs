pub mod config;
pub mod domain;
pub mod topics_api;

pub use self::config::ServiceConfig;
pub use self::domain::*;
pub use self::topics_api::*;
