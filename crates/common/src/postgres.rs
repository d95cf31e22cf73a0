mod client;
mod config;
mod topic_repository;

pub use client::*;
pub use config::*;
pub use topic_repository::*;
