use serde::{Deserialize, Serialize};

/// PostgreSQL configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub max_pool_size: usize,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "topics".to_string(),
            username: "topics".to_string(),
            password: "topics".to_string(),
            max_pool_size: 10,
        }
    }
}
