use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Query string of `GET /filme`.
#[derive(Debug, Default, Deserialize)]
pub struct ListMoviesQuery {
    #[serde(default)]
    pub skip: u64,
    /// Falls back to the configured page size when absent.
    pub take: Option<u64>,
}

impl ListMoviesQuery {
    /// Requested page size, defaulted and clamped to `max_take`.
    #[must_use]
    pub fn page_size(&self, pagination: &PaginationConfig) -> u64 {
        self.take
            .unwrap_or(pagination.default_take)
            .min(pagination.max_take)
    }
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub movies: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_defaults_and_clamps() {
        let pagination = PaginationConfig::default();

        let query = ListMoviesQuery::default();
        assert_eq!(query.page_size(&pagination), 10);

        let query = ListMoviesQuery {
            skip: 0,
            take: Some(0),
        };
        assert_eq!(query.page_size(&pagination), 0);

        let query = ListMoviesQuery {
            skip: 0,
            take: Some(5000),
        };
        assert_eq!(query.page_size(&pagination), 1000);
    }
}
