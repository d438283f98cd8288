//! Domain service for the movie catalogue.
//!
//! Each operation is a single request-scoped round trip to the store.

use crate::models::{Movie, MovieChanges, NewMovie, PatchOperation, ValidationProblem};
use thiserror::Error;

/// Errors specific to movie operations.
#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie {0} not found")]
    NotFound(i32),

    #[error("Validation failed")]
    Validation(ValidationProblem),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for MovieError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MovieError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<sea_orm::DbErr>() {
            Ok(db_err) => Self::from(db_err),
            Err(err) => Self::Internal(err.to_string()),
        }
    }
}

/// Domain service trait for movies.
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Stores a new movie and returns it with its assigned identifier.
    async fn create(&self, movie: NewMovie) -> Result<Movie, MovieError>;

    /// Lists up to `take` movies in storage order, skipping the first `skip`.
    async fn list(&self, skip: u64, take: u64) -> Result<Vec<Movie>, MovieError>;

    async fn get(&self, id: i32) -> Result<Movie, MovieError>;

    /// Overwrites every mutable field of a movie.
    async fn replace(&self, id: i32, changes: MovieChanges) -> Result<(), MovieError>;

    /// Applies patch operations to the movie's update projection, validates
    /// the result and merges it back.
    async fn patch(&self, id: i32, operations: Vec<PatchOperation>) -> Result<(), MovieError>;

    async fn delete(&self, id: i32) -> Result<(), MovieError>;
}
