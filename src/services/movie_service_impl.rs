//! `SeaORM` implementation of the `MovieService` trait.

use crate::db::Store;
use crate::models::{Movie, MovieChanges, NewMovie, PatchOperation, ValidationProblem};
use crate::services::movie_service::{MovieError, MovieService};
use async_trait::async_trait;
use tracing::info;
use validator::Validate;

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn create(&self, movie: NewMovie) -> Result<Movie, MovieError> {
        let work = self.store.begin().await?;
        let model = work.movies().insert(movie).await?;
        work.commit().await?;

        info!(movie_id = model.id, title = %model.title, "Movie created");
        Ok(Movie::from(model))
    }

    async fn list(&self, skip: u64, take: u64) -> Result<Vec<Movie>, MovieError> {
        let rows = self.store.list_movies(skip, take).await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn get(&self, id: i32) -> Result<Movie, MovieError> {
        self.store
            .get_movie(id)
            .await?
            .map(Movie::from)
            .ok_or(MovieError::NotFound(id))
    }

    async fn replace(&self, id: i32, changes: MovieChanges) -> Result<(), MovieError> {
        let work = self.store.begin().await?;
        let model = work
            .movies()
            .find(id)
            .await?
            .ok_or(MovieError::NotFound(id))?;

        work.movies().update(model, changes).await?;
        work.commit().await?;

        info!(movie_id = id, "Movie replaced");
        Ok(())
    }

    async fn patch(&self, id: i32, operations: Vec<PatchOperation>) -> Result<(), MovieError> {
        let work = self.store.begin().await?;
        let model = work
            .movies()
            .find(id)
            .await?
            .ok_or(MovieError::NotFound(id))?;

        let mut projection = MovieChanges::from(&model);
        let mut problem = ValidationProblem::new();
        if let Err(errors) = projection.apply_patch(&operations) {
            for e in errors {
                problem.add(e.path(), e.to_string());
            }
        }
        if let Err(errors) = projection.validate() {
            problem.merge(errors.into());
        }
        if !problem.is_empty() {
            return Err(MovieError::Validation(problem));
        }

        work.movies().update(model, projection).await?;
        work.commit().await?;

        info!(
            movie_id = id,
            operations = operations.len(),
            "Movie patched"
        );
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), MovieError> {
        let work = self.store.begin().await?;
        let model = work
            .movies()
            .find(id)
            .await?
            .ok_or(MovieError::NotFound(id))?;

        work.movies().delete(model).await?;
        work.commit().await?;

        info!(movie_id = id, "Movie deleted");
        Ok(())
    }
}
