use crate::entities::movies;
use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, Statement,
    TransactionTrait,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::movie::MovieRepository;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Opens a unit of work. Its changes reach the database only on
    /// [`UnitOfWork::commit`].
    pub async fn begin(&self) -> Result<UnitOfWork> {
        let txn = self.conn.begin().await?;
        Ok(UnitOfWork { txn })
    }

    fn movie_repo(&self) -> MovieRepository<'_, DatabaseConnection> {
        MovieRepository::new(&self.conn)
    }

    pub async fn list_movies(&self, skip: u64, take: u64) -> Result<Vec<movies::Model>> {
        self.movie_repo().page(skip, take).await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<movies::Model>> {
        self.movie_repo().find(id).await
    }

    pub async fn count_movies(&self) -> Result<u64> {
        self.movie_repo().count().await
    }

    #[cfg(test)]
    pub async fn add_movie(&self, movie: crate::models::movie::NewMovie) -> Result<movies::Model> {
        let work = self.begin().await?;
        let model = work.movies().insert(movie).await?;
        work.commit().await?;
        Ok(model)
    }
}

/// A single database transaction scoped to one request.
///
/// Dropping it without calling [`commit`](Self::commit) rolls back.
pub struct UnitOfWork {
    txn: DatabaseTransaction,
}

impl UnitOfWork {
    #[must_use]
    pub fn movies(&self) -> MovieRepository<'_, DatabaseTransaction> {
        MovieRepository::new(&self.txn)
    }

    pub async fn commit(self) -> Result<()> {
        self.txn.commit().await?;
        Ok(())
    }

    pub async fn rollback(self) -> Result<()> {
        self.txn.rollback().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movie::{MovieChanges, NewMovie};

    async fn memory_store() -> Store {
        Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .expect("failed to open in-memory store")
    }

    fn new_movie(title: &str) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            genre: "Drama".to_string(),
            duration: 120,
            release_date: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = memory_store().await;

        let first = store.add_movie(new_movie("First")).await.unwrap();
        let second = store.add_movie(new_movie("Second")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.count_movies().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_page_uses_storage_order() {
        let store = memory_store().await;
        for i in 0..5 {
            store.add_movie(new_movie(&format!("Movie {i}"))).await.unwrap();
        }

        let page = store.list_movies(1, 2).await.unwrap();
        let titles: Vec<_> = page.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Movie 1", "Movie 2"]);

        assert!(store.list_movies(10, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_page_accepts_bounds_beyond_sqlite_range() {
        let store = memory_store().await;
        store.add_movie(new_movie("Only")).await.unwrap();

        assert!(store.list_movies(u64::MAX, 10).await.unwrap().is_empty());

        let page = store.list_movies(0, u64::MAX).await.unwrap();
        assert_eq!(page.len(), 1);
    }

    #[tokio::test]
    async fn test_uncommitted_work_is_discarded() {
        let store = memory_store().await;
        let model = store.add_movie(new_movie("Original")).await.unwrap();

        {
            let work = store.begin().await.unwrap();
            let mut changes = MovieChanges::from(&model);
            changes.title = "Changed".to_string();
            work.movies().update(model.clone(), changes).await.unwrap();
            work.rollback().await.unwrap();
        }

        let stored = store.get_movie(model.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Original");
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let store = memory_store().await;
        let model = store.add_movie(new_movie("Doomed")).await.unwrap();

        let work = store.begin().await.unwrap();
        assert!(work.movies().delete(model.clone()).await.unwrap());
        work.commit().await.unwrap();

        assert!(store.get_movie(model.id).await.unwrap().is_none());
    }
}
