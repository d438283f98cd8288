use crate::entities::{movies, prelude::*};
use crate::models::movie::{MovieChanges, NewMovie};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use tracing::debug;

/// SQLite binds `OFFSET` and `LIMIT` as signed 64-bit integers.
const MAX_BOUND: u64 = i64::MAX.unsigned_abs();

/// Repository for the `movies` table.
///
/// Generic over the connection so the same queries run against the pool or
/// inside a [`UnitOfWork`](crate::db::UnitOfWork) transaction.
pub struct MovieRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> MovieRepository<'a, C> {
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, movie: NewMovie) -> Result<movies::Model> {
        let model = movie.into_active_model().insert(self.conn).await?;
        debug!("Inserted movie {}", model.id);
        Ok(model)
    }

    /// Returns up to `take` rows in storage order, starting at `skip`.
    ///
    /// Bounds above `i64::MAX` are clamped; no table can hold that many rows.
    pub async fn page(&self, skip: u64, take: u64) -> Result<Vec<movies::Model>> {
        let rows = Movies::find()
            .order_by_asc(movies::Column::Id)
            .offset(skip.min(MAX_BOUND))
            .limit(take.min(MAX_BOUND))
            .all(self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn find(&self, id: i32) -> Result<Option<movies::Model>> {
        let row = Movies::find()
            .filter(movies::Column::Id.eq(id))
            .one(self.conn)
            .await?;

        Ok(row)
    }

    pub async fn update(&self, model: movies::Model, changes: MovieChanges) -> Result<movies::Model> {
        let mut active: movies::ActiveModel = model.into();
        changes.apply_to(&mut active);
        let updated = active.update(self.conn).await?;
        Ok(updated)
    }

    pub async fn delete(&self, model: movies::Model) -> Result<bool> {
        let result = model.delete(self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        let count = Movies::find().count(self.conn).await?;
        Ok(count)
    }
}
