use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DbConn, DbErr, EntityTrait, PrimaryKeyTrait, SqlErr};

use blog_core::error::{ConstraintViolation, RepoError};
use blog_core::ports::BaseRepository;

/// Generic SeaORM repository, one per entity.
///
/// Repositories share one pool through the `Arc`.
pub struct SeaOrmRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: Arc<DbConn>,
    _entity: PhantomData<E>,
}

impl<E> SeaOrmRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: Arc<DbConn>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for SeaOrmRepository<E>
where
    E: EntityTrait,
    E::Model: Sync + Send,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

/// Map a write failure, naming the uniqueness rule the caller's table carries.
pub(crate) fn write_err(err: DbErr, on_unique: ConstraintViolation) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => return RepoError::Constraint(on_unique),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            return RepoError::Constraint(ConstraintViolation::MissingReference);
        }
        _ => {}
    }
    query_err(err)
}

pub(crate) fn query_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        other => RepoError::Query(other.to_string()),
    }
}
