//! Table bootstrap from the entity definitions.

use sea_orm::{ConnectionTrait, DbConn, DbErr, EntityName, EntityTrait, Schema};

use super::entity::{comment, post, user};

/// Create the `users`, `blog_posts` and `comments` tables if they are missing.
///
/// Parents are created before children so the foreign keys resolve.
pub async fn create_schema(db: &DbConn) -> Result<(), DbErr> {
    create_table(db, user::Entity).await?;
    create_table(db, post::Entity).await?;
    create_table(db, comment::Entity).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DbConn, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;

    tracing::debug!(table = entity.table_name(), "Table ready");
    Ok(())
}
