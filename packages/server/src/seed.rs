use sea_orm::*;
use sea_query::{Index, PostgresQueryBuilder};
use tracing::info;

use crate::entity::review;

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite unique indexes, so the
/// one backing the one-review-per-(user, film) rule is created manually
/// on startup. Review upserts rely on it for their ON CONFLICT target,
/// so a failure here is fatal.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_review_user_film")
        .table(review::Entity)
        .col(review::Column::UserId)
        .col(review::Column::FilmId)
        .unique()
        .to_string(PostgresQueryBuilder);

    db.execute_unprepared(&stmt).await?;
    info!("Ensured index idx_review_user_film exists");

    Ok(())
}
