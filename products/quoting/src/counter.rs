use entity::proposal_counter::{self, Column, SINGLETON_ID};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, TransactionTrait,
};
use tracing::debug;

/// The single "last proposal number" row.
///
/// Values are only handed out through a transaction, so an aborted promotion
/// rolls the increment back together with the record that would have used it.
pub struct SequenceCounter;

impl SequenceCounter {
    /// Allocate the next number in a transaction of its own.
    pub async fn next_value(db: &DatabaseConnection) -> Result<i32, DbErr> {
        let txn = db.begin().await?;
        let value = Self::next_value_in(&txn).await?;
        txn.commit().await?;
        Ok(value)
    }

    /// Allocate the next number as part of the caller's transaction.
    ///
    /// The increment is a single `UPDATE ... SET last_assigned = last_assigned + 1`
    /// so concurrent callers serialize on the row lock and never read the same
    /// pre-increment value.
    pub async fn next_value_in(txn: &DatabaseTransaction) -> Result<i32, DbErr> {
        ensure_row(txn).await?;

        let updated = proposal_counter::Entity::update_many()
            .col_expr(Column::LastAssigned, Expr::col(Column::LastAssigned).add(1))
            .filter(Column::Id.eq(SINGLETON_ID))
            .exec(txn)
            .await?;
        if updated.rows_affected != 1 {
            return Err(DbErr::Custom(format!(
                "proposal counter update touched {} rows",
                updated.rows_affected
            )));
        }

        let row = proposal_counter::Entity::find_by_id(SINGLETON_ID)
            .one(txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("proposal_counter".into()))?;
        debug!(value = row.last_assigned, "proposal counter advanced");
        Ok(row.last_assigned)
    }

    /// Last number handed out, 0 before the first promotion.
    pub async fn last_assigned<C: ConnectionTrait>(conn: &C) -> Result<i32, DbErr> {
        Ok(proposal_counter::Entity::find_by_id(SINGLETON_ID)
            .one(conn)
            .await?
            .map(|row| row.last_assigned)
            .unwrap_or(0))
    }
}

async fn ensure_row(txn: &DatabaseTransaction) -> Result<(), DbErr> {
    let seed = proposal_counter::ActiveModel {
        id: Set(SINGLETON_ID),
        last_assigned: Set(0),
    };
    proposal_counter::Entity::insert(seed)
        .on_conflict(OnConflict::column(Column::Id).do_nothing().to_owned())
        .exec_without_returning(txn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use platform_db::{DatabaseSettings, connect_url};

    async fn setup() -> DatabaseConnection {
        let settings = DatabaseSettings::default().with_max_connections(1);
        let db = connect_url("sqlite::memory:", &settings).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    #[tokio::test]
    async fn counter_is_created_lazily() {
        let db = setup().await;
        assert_eq!(SequenceCounter::last_assigned(&db).await.unwrap(), 0);
        assert!(
            proposal_counter::Entity::find_by_id(SINGLETON_ID)
                .one(&db)
                .await
                .unwrap()
                .is_none()
        );

        assert_eq!(SequenceCounter::next_value(&db).await.unwrap(), 1);
        assert_eq!(SequenceCounter::next_value(&db).await.unwrap(), 2);
        assert_eq!(SequenceCounter::last_assigned(&db).await.unwrap(), 2);
        assert_eq!(proposal_counter::Entity::find().all(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rolled_back_allocation_is_not_visible() {
        let db = setup().await;
        SequenceCounter::next_value(&db).await.unwrap();

        let txn = db.begin().await.unwrap();
        assert_eq!(SequenceCounter::next_value_in(&txn).await.unwrap(), 2);
        txn.rollback().await.unwrap();

        assert_eq!(SequenceCounter::last_assigned(&db).await.unwrap(), 1);
        assert_eq!(SequenceCounter::next_value(&db).await.unwrap(), 2);
    }
}
